//! Tumble rigid-body engine
//!
//! This crate simulates a single box-shaped rigid body against a static ground
//! plane: force and torque accumulation, explicit integration of linear and
//! angular motion, discrete corner sampling against the floor and
//! impulse-based collision response.

pub mod config;
pub mod physics;

// Re-export commonly used types
pub mod prelude {
    // Config types
    pub use crate::config::{
        ContactResolution, ImpulseIntegration, PhysicsConfig, ZeroMassPolicy,
    };

    // Physics types
    pub use crate::physics::{
        BoxShape, ForceLog, ForceRecord, ForceTag, GroundPlane, PhysicsError, Pose, RigidBody,
        ShapeProvider, SimulationState, SuspensionPoint, TickOutcome,
    };

    // Math types
    pub use glam::{DMat3, DQuat, DVec3, Vec4};
}

/// Initialize logging for the engine
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
