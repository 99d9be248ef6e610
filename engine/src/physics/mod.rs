//! Rigid-body dynamics with impulse-based floor collision response
//!
//! A [`RigidBody`] owns its pose, velocities and per-tick force/torque
//! accumulators. Each call to [`RigidBody::update`] samples the eight box
//! corners against the ground plane, queues collision impulses, adds gravity
//! and integrates linear and angular motion.

pub mod accumulator;
pub mod body;
pub mod collision;
pub mod components;
pub mod debug;
pub mod debug_visualization;
pub mod error;
pub mod inertia;
pub mod integrator;
pub mod system;

// Re-export commonly used types
pub use body::RigidBody;
pub use collision::{Contact, GroundPlane};
pub use components::{BoxShape, Pose, ShapeProvider};
pub use debug::{ForceLog, ForceRecord, ForceTag, FORCE_LOG_CAPACITY};
pub use debug_visualization::{
    collect_debug_lines, to_vertex_data, DebugLine, PhysicsDebugSettings,
};
pub use error::PhysicsError;
pub use system::{SimulationState, SuspensionPoint, TickOutcome};

/// Squared magnitude below which torque contributions are treated as rest
pub const REST_THRESHOLD_SQUARED: f64 = 1e-6;

/// Force magnitude below which `apply_force_at_point` is a no-op
pub const MIN_FORCE_MAGNITUDE: f64 = 1e-6;
