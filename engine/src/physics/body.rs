//! The simulated rigid body and its external interface

use crate::config::PhysicsConfig;
use crate::physics::accumulator::ForceAccumulator;
use crate::physics::collision::{velocity_at_point, BodyState};
use crate::physics::components::{Pose, ShapeProvider};
use crate::physics::debug::{ForceLog, ForceTag};
use crate::physics::inertia;
use crate::physics::system::{SimulationState, TickOutcome};
use crate::physics::{PhysicsError, MIN_FORCE_MAGNITUDE};
use glam::{DMat3, DQuat, DVec3};
use std::sync::Arc;
use tracing::{debug, warn};

/// A single box-shaped rigid body colliding with a static ground plane.
///
/// The body starts at rest with mass `0` and no shape. Set the mass first and
/// the shape second; both setters reject values that would make the inertia
/// tensor singular. `mass == 0` means forces are integrated without dividing
/// by mass (see [`crate::config::ZeroMassPolicy`]).
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub(crate) pose: Pose,
    pub(crate) mass: f64,
    pub(crate) linear_velocity: DVec3,
    pub(crate) angular_velocity: DVec3,
    pub(crate) accumulator: ForceAccumulator,
    pub(crate) shape: Option<Arc<dyn ShapeProvider>>,
    pub(crate) force_log: ForceLog,
    pub(crate) state: SimulationState,
    pub(crate) last_tick: Option<TickOutcome>,
    pub(crate) deepest_penetration: f64,
    pub(crate) config: PhysicsConfig,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::with_valid_config(PhysicsConfig::default())
    }
}

impl RigidBody {
    /// Create a body with the given configuration
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        Ok(Self::with_valid_config(config.validated()?))
    }

    fn with_valid_config(config: PhysicsConfig) -> Self {
        Self {
            pose: Pose::default(),
            mass: 0.0,
            linear_velocity: DVec3::ZERO,
            angular_velocity: DVec3::ZERO,
            accumulator: ForceAccumulator::new(),
            shape: None,
            force_log: ForceLog::new(),
            state: SimulationState::Running,
            last_tick: None,
            deepest_penetration: 0.0,
            config,
        }
    }

    /// Configuration the body was created with
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Current pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Position of the body origin
    pub fn position(&self) -> DVec3 {
        self.pose.position
    }

    /// Move the body origin
    pub fn set_position(&mut self, position: DVec3) {
        self.pose.position = position;
    }

    /// Current orientation
    pub fn orientation(&self) -> DQuat {
        self.pose.orientation
    }

    /// Set the orientation; the quaternion is normalized
    pub fn set_orientation(&mut self, orientation: DQuat) {
        self.pose.orientation = orientation.normalize();
    }

    /// Mass in kilograms
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass.
    ///
    /// Fails for negative or non-finite values, and for `0` while a shape is
    /// attached.
    pub fn set_mass(&mut self, mass: f64) -> Result<(), PhysicsError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "mass must be finite and non-negative, got {mass}"
            )));
        }
        if mass == 0.0 && self.shape.is_some() {
            return Err(PhysicsError::InvalidConfiguration(
                "mass must be positive while a shape is attached".to_string(),
            ));
        }

        debug!(mass, "Setting mass");
        self.mass = mass;
        Ok(())
    }

    /// Linear velocity in world space
    pub fn linear_velocity(&self) -> DVec3 {
        self.linear_velocity
    }

    /// Set the linear velocity
    pub fn set_linear_velocity(&mut self, velocity: DVec3) {
        self.linear_velocity = velocity;
    }

    /// Angular velocity; its length is the rotation applied per tick
    pub fn angular_velocity(&self) -> DVec3 {
        self.angular_velocity
    }

    /// Set the angular velocity
    pub fn set_angular_velocity(&mut self, velocity: DVec3) {
        self.angular_velocity = velocity;
    }

    /// Attached collider, if any
    pub fn shape(&self) -> Option<&Arc<dyn ShapeProvider>> {
        self.shape.as_ref()
    }

    /// Attach or detach the collider.
    ///
    /// Requires a positive mass and, for box shapes, strictly positive finite
    /// half-extents.
    pub fn set_shape(&mut self, shape: Option<Arc<dyn ShapeProvider>>) -> Result<(), PhysicsError> {
        if let Some(shape) = &shape {
            if let Some(extents) = shape.half_extents() {
                if !extents.is_finite() || extents.min_element() <= 0.0 {
                    return Err(PhysicsError::InvalidConfiguration(format!(
                        "box extents must be positive and finite, got {extents:?}"
                    )));
                }
            }
            if self.mass <= 0.0 {
                return Err(PhysicsError::InvalidConfiguration(
                    "set a positive mass before attaching a shape".to_string(),
                ));
            }
        }

        debug!(has_shape = shape.is_some(), "Setting shape");
        self.shape = shape;
        Ok(())
    }

    /// Diagnostic record of applied forces and contact impulses
    pub fn force_log(&self) -> &ForceLog {
        &self.force_log
    }

    /// Forces and impulses waiting for the next integration pass
    pub fn accumulator(&self) -> &ForceAccumulator {
        &self.accumulator
    }

    /// Inertia tensor in body space
    pub fn local_inertia_tensor(&self) -> DMat3 {
        let extents = self.shape.as_ref().and_then(|s| s.half_extents());
        inertia::local_inertia_tensor(self.mass, extents)
    }

    /// Inertia tensor oriented by the current pose (`R * I`)
    pub fn world_inertia_tensor(&self) -> DMat3 {
        inertia::world_inertia_tensor(self.local_inertia_tensor(), self.pose.orientation)
    }

    /// Inverse of [`Self::world_inertia_tensor`], `None` when singular
    pub fn inverse_world_inertia_tensor(&self) -> Option<DMat3> {
        inertia::try_inverse(self.world_inertia_tensor())
    }

    /// Combined velocity `v + ω × r` of a world-space point attached to the body
    pub fn velocity_at_point(&self, point: DVec3) -> DVec3 {
        velocity_at_point(
            self.pose.position,
            self.linear_velocity,
            self.angular_velocity,
            point,
        )
    }

    /// Apply a force at a world-space point, logged as [`ForceTag::APPLIED_FORCE`]
    pub fn apply_force_at_point(&mut self, point: DVec3, force: DVec3) -> Result<(), PhysicsError> {
        self.apply_force_at_point_tagged(point, force, ForceTag::APPLIED_FORCE)
    }

    /// Apply a force at a world-space point with a caller-chosen log tag.
    ///
    /// The force goes to the force accumulator unchanged. Its torque about the
    /// body origin is passed through the inverse world inertia tensor before
    /// it is accumulated. Forces shorter than [`MIN_FORCE_MAGNITUDE`] are
    /// ignored.
    pub fn apply_force_at_point_tagged(
        &mut self,
        point: DVec3,
        force: DVec3,
        tag: ForceTag,
    ) -> Result<(), PhysicsError> {
        if !point.is_finite() || !force.is_finite() {
            return Err(PhysicsError::InvalidArgument(format!(
                "point and force must be finite, got point={point:?} force={force:?}"
            )));
        }
        if force.length() < MIN_FORCE_MAGNITUDE {
            return Ok(());
        }

        self.force_log.push(point, force, tag);
        self.accumulator.add_force(force);

        let torque = (point - self.pose.position).cross(force);
        match self.inverse_world_inertia_tensor() {
            Some(inverse) => {
                let response = inverse * torque;
                self.force_log.push(point, response, ForceTag::APPLIED_TORQUE);
                self.accumulator.add_torque(response);
            }
            None => warn!(?torque, "Inertia tensor is singular, dropping torque"),
        }

        Ok(())
    }

    /// Suspend or resume the simulation
    pub fn set_paused(&mut self, paused: bool) {
        self.state = if paused {
            SimulationState::Paused
        } else {
            SimulationState::Running
        };
    }

    /// Whether [`Self::update`] currently returns immediately
    pub fn is_paused(&self) -> bool {
        self.state == SimulationState::Paused
    }

    /// Current run state
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Outcome of the most recent call to [`Self::update`]
    pub fn last_tick(&self) -> Option<TickOutcome> {
        self.last_tick
    }

    /// Deepest corner penetration seen by the last contact pass, `0.0` if none
    pub fn deepest_penetration(&self) -> f64 {
        self.deepest_penetration
    }

    /// Snapshot for the impulse resolver, `None` when the inertia is singular
    pub(crate) fn body_state(&self) -> Option<BodyState> {
        let inverse_inertia = self.inverse_world_inertia_tensor()?;
        Some(BodyState {
            position: self.pose.position,
            linear_velocity: self.linear_velocity,
            angular_velocity: self.angular_velocity,
            inverse_mass: if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 },
            inverse_inertia,
        })
    }
}
