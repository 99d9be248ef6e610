//! Per-tick force and torque accumulation
//!
//! Forces, gravity and queued contact impulses are collected here between
//! integration passes. The integrator drains every buffer, so all of them are
//! zero again at the end of a completed tick.

use crate::config::ImpulseIntegration;
use glam::DVec3;
use tracing::trace;

/// Scratch buffers consumed by one integration pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceAccumulator {
    /// Sum of forces, divided by mass and scaled by `dt` on integration
    force: DVec3,
    /// Inertia-weighted angular velocity deltas, scaled like `force`
    torque: DVec3,
    /// Contact impulses waiting to be added to the linear velocity as-is
    linear_impulse: DVec3,
    /// Contact impulses waiting to be added to the angular velocity as-is
    angular_impulse: DVec3,
}

impl ForceAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a linear force
    pub fn add_force(&mut self, force: DVec3) {
        self.force += force;
    }

    /// Add an angular contribution that has already been passed through the
    /// inverse inertia tensor
    pub fn add_torque(&mut self, torque: DVec3) {
        self.torque += torque;
    }

    /// Add the weight of the body
    pub fn add_gravity(&mut self, gravity: DVec3, mass: f64) {
        self.force += gravity * mass;
    }

    /// Queue a contact impulse for the next integration pass
    pub fn queue_impulse(&mut self, linear: DVec3, angular: DVec3, mode: ImpulseIntegration) {
        trace!(?linear, ?angular, ?mode, "Queueing contact impulse");
        match mode {
            ImpulseIntegration::DeltaVelocity => {
                self.linear_impulse += linear;
                self.angular_impulse += angular;
            }
            ImpulseIntegration::SharedAccumulator => {
                self.force += linear;
                self.torque += angular;
            }
        }
    }

    /// Accumulated force
    pub fn force(&self) -> DVec3 {
        self.force
    }

    /// Accumulated torque (angular velocity delta units)
    pub fn torque(&self) -> DVec3 {
        self.torque
    }

    /// Pending linear impulse
    pub fn linear_impulse(&self) -> DVec3 {
        self.linear_impulse
    }

    /// Pending angular impulse
    pub fn angular_impulse(&self) -> DVec3 {
        self.angular_impulse
    }

    /// Drain the force buffer
    pub fn take_force(&mut self) -> DVec3 {
        std::mem::take(&mut self.force)
    }

    /// Drain the torque buffer
    pub fn take_torque(&mut self) -> DVec3 {
        std::mem::take(&mut self.torque)
    }

    /// Drain the pending linear impulse
    pub fn take_linear_impulse(&mut self) -> DVec3 {
        std::mem::take(&mut self.linear_impulse)
    }

    /// Drain the pending angular impulse
    pub fn take_angular_impulse(&mut self) -> DVec3 {
        std::mem::take(&mut self.angular_impulse)
    }

    /// Discard everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether every buffer is zero
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}
