//! Explicit integration of velocities and pose

use crate::config::ZeroMassPolicy;
use crate::physics::accumulator::ForceAccumulator;
use crate::physics::components::Pose;
use crate::physics::REST_THRESHOLD_SQUARED;
use glam::{DQuat, DVec3};
use tracing::trace;

/// Mass-related parameters shared by both velocity steps
#[derive(Debug, Clone, Copy)]
pub struct MassParams {
    pub mass: f64,
    pub zero_mass: ZeroMassPolicy,
}

impl MassParams {
    fn is_immovable(&self) -> bool {
        self.mass == 0.0 && self.zero_mass == ZeroMassPolicy::Immovable
    }

    /// Scale by `1 / mass` unless mass is zero
    fn scale(&self, value: DVec3) -> DVec3 {
        if self.mass > 0.0 {
            value * (1.0 / self.mass)
        } else {
            value
        }
    }
}

/// Drain the force buffer and the pending linear impulse into the linear velocity
pub fn integrate_linear_velocity(
    linear_velocity: &mut DVec3,
    accumulator: &mut ForceAccumulator,
    params: MassParams,
    dt: f64,
) {
    let force = accumulator.take_force();
    let impulse = accumulator.take_linear_impulse();

    if params.is_immovable() {
        return;
    }

    *linear_velocity += params.scale(force) * dt;
    *linear_velocity += impulse;
}

/// Drain the torque buffer and the pending angular impulse into the angular velocity.
///
/// Contributions are dropped when the body has no shape or when their squared
/// length is below the rest threshold.
pub fn integrate_angular_velocity(
    angular_velocity: &mut DVec3,
    accumulator: &mut ForceAccumulator,
    params: MassParams,
    has_shape: bool,
    dt: f64,
) {
    let torque = accumulator.take_torque();
    let impulse = accumulator.take_angular_impulse();

    if !has_shape || params.is_immovable() {
        return;
    }

    if torque.length_squared() >= REST_THRESHOLD_SQUARED {
        *angular_velocity += params.scale(torque) * dt;
    }

    if impulse.length_squared() >= REST_THRESHOLD_SQUARED {
        *angular_velocity += impulse;
    }
}

/// Advance position by `linear_velocity * dt`
pub fn integrate_position(pose: &mut Pose, linear_velocity: DVec3, dt: f64) {
    pose.position += linear_velocity * dt;
}

/// Rotate the orientation about the angular velocity axis.
///
/// The rotation angle is the full magnitude of `angular_velocity`; it is not
/// multiplied by the time step. The delta is composed on the right,
/// `orientation * delta`, and the position is left unchanged.
pub fn integrate_orientation(pose: &mut Pose, angular_velocity: DVec3) {
    let angle = angular_velocity.length();
    if angle == 0.0 || !angle.is_finite() {
        return;
    }

    let delta = DQuat::from_axis_angle(angular_velocity / angle, angle);
    pose.orientation = (pose.orientation * delta).normalize();
    trace!(angle, orientation = ?pose.orientation, "Integrated orientation");
}
