//! Discrete corner sampling against the ground plane

use super::{Contact, GroundPlane};
use crate::physics::components::Pose;
use glam::DVec3;
use tracing::trace;

/// Velocity of a point rigidly attached to the body: `ω × r + v`
pub fn velocity_at_point(
    position: DVec3,
    linear_velocity: DVec3,
    angular_velocity: DVec3,
    point: DVec3,
) -> DVec3 {
    let r = point - position;
    angular_velocity.cross(r) + linear_velocity
}

/// Result of one floor contact pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloorContactReport {
    /// Every corner below the plane, in corner order
    pub contacts: Vec<Contact>,
    /// Most negative signed distance among the corners, `0.0` when none penetrate
    pub deepest: f64,
}

impl FloorContactReport {
    /// Whether any corner is below the plane
    pub fn is_penetrating(&self) -> bool {
        !self.contacts.is_empty()
    }

    /// Contacts still moving into the floor
    pub fn closing(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.is_closing())
    }
}

/// Transform the eight local corners by `pose` and collect the ones below `ground`
pub fn detect_floor_contacts(
    pose: &Pose,
    corners: &[DVec3; 8],
    linear_velocity: DVec3,
    angular_velocity: DVec3,
    ground: &GroundPlane,
) -> FloorContactReport {
    let mut report = FloorContactReport::default();

    for local in corners {
        let point = pose.transform_point(*local);
        let depth = ground.signed_distance(point);
        if depth >= 0.0 {
            continue;
        }

        let point_velocity =
            velocity_at_point(pose.position, linear_velocity, angular_velocity, point);
        trace!(?point, depth, ?point_velocity, "Corner below ground");

        report.deepest = report.deepest.min(depth);
        report.contacts.push(Contact {
            point,
            normal: ground.normal,
            depth,
            point_velocity,
        });
    }

    report
}
