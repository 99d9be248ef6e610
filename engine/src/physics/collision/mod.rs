//! Floor collision: ground plane, corner sampling and impulse response

pub mod floor;
pub mod impulse;

pub use floor::{detect_floor_contacts, velocity_at_point, FloorContactReport};
pub use impulse::{resolve_contact, resolve_contacts, BodyState, ContactImpulse};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Infinite static plane the body collides with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GroundPlane {
    /// Any point on the plane
    pub point: DVec3,
    /// Unit normal pointing out of the floor
    pub normal: DVec3,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            point: DVec3::ZERO,
            normal: DVec3::Z,
        }
    }
}

impl GroundPlane {
    /// Create a plane through `point`; `normal` is normalized
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Horizontal floor at the given height
    pub fn at_height(z: f64) -> Self {
        Self {
            point: DVec3::new(0.0, 0.0, z),
            normal: DVec3::Z,
        }
    }

    /// Signed distance of `p` above the plane, negative when below
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        (p - self.point).dot(self.normal)
    }
}

/// A box corner found below the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// World-space corner position
    pub point: DVec3,
    /// Ground normal at the contact
    pub normal: DVec3,
    /// Signed distance to the plane (negative)
    pub depth: f64,
    /// Combined linear and angular velocity of the corner
    pub point_velocity: DVec3,
}

impl Contact {
    /// Whether the corner is still moving into the floor
    pub fn is_closing(&self) -> bool {
        self.point_velocity.dot(self.normal) < 0.0
    }
}
