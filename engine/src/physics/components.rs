//! Pose and collider types consumed by the rigid body

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rigid transform: position plus unit-quaternion orientation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    /// Position of the body origin (center of mass) in world space
    pub position: DVec3,
    /// Orientation in world space
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a pose from position and orientation
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create an unrotated pose at the given position
    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Map a local-space point into world space
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.orientation * local
    }
}

/// Read-only collider supplied by the owner of the body.
///
/// The body never mutates its shape. A shape that is not a box returns `None`
/// from [`ShapeProvider::half_extents`]; the body then falls back to a scalar
/// inertia approximation and skips floor contact.
pub trait ShapeProvider: fmt::Debug + Send + Sync {
    /// Box half-extents along the local axes
    fn half_extents(&self) -> Option<DVec3>;

    /// The eight box corners in local space
    fn corners(&self) -> Option<[DVec3; 8]> {
        self.half_extents().map(box_corners)
    }
}

/// Corners of a centered box, bottom face (-z) first
pub fn box_corners(half_extents: DVec3) -> [DVec3; 8] {
    let DVec3 { x, y, z } = half_extents;
    [
        DVec3::new(-x, -y, -z),
        DVec3::new(x, -y, -z),
        DVec3::new(x, y, -z),
        DVec3::new(-x, y, -z),
        DVec3::new(-x, -y, z),
        DVec3::new(x, -y, z),
        DVec3::new(x, y, z),
        DVec3::new(-x, y, z),
    ]
}

/// Pairs of corner indices forming the 12 box edges
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0), // Bottom face
    (4, 5), (5, 6), (6, 7), (7, 4), // Top face
    (0, 4), (1, 5), (2, 6), (3, 7), // Vertical edges
];

/// Axis-aligned box collider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoxShape {
    /// Half-extents (width/2, depth/2, height/2)
    pub half_extents: DVec3,
}

impl BoxShape {
    /// Create a box collider
    pub fn new(half_extents: DVec3) -> Self {
        Self { half_extents }
    }

    /// Create a cube with equal half-extents
    pub fn cube(half_extent: f64) -> Self {
        Self::new(DVec3::splat(half_extent))
    }
}

impl ShapeProvider for BoxShape {
    fn half_extents(&self) -> Option<DVec3> {
        Some(self.half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_corners() {
        let corners = box_corners(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(corners[0], DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(corners[6], DVec3::new(1.0, 2.0, 3.0));
        // Bottom face first
        assert!(corners[..4].iter().all(|c| c.z == -3.0));
        assert!(corners[4..].iter().all(|c| c.z == 3.0));
    }

    #[test]
    fn test_box_edges_are_axis_aligned() {
        let corners = box_corners(DVec3::ONE);
        for (a, b) in BOX_EDGES {
            let d = corners[a] - corners[b];
            let changed = [d.x, d.y, d.z].iter().filter(|v| **v != 0.0).count();
            assert_eq!(changed, 1, "edge ({a}, {b}) is not axis aligned");
        }
    }

    #[test]
    fn test_pose_transform_point() {
        let pose = Pose::new(
            DVec3::new(0.0, 0.0, 5.0),
            DQuat::from_rotation_z(std::f64::consts::FRAC_PI_2),
        );
        let p = pose.transform_point(DVec3::X);
        assert!((p - DVec3::new(0.0, 1.0, 5.0)).length() < 1e-12);
    }

    #[test]
    fn test_box_shape_provider() {
        let shape = BoxShape::cube(0.5);
        assert_eq!(shape.half_extents(), Some(DVec3::splat(0.5)));
        assert_eq!(shape.corners().map(|c| c.len()), Some(8));
    }
}
