//! Debug line data for a rigid body
//!
//! Produces world-space line segments for the box wireframe, the velocity
//! vectors and the force log. Drawing them is left to the caller.

use crate::physics::body::RigidBody;
use crate::physics::components::BOX_EDGES;
use glam::{DVec3, Vec3, Vec4};
use tracing::trace;

/// Floats per line vertex in [`to_vertex_data`]: position then RGBA
pub const FLOATS_PER_VERTEX: usize = 7;

/// One coloured segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Vec4,
}

impl DebugLine {
    fn new(start: DVec3, end: DVec3, color: Vec4) -> Self {
        Self {
            start: start.as_vec3(),
            end: end.as_vec3(),
            color,
        }
    }
}

/// Which layers to emit and how to colour them
#[derive(Debug, Clone, Copy)]
pub struct PhysicsDebugSettings {
    pub show_shape: bool,
    pub show_velocities: bool,
    pub show_force_log: bool,
    pub shape_color: Vec4,
    pub linear_velocity_color: Vec4,
    pub angular_velocity_color: Vec4,
}

impl Default for PhysicsDebugSettings {
    fn default() -> Self {
        Self {
            show_shape: true,
            show_velocities: true,
            show_force_log: true,
            shape_color: Vec4::new(1.0, 1.0, 1.0, 0.8),          // White
            linear_velocity_color: Vec4::new(1.0, 0.0, 0.0, 1.0), // Red
            angular_velocity_color: Vec4::new(0.0, 1.0, 0.0, 1.0), // Green
        }
    }
}

/// Collect the debug segments for `body`
pub fn collect_debug_lines(body: &RigidBody, settings: &PhysicsDebugSettings) -> Vec<DebugLine> {
    let mut lines = Vec::new();
    let pose = body.pose();

    if settings.show_shape {
        if let Some(corners) = body.shape().and_then(|s| s.corners()) {
            let world = corners.map(|c| pose.transform_point(c));
            for &(i, j) in &BOX_EDGES {
                lines.push(DebugLine::new(world[i], world[j], settings.shape_color));
            }
        }
    }

    if settings.show_velocities {
        let origin = pose.position;
        let linear = body.linear_velocity();
        if linear != DVec3::ZERO {
            lines.push(DebugLine::new(
                origin,
                origin + linear,
                settings.linear_velocity_color,
            ));
        }
        let angular = body.angular_velocity();
        if angular != DVec3::ZERO {
            lines.push(DebugLine::new(
                origin,
                origin + angular,
                settings.angular_velocity_color,
            ));
        }
    }

    if settings.show_force_log {
        for record in body.force_log().iter() {
            lines.push(DebugLine::new(
                record.point,
                record.point + record.vector,
                record.tag.color(),
            ));
        }
    }

    trace!(count = lines.len(), "Collected physics debug lines");
    lines
}

/// Flatten segments into interleaved vertex data, two vertices per line
pub fn to_vertex_data(lines: &[DebugLine]) -> Vec<f32> {
    let mut data = Vec::with_capacity(lines.len() * 2 * FLOATS_PER_VERTEX);
    for line in lines {
        for p in [line.start, line.end] {
            data.extend_from_slice(&[p.x, p.y, p.z]);
            data.extend_from_slice(&line.color.to_array());
        }
    }
    data
}
