//! Drop a box onto the floor and log its motion
//!
//! Usage: `drop_box [config.json]`

use std::sync::Arc;
use tracing::info;
use tumble_engine::physics::{collect_debug_lines, PhysicsDebugSettings};
use tumble_engine::prelude::*;

fn main() -> Result<(), PhysicsError> {
    // Initialize logging
    tumble_engine::init_logging();

    info!("=== Box Drop ===");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading physics config from {}", path);
            PhysicsConfig::load_from_file(path)?
        }
        None => PhysicsConfig::default(),
    };
    info!(
        "Gravity {:?}, restitution {}, resolution {:?}",
        config.gravity, config.restitution, config.contact_resolution
    );

    let mut body = RigidBody::new(config)?;
    body.set_mass(1.0)?;
    body.set_shape(Some(Arc::new(BoxShape::cube(1.0))))?;
    body.set_position(DVec3::new(0.0, 0.0, 5.0));
    body.set_angular_velocity(DVec3::new(0.0, 0.01, 0.0));

    let dt = 1.0 / 60.0;
    for step in 0..240 {
        body.update(dt);

        if step % 10 == 0 || body.deepest_penetration() < 0.0 {
            info!(
                "Step {:3}: z={:.4} vz={:.4} |w|={:.4} depth={:.4}",
                step,
                body.position().z,
                body.linear_velocity().z,
                body.angular_velocity().length(),
                body.deepest_penetration()
            );
        }

        if let Some(TickOutcome::Suspended(point)) = body.last_tick() {
            info!("Simulation paused at {:?}", point);
            break;
        }
    }

    let lines = collect_debug_lines(&body, &PhysicsDebugSettings::default());
    info!(
        "Final pose {:?}, {} force records, {} debug lines",
        body.pose(),
        body.force_log().len(),
        lines.len()
    );

    Ok(())
}
