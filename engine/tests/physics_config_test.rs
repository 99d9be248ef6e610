//! Loading physics configuration from JSON

use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tumble_engine::prelude::*;

#[test]
fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{
            "gravity": [0.0, 0.0, -1.62],
            "restitution": 0.6,
            "pause_on_contact": true,
            "contact_resolution": {{ "Iterative": {{ "iterations": 8 }} }}
        }}"#
    )
    .unwrap();

    let config = PhysicsConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.gravity, DVec3::new(0.0, 0.0, -1.62));
    assert_eq!(config.restitution, 0.6);
    assert!(config.pause_on_contact);
    assert_eq!(
        config.contact_resolution,
        ContactResolution::Iterative { iterations: 8 }
    );
    assert_eq!(config.impulse_integration, ImpulseIntegration::DeltaVelocity);
}

#[test]
fn test_loaded_config_drives_body() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "gravity": [0.0, 0.0, -1.62] }}"#).unwrap();

    let config = PhysicsConfig::load_from_file(file.path()).unwrap();
    let mut body = RigidBody::new(config).unwrap();
    body.set_mass(1.0).unwrap();
    body.set_shape(Some(Arc::new(BoxShape::cube(0.5)))).unwrap();
    body.set_position(DVec3::new(0.0, 0.0, 10.0));

    body.update(1.0);

    assert!((body.linear_velocity().z + 1.62).abs() < 1e-12);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = PhysicsConfig::load_from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(PhysicsError::Io(_))));
}

#[test]
fn test_invalid_values_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "restitution": 2.0 }}"#).unwrap();

    let result = PhysicsConfig::load_from_file(file.path());
    assert!(matches!(result, Err(PhysicsError::InvalidConfiguration(_))));
}

#[test]
fn test_config_round_trip() {
    let config = PhysicsConfig {
        ground: GroundPlane::at_height(-3.0),
        zero_mass: ZeroMassPolicy::Immovable,
        impulse_integration: ImpulseIntegration::SharedAccumulator,
        ..Default::default()
    };

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed = PhysicsConfig::from_json_str(&json).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn test_immovable_zero_mass_body() {
    let config = PhysicsConfig {
        zero_mass: ZeroMassPolicy::Immovable,
        ..Default::default()
    };
    let mut body = RigidBody::new(config).unwrap();
    body.apply_force_at_point(DVec3::ZERO, DVec3::X * 5.0).unwrap();

    body.update(1.0 / 60.0);

    assert_eq!(body.linear_velocity(), DVec3::ZERO);
    assert!(body.accumulator().is_clear());
}

#[test]
fn test_unscaled_zero_mass_body() {
    let mut body = RigidBody::default();
    body.apply_force_at_point(DVec3::ZERO, DVec3::X * 5.0).unwrap();

    body.update(0.5);

    // Force is integrated without dividing by mass; gravity * 0 adds nothing
    assert_eq!(body.linear_velocity(), DVec3::X * 2.5);
}
