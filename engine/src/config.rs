//! Configuration types for the physics core

use crate::physics::collision::GroundPlane;
use crate::physics::PhysicsError;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Coefficient of restitution used for floor contacts
pub const DEFAULT_RESTITUTION: f64 = 0.25;

/// Standard gravity along -Z
pub const DEFAULT_GRAVITY: DVec3 = DVec3::new(0.0, 0.0, -9.8);

/// How queued contact impulses reach the velocities
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImpulseIntegration {
    /// Impulses wait in their own buffers and are added unscaled on the next
    /// integration pass
    #[default]
    DeltaVelocity,
    /// Impulses share the force/torque accumulators and are scaled by
    /// `dt / mass` together with ordinary forces
    SharedAccumulator,
}

/// How the contacts found in one tick are turned into impulses
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContactResolution {
    /// Every closing corner gets an independent impulse computed from the
    /// pre-contact velocities
    #[default]
    Sequential,
    /// Projected Gauss-Seidel over all contacts of the tick
    Iterative { iterations: u32 },
}

/// Meaning of `mass == 0`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ZeroMassPolicy {
    /// Forces are integrated without dividing by mass
    #[default]
    Unscaled,
    /// Forces and impulses are discarded; velocities only change when set
    Immovable,
}

/// Configuration for a simulated body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration, multiplied by mass every tick
    pub gravity: DVec3,
    /// Coefficient of restitution for floor impacts
    pub restitution: f64,
    /// Static floor the body collides with
    pub ground: GroundPlane,
    /// Suspend the body as soon as a corner penetrates the floor
    pub pause_on_contact: bool,
    /// Push the body out of the floor by the deepest penetration
    pub positional_correction: bool,
    /// Delivery of contact impulses
    pub impulse_integration: ImpulseIntegration,
    /// Multi-contact strategy
    pub contact_resolution: ContactResolution,
    /// Zero-mass semantics
    pub zero_mass: ZeroMassPolicy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            restitution: DEFAULT_RESTITUTION,
            ground: GroundPlane::default(),
            pause_on_contact: false,
            positional_correction: false,
            impulse_integration: ImpulseIntegration::default(),
            contact_resolution: ContactResolution::default(),
            zero_mass: ZeroMassPolicy::default(),
        }
    }
}

impl PhysicsConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, PhysicsError> {
        let config: PhysicsConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Load a configuration from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PhysicsError> {
        let path = path.as_ref();
        debug!(path = ?path, "Loading physics config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }

        if !self.restitution.is_finite() || !(0.0..=1.0).contains(&self.restitution) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "restitution must lie in [0, 1], got {}",
                self.restitution
            )));
        }

        if !self.ground.point.is_finite() || !self.ground.normal.is_finite() {
            return Err(PhysicsError::InvalidConfiguration(
                "ground plane must be finite".to_string(),
            ));
        }

        if self.ground.normal.length_squared() < 1e-12 {
            return Err(PhysicsError::InvalidConfiguration(
                "ground plane normal must be non-zero".to_string(),
            ));
        }

        if let ContactResolution::Iterative { iterations: 0 } = self.contact_resolution {
            return Err(PhysicsError::InvalidConfiguration(
                "iterative contact resolution needs at least one iteration".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate and normalize the ground normal
    pub fn validated(mut self) -> Result<Self, PhysicsError> {
        self.validate()?;
        self.ground.normal = self.ground.normal.normalize();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, DVec3::new(0.0, 0.0, -9.8));
        assert_eq!(config.restitution, 0.25);
        assert_eq!(config.ground.normal, DVec3::Z);
        assert!(!config.pause_on_contact);
        assert_eq!(config.contact_resolution, ContactResolution::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PhysicsConfig::from_json_str(r#"{ "restitution": 0.5 }"#).unwrap();
        assert_eq!(config.restitution, 0.5);
        assert_eq!(config.gravity, DEFAULT_GRAVITY);
        assert_eq!(config.zero_mass, ZeroMassPolicy::Unscaled);
    }

    #[test]
    fn test_ground_normal_is_normalized() {
        let json = r#"{ "ground": { "point": [0.0, 0.0, 1.0], "normal": [0.0, 0.0, 4.0] } }"#;
        let config = PhysicsConfig::from_json_str(json).unwrap();
        assert_eq!(config.ground.normal, DVec3::Z);
        assert_eq!(config.ground.point, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rejects_bad_restitution() {
        let config = PhysicsConfig {
            restitution: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PhysicsError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_zero_normal() {
        let mut config = PhysicsConfig::default();
        config.ground.normal = DVec3::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = PhysicsConfig {
            contact_resolution: ContactResolution::Iterative { iterations: 0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PhysicsConfig::from_json_str("{ not json"),
            Err(PhysicsError::Json(_))
        ));
    }
}
