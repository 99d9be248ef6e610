//! Tick orchestration
//!
//! One call to [`RigidBody::update`] runs the contact pass, adds gravity and
//! integrates the body. A paused body is checked twice per tick: before
//! anything runs and again right after the contact pass, which can pause the
//! body itself when [`PhysicsConfig::pause_on_contact`] is set.
//!
//! [`PhysicsConfig::pause_on_contact`]: crate::config::PhysicsConfig::pause_on_contact

use crate::physics::body::RigidBody;
use crate::physics::collision::{detect_floor_contacts, resolve_contacts, Contact};
use crate::physics::debug::ForceTag;
use crate::physics::integrator::{self, MassParams};
use crate::physics::PhysicsError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Run state of a body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}

/// Where a paused tick stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspensionPoint {
    /// Body was already paused when the tick started
    BeforeStep,
    /// Contact pass ran, gravity and integration were skipped
    AfterContact,
}

/// Result of the last accepted tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Completed,
    Suspended(SuspensionPoint),
}

impl RigidBody {
    /// Advance the body by one tick of length `dt` seconds.
    ///
    /// A negative or non-finite `dt` is logged and ignored; use
    /// [`Self::try_update`] to get the error instead.
    pub fn update(&mut self, dt: f64) {
        if let Err(e) = self.try_update(dt) {
            warn!("Skipping physics tick: {}", e);
        }
    }

    /// Like [`Self::update`], but reports an invalid `dt`
    pub fn try_update(&mut self, dt: f64) -> Result<TickOutcome, PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidArgument(format!(
                "time step must be finite and non-negative, got {dt}"
            )));
        }

        let outcome = self.step(dt);
        self.last_tick = Some(outcome);
        Ok(outcome)
    }

    fn step(&mut self, dt: f64) -> TickOutcome {
        if self.is_paused() {
            trace!("Body paused, skipping tick");
            return TickOutcome::Suspended(SuspensionPoint::BeforeStep);
        }

        self.test_floor_contact();

        if self.is_paused() {
            debug!(
                deepest = self.deepest_penetration,
                "Body paused by floor contact"
            );
            return TickOutcome::Suspended(SuspensionPoint::AfterContact);
        }

        self.accumulator.add_gravity(self.config.gravity, self.mass);

        let params = MassParams {
            mass: self.mass,
            zero_mass: self.config.zero_mass,
        };
        integrator::integrate_linear_velocity(
            &mut self.linear_velocity,
            &mut self.accumulator,
            params,
            dt,
        );
        integrator::integrate_angular_velocity(
            &mut self.angular_velocity,
            &mut self.accumulator,
            params,
            self.shape.is_some(),
            dt,
        );
        integrator::integrate_position(&mut self.pose, self.linear_velocity, dt);
        integrator::integrate_orientation(&mut self.pose, self.angular_velocity);

        trace!(
            position = ?self.pose.position,
            velocity = ?self.linear_velocity,
            angular_velocity = ?self.angular_velocity,
            "Tick completed"
        );
        TickOutcome::Completed
    }

    /// Sample the box corners against the ground and queue impulses for the
    /// ones still moving into it. The impulses reach the velocities on the
    /// next integration pass.
    fn test_floor_contact(&mut self) {
        let Some(corners) = self.shape.as_ref().and_then(|s| s.corners()) else {
            self.deepest_penetration = 0.0;
            return;
        };

        let ground = self.config.ground;
        let report = detect_floor_contacts(
            &self.pose,
            &corners,
            self.linear_velocity,
            self.angular_velocity,
            &ground,
        );
        self.deepest_penetration = report.deepest;

        if !report.is_penetrating() {
            return;
        }
        debug!(
            contacts = report.contacts.len(),
            deepest = report.deepest,
            "Floor contact"
        );

        match self.body_state() {
            Some(state) => {
                let closing: Vec<Contact> = report.closing().copied().collect();
                let impulses = resolve_contacts(
                    &state,
                    &closing,
                    self.config.restitution,
                    self.config.contact_resolution,
                );
                for impulse in impulses {
                    self.force_log.push(
                        impulse.point,
                        impulse.relative_velocity,
                        ForceTag::RELATIVE_VELOCITY,
                    );
                    self.force_log
                        .push(impulse.point, impulse.linear, ForceTag::CONTACT_IMPULSE);
                    self.accumulator.queue_impulse(
                        impulse.linear,
                        impulse.angular,
                        self.config.impulse_integration,
                    );
                }
            }
            None => warn!("Inertia tensor is singular, skipping contact impulses"),
        }

        if self.config.positional_correction {
            self.pose.position -= ground.normal * report.deepest;
            trace!(position = ?self.pose.position, "Pushed body out of the floor");
        }

        if self.config.pause_on_contact {
            self.set_paused(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::physics::components::BoxShape;
    use glam::DVec3;
    use std::sync::Arc;

    const DT: f64 = 1.0 / 60.0;

    fn unit_box(config: PhysicsConfig, z: f64) -> RigidBody {
        let mut body = RigidBody::new(config).unwrap();
        body.set_mass(1.0).unwrap();
        body.set_shape(Some(Arc::new(BoxShape::cube(1.0)))).unwrap();
        body.set_position(DVec3::new(0.0, 0.0, z));
        body
    }

    #[test]
    fn test_gravity_tick() {
        let mut body = unit_box(PhysicsConfig::default(), 10.0);
        body.update(DT);

        assert!((body.linear_velocity().z + 9.8 * DT).abs() < 1e-9);
        assert_eq!(body.last_tick(), Some(TickOutcome::Completed));
        assert!(body.accumulator().is_clear());
    }

    #[test]
    fn test_paused_body_does_nothing() {
        let mut body = unit_box(PhysicsConfig::default(), 10.0);
        body.set_paused(true);
        let before = body.pose();

        body.update(DT);

        assert_eq!(body.pose(), before);
        assert_eq!(body.linear_velocity(), DVec3::ZERO);
        assert_eq!(
            body.last_tick(),
            Some(TickOutcome::Suspended(SuspensionPoint::BeforeStep))
        );
    }

    #[test]
    fn test_contact_pause_skips_integration() {
        let config = PhysicsConfig {
            pause_on_contact: true,
            ..Default::default()
        };
        let mut body = unit_box(config, 0.9);
        body.set_linear_velocity(DVec3::new(0.0, 0.0, -1.0));

        body.update(DT);

        assert!(body.is_paused());
        assert_eq!(
            body.last_tick(),
            Some(TickOutcome::Suspended(SuspensionPoint::AfterContact))
        );
        // Impulse was queued, not integrated
        assert_eq!(body.linear_velocity(), DVec3::new(0.0, 0.0, -1.0));
        assert!(body.accumulator().linear_impulse().z > 0.0);
        assert!((body.deepest_penetration() + 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_dt_is_rejected() {
        let mut body = unit_box(PhysicsConfig::default(), 10.0);
        assert!(matches!(
            body.try_update(f64::NAN),
            Err(PhysicsError::InvalidArgument(_))
        ));
        assert!(body.try_update(-DT).is_err());

        body.update(f64::INFINITY);
        assert_eq!(body.position(), DVec3::new(0.0, 0.0, 10.0));
        assert!(body.last_tick().is_none());
    }

    #[test]
    fn test_positional_correction() {
        let config = PhysicsConfig {
            positional_correction: true,
            gravity: DVec3::ZERO,
            ..Default::default()
        };
        let mut body = unit_box(config, 0.8);

        body.update(0.0);

        assert!((body.position().z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_push_out_by_default() {
        let config = PhysicsConfig {
            gravity: DVec3::ZERO,
            ..Default::default()
        };
        let mut body = unit_box(config, 0.8);

        body.update(DT);

        assert_eq!(body.position(), DVec3::new(0.0, 0.0, 0.8));
        assert!((body.deepest_penetration() + 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_contact_impulses_are_logged() {
        let mut body = unit_box(PhysicsConfig::default(), 0.95);
        body.set_linear_velocity(DVec3::new(0.0, 0.0, -2.0));

        body.update(DT);

        let tags: Vec<ForceTag> = body.force_log().iter().map(|r| r.tag).collect();
        assert_eq!(tags.len(), 8);
        for pair in tags.chunks(2) {
            assert_eq!(pair[0], ForceTag::RELATIVE_VELOCITY);
            assert_eq!(pair[1], ForceTag::CONTACT_IMPULSE);
        }
    }
}
