//! Impulse-based collision response against a static floor
//!
//! For a contact point `p` with normal `n`, lever arm `r = p - x` and
//! pre-impact point velocity `v_p`, the impulse magnitude is
//!
//! ```text
//! jr = (1 + e) (v_rel · n) / (1/m + ((I⁻¹ (r × n)) × r) · n),   v_rel = -v_p
//! ```
//!
//! and the body receives `Δv = (jr/m) n` and `Δω = jr I⁻¹ (r × n)`. Applied
//! together these leave the contact point with normal velocity `-e (v_p · n)`.
//!
//! This is the textbook `-(1 + e) (v_p · n)` numerator with the sign folded
//! into `v_rel`, and `(r × n)` in place of `(n × r)` so the impulse pushes the
//! body out of the floor rather than further in.

use super::Contact;
use crate::config::ContactResolution;
use glam::{DMat3, DVec3};
use tracing::{trace, warn};

/// Snapshot of the body quantities the resolver needs
#[derive(Debug, Clone, Copy)]
pub struct BodyState {
    pub position: DVec3,
    pub linear_velocity: DVec3,
    pub angular_velocity: DVec3,
    pub inverse_mass: f64,
    /// Inverse of the world-space inertia tensor
    pub inverse_inertia: DMat3,
}

impl BodyState {
    fn velocity_at(&self, point: DVec3, linear: DVec3, angular: DVec3) -> DVec3 {
        angular.cross(point - self.position) + linear
    }
}

/// Velocity change produced by one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactImpulse {
    pub point: DVec3,
    pub normal: DVec3,
    /// Impulse magnitude `jr`
    pub magnitude: f64,
    /// Pre-impact relative velocity of the floor with respect to the point
    pub relative_velocity: DVec3,
    /// Linear velocity delta `(jr/m) n`
    pub linear: DVec3,
    /// Angular velocity delta `jr I⁻¹ (r × n)`
    pub angular: DVec3,
}

/// Per-contact quantities that do not change while solving
#[derive(Debug, Clone, Copy)]
struct ContactRow {
    point: DVec3,
    normal: DVec3,
    r: DVec3,
    /// `I⁻¹ (r × n)`
    angular_axis: DVec3,
    /// `1/m + ((I⁻¹ (r × n)) × r) · n`
    denominator: f64,
}

impl ContactRow {
    fn new(body: &BodyState, point: DVec3, normal: DVec3) -> Option<Self> {
        let r = point - body.position;
        let angular_axis = body.inverse_inertia * r.cross(normal);
        let denominator = body.inverse_mass + angular_axis.cross(r).dot(normal);

        if !denominator.is_finite() || denominator.abs() < 1e-12 {
            warn!(?point, denominator, "Degenerate contact denominator, skipping impulse");
            return None;
        }

        Some(Self {
            point,
            normal,
            r,
            angular_axis,
            denominator,
        })
    }

    fn impulse(&self, body: &BodyState, magnitude: f64, relative_velocity: DVec3) -> ContactImpulse {
        ContactImpulse {
            point: self.point,
            normal: self.normal,
            magnitude,
            relative_velocity,
            linear: self.normal * (magnitude * body.inverse_mass),
            angular: self.angular_axis * magnitude,
        }
    }
}

/// Impulse for a single contact, `None` when the point is separating or the
/// contact is degenerate
pub fn resolve_contact(
    body: &BodyState,
    point: DVec3,
    normal: DVec3,
    restitution: f64,
) -> Option<ContactImpulse> {
    let point_velocity = body.velocity_at(point, body.linear_velocity, body.angular_velocity);
    if point_velocity.dot(normal) >= 0.0 {
        return None;
    }

    let relative_velocity = -point_velocity;
    let row = ContactRow::new(body, point, normal)?;
    let numerator = (1.0 + restitution) * relative_velocity.dot(normal);
    let magnitude = numerator / row.denominator;

    trace!(?point, magnitude, "Resolved contact impulse");
    Some(row.impulse(body, magnitude, relative_velocity))
}

/// Impulses for every closing contact of one tick.
///
/// `Sequential` resolves each contact independently from the same
/// pre-contact velocities, so simultaneous contacts add up uncoupled.
/// `Iterative` runs projected Gauss-Seidel: each pass re-reads the velocities
/// already corrected by the other contacts and keeps every accumulated impulse
/// non-negative.
pub fn resolve_contacts(
    body: &BodyState,
    contacts: &[Contact],
    restitution: f64,
    strategy: ContactResolution,
) -> Vec<ContactImpulse> {
    match strategy {
        ContactResolution::Sequential => contacts
            .iter()
            .filter_map(|c| resolve_contact(body, c.point, c.normal, restitution))
            .collect(),
        ContactResolution::Iterative { iterations } => {
            solve_iterative(body, contacts, restitution, iterations)
        }
    }
}

fn solve_iterative(
    body: &BodyState,
    contacts: &[Contact],
    restitution: f64,
    iterations: u32,
) -> Vec<ContactImpulse> {
    struct Row {
        row: ContactRow,
        target: f64,
        accumulated: f64,
        relative_velocity: DVec3,
    }

    let mut rows: Vec<Row> = contacts
        .iter()
        .filter_map(|c| {
            let point_velocity =
                body.velocity_at(c.point, body.linear_velocity, body.angular_velocity);
            let normal_velocity = point_velocity.dot(c.normal);
            if normal_velocity >= 0.0 {
                return None;
            }
            ContactRow::new(body, c.point, c.normal).map(|row| Row {
                row,
                target: -restitution * normal_velocity,
                accumulated: 0.0,
                relative_velocity: -point_velocity,
            })
        })
        .collect();

    let mut linear = body.linear_velocity;
    let mut angular = body.angular_velocity;

    for _ in 0..iterations {
        for r in rows.iter_mut() {
            let normal_velocity = (angular.cross(r.row.r) + linear).dot(r.row.normal);
            let delta = (r.target - normal_velocity) / r.row.denominator;
            let accumulated = (r.accumulated + delta).max(0.0);
            let applied = accumulated - r.accumulated;
            r.accumulated = accumulated;

            linear += r.row.normal * (applied * body.inverse_mass);
            angular += r.row.angular_axis * applied;
        }
    }

    rows.iter()
        .map(|r| r.row.impulse(body, r.accumulated, r.relative_velocity))
        .collect()
}
