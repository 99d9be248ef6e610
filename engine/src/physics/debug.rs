//! Diagnostic force log
//!
//! A bounded record of the forces, torque responses and contact impulses the
//! body has seen, kept for external visualization. The physics never reads it
//! back.

use glam::{DVec3, Vec4};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of records kept; the oldest is evicted first
pub const FORCE_LOG_CAPACITY: usize = 200;

/// Visualization tag attached to a record. Opaque to the physics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForceTag(pub Vec4);

impl ForceTag {
    /// Externally applied force
    pub const APPLIED_FORCE: Self = Self(Vec4::new(1.0, 0.0, 1.0, 1.0)); // Magenta
    /// Angular response to an applied force
    pub const APPLIED_TORQUE: Self = Self(Vec4::new(0.0, 1.0, 1.0, 1.0)); // Cyan
    /// Relative velocity at a contact before the impulse
    pub const RELATIVE_VELOCITY: Self = Self(Vec4::new(1.0, 1.0, 0.0, 1.0)); // Yellow
    /// Linear response of a contact impulse
    pub const CONTACT_IMPULSE: Self = Self(Vec4::new(0.0, 0.0, 1.0, 1.0)); // Blue

    /// RGBA colour of the tag
    pub fn color(&self) -> Vec4 {
        self.0
    }
}

/// One logged vector anchored at a world-space point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForceRecord {
    pub point: DVec3,
    pub vector: DVec3,
    pub tag: ForceTag,
}

/// Fixed-capacity FIFO of [`ForceRecord`]s
#[derive(Debug, Clone)]
pub struct ForceLog {
    records: VecDeque<ForceRecord>,
}

impl Default for ForceLog {
    fn default() -> Self {
        Self {
            records: VecDeque::with_capacity(FORCE_LOG_CAPACITY),
        }
    }
}

impl ForceLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest one when full
    pub fn push(&mut self, point: DVec3, vector: DVec3, tag: ForceTag) {
        if self.records.len() == FORCE_LOG_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(ForceRecord { point, vector, tag });
    }

    /// Records from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &ForceRecord> {
        self.records.iter()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Oldest record still held
    pub fn oldest(&self) -> Option<&ForceRecord> {
        self.records.front()
    }

    /// Most recent record
    pub fn newest(&self) -> Option<&ForceRecord> {
        self.records.back()
    }

    /// Copy the records out, oldest first
    pub fn to_vec(&self) -> Vec<ForceRecord> {
        self.records.iter().copied().collect()
    }

    /// Remove every record
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = ForceLog::new();
        for i in 0..(FORCE_LOG_CAPACITY + 50) {
            log.push(DVec3::new(i as f64, 0.0, 0.0), DVec3::Z, ForceTag::APPLIED_FORCE);
            assert!(log.len() <= FORCE_LOG_CAPACITY);
        }
        assert_eq!(log.len(), FORCE_LOG_CAPACITY);
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut log = ForceLog::new();
        for i in 0..(FORCE_LOG_CAPACITY + 10) {
            log.push(DVec3::new(i as f64, 0.0, 0.0), DVec3::Z, ForceTag::APPLIED_FORCE);
        }
        assert_eq!(log.oldest().unwrap().point.x, 10.0);
        assert_eq!(
            log.newest().unwrap().point.x,
            (FORCE_LOG_CAPACITY + 9) as f64
        );

        let xs: Vec<f64> = log.iter().map(|r| r.point.x).collect();
        assert!(xs.windows(2).all(|w| w[1] == w[0] + 1.0));
    }

    #[test]
    fn test_tags_are_kept() {
        let mut log = ForceLog::new();
        log.push(DVec3::ZERO, DVec3::X, ForceTag::CONTACT_IMPULSE);
        let custom = ForceTag(Vec4::new(0.5, 0.5, 0.5, 1.0));
        log.push(DVec3::ZERO, DVec3::Y, custom);

        let records = log.to_vec();
        assert_eq!(records[0].tag, ForceTag::CONTACT_IMPULSE);
        assert_eq!(records[1].tag.color(), Vec4::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_clear() {
        let mut log = ForceLog::new();
        log.push(DVec3::ZERO, DVec3::X, ForceTag::APPLIED_FORCE);
        log.clear();
        assert!(log.is_empty());
    }
}
