//! Footprint collision tests and field-boundary helpers
//!
//! Every entity carries a circular collision footprint whose radius already
//! includes any per-tier size scaling, so overlap is a radius-aware test
//! rather than a bare center-distance comparison.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// True when two scaled circular footprints overlap
#[inline]
pub fn footprints_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    pos_a.distance_squared(pos_b) < reach * reach
}

/// Clamp a footprint center so the whole footprint stays on the field
pub fn clamp_to_field(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, FIELD_WIDTH - radius),
        pos.y.clamp(radius, FIELD_HEIGHT - radius),
    )
}

/// True when a footprint has fully left the field in any direction
pub fn off_field(pos: Vec2, radius: f32) -> bool {
    pos.y + radius < 0.0
        || pos.y - radius > FIELD_HEIGHT
        || pos.x + radius < 0.0
        || pos.x - radius > FIELD_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_accounts_for_both_radii() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 0.0);
        // Centers 30 apart: 10+10 misses, 20+15 overlaps
        assert!(!footprints_overlap(a, 10.0, b, 10.0));
        assert!(footprints_overlap(a, 20.0, b, 15.0));
    }

    #[test]
    fn size_scale_changes_outcome_at_same_distance() {
        let player = Vec2::new(100.0, 100.0);
        let obstacle = Vec2::new(100.0, 145.0);
        let base = 22.0;
        let obstacle_r = 18.0;
        // A weak size gene (1.3x footprint) is clipped where a strong one
        // (0.7x) slips past
        assert!(footprints_overlap(player, base * 1.3, obstacle, obstacle_r));
        assert!(!footprints_overlap(player, base * 0.7, obstacle, obstacle_r));
    }

    #[test]
    fn touching_exactly_is_not_overlap() {
        let a = Vec2::ZERO;
        let b = Vec2::new(20.0, 0.0);
        assert!(!footprints_overlap(a, 10.0, b, 10.0));
    }

    #[test]
    fn clamp_keeps_footprint_inside() {
        let clamped = clamp_to_field(Vec2::new(-50.0, 10_000.0), 22.0);
        assert_eq!(clamped.x, 22.0);
        assert_eq!(clamped.y, FIELD_HEIGHT - 22.0);
    }

    #[test]
    fn off_field_below_and_above() {
        assert!(off_field(Vec2::new(100.0, FIELD_HEIGHT + 30.0), 18.0));
        assert!(off_field(Vec2::new(100.0, -30.0), 5.0));
        assert!(!off_field(Vec2::new(100.0, FIELD_HEIGHT - 1.0), 18.0));
    }
}
