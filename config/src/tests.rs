//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PROJECTION TESTS
// =============================================================================

#[test]
fn test_rotation_is_quarter_turn() {
    assert!((ROTATION - std::f64::consts::PI / 4.0).abs() < 1e-15);
}

#[test]
fn test_extrusion_factor_matches_classic_proportions() {
    assert_eq!(EXTRUSION_FACTOR, 2.0);
}

// =============================================================================
// TUBE TESTS
// =============================================================================

#[test]
fn test_plane_cuts_inside_tube() {
    assert!(
        PLANE_POSITION > 0.0 && PLANE_POSITION < TUBE_EXTRUSION,
        "cross plane must lie between the contour and the tube bottom"
    );
}

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_tolerances_are_ordered() {
    assert!(WELD_EPSILON < PLANE_EPSILON);
    assert!(PLANE_EPSILON < SMALL_DISTANCE);
}

#[test]
fn test_merge_factor_is_small() {
    assert!(MERGE_FACTOR > 0.0 && MERGE_FACTOR < 0.1);
}

#[test]
fn test_origin_is_zero() {
    assert_eq!(ORIGIN, [0.0, 0.0, 0.0]);
}

#[test]
fn test_approx_equal_uses_small_distance() {
    assert!(approx_equal(0.0, SMALL_DISTANCE * 0.5));
    assert!(!approx_equal(0.0, SMALL_DISTANCE * 2.0));
}
