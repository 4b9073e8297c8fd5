// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so its constants module is included directly.

#![allow(dead_code)]
mod web_constants {
    include!("../src/constants.rs");
}

use flowfield_core::constants::*;
use web_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_are_unit_values() {
    for v in [DEFAULT_INTENSITY, DEFAULT_DENSITY, DEFAULT_WOBBLE] {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn alpha_window_is_ordered() {
    assert!(0.0 < ALPHA_MIN && ALPHA_MIN < ALPHA_MAX && ALPHA_MAX <= 1.0);
    // base alpha alone already sits inside the window
    assert!(ALPHA_BASE >= ALPHA_MIN && ALPHA_BASE <= ALPHA_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fract_cap_is_just_below_one() {
    assert!(FRACT_MAX < 1.0);
    assert_eq!(f32::from_bits(FRACT_MAX.to_bits() + 1), 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_and_clock_are_positive() {
    assert!(POINTER_SMOOTHING > 0.0 && POINTER_SMOOTHING <= 1.0);
    assert!(TIME_SCALE > 0.0);
    assert!(MAX_DPR >= 1.0);
    assert!(CPU_CELL_PX >= 1 && CPU_DOWNSCALE >= 1);
}

#[test]
fn canvas_never_intercepts_input() {
    assert!(CANVAS_STYLE.contains("pointer-events:none"));
    assert!(CANVAS_STYLE.contains("position:fixed"));
    assert!(CANVAS_STYLE.contains("z-index:-"));
}

#[test]
fn mount_ids_are_distinct() {
    let ids = [CANVAS_ID, PANEL_MOUNT_ID, INLINE_MOUNT_ID];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(REDUCED_MOTION_QUERY.contains("prefers-reduced-motion"));
}
