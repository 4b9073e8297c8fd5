// Host-side tests for pointer normalisation and smoothing.

use flowfield_core::PointerTracker;
use glam::Vec2;

#[test]
fn viewport_corners_map_to_unit_square() {
    assert_eq!(PointerTracker::normalize(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
    assert_eq!(PointerTracker::normalize(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, 1.0));
    assert_eq!(PointerTracker::normalize(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn out_of_viewport_samples_are_clamped() {
    let p = PointerTracker::normalize(-50.0, 9000.0, 800.0, 600.0);
    assert_eq!(p, Vec2::new(-1.0, 1.0));
}

#[test]
fn zero_viewport_maps_to_centre() {
    assert_eq!(PointerTracker::normalize(10.0, 10.0, 0.0, 0.0), Vec2::ZERO);
}

#[test]
fn smoothing_is_geometric() {
    let mut t = PointerTracker::new();
    t.set_raw(Vec2::new(1.0, 0.0));
    let s = t.step();
    assert!((s.x - 0.05).abs() < 1e-6);
    let s = t.step();
    // 1 - 0.95^2
    assert!((s.x - 0.0975).abs() < 1e-6);
}

#[test]
fn converges_without_overshoot() {
    let mut t = PointerTracker::new();
    t.set_raw(Vec2::new(0.8, -0.6));
    let mut prev = t.smoothed();
    for _ in 0..400 {
        let s = t.step();
        assert!(s.x >= prev.x && s.x <= 0.8);
        assert!(s.y <= prev.y && s.y >= -0.6);
        prev = s;
    }
    assert!((prev.x - 0.8).abs() < 1e-4);
    assert!((prev.y + 0.6).abs() < 1e-4);
}

#[test]
fn no_samples_means_no_motion() {
    let mut t = PointerTracker::new();
    for _ in 0..10 {
        let s = t.step();
        assert_eq!((s.x, s.y), (0.0, 0.0));
    }
}

#[test]
fn client_samples_update_the_target() {
    let mut t = PointerTracker::with_smoothing(1.0);
    t.on_client(200.0, 150.0, 800.0, 600.0);
    assert_eq!(t.raw(), Vec2::new(-0.5, -0.5));
    let s = t.step();
    assert_eq!((s.x, s.y), (-0.5, -0.5));
}

#[test]
fn bad_smoothing_falls_back() {
    assert_eq!(PointerTracker::with_smoothing(f32::NAN).smoothing(), 0.05);
    assert_eq!(PointerTracker::with_smoothing(3.0).smoothing(), 1.0);
}
