use crate::constants::POINTER_SMOOTHING;
use glam::Vec2;

/// Smoothed pointer position in \[-1, 1\]².
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<Vec2> for PointerState {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Exponential-decay tracker: input events write `raw`, each animation frame
/// moves `smoothed` a fixed fraction of the way toward it.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    raw: Vec2,
    smoothed: Vec2,
    smoothing: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::with_smoothing(POINTER_SMOOTHING)
    }

    pub fn with_smoothing(smoothing: f32) -> Self {
        Self {
            raw: Vec2::ZERO,
            smoothed: Vec2::ZERO,
            smoothing: if smoothing.is_finite() {
                smoothing.clamp(0.0, 1.0)
            } else {
                POINTER_SMOOTHING
            },
        }
    }

    /// Map client pixels to \[-1, 1\]². A degenerate viewport maps to the centre.
    #[inline]
    pub fn normalize(client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) -> Vec2 {
        let axis = |c: f32, extent: f32| {
            if extent > 0.0 && c.is_finite() {
                ((c / extent) * 2.0 - 1.0).clamp(-1.0, 1.0)
            } else {
                0.0
            }
        };
        Vec2::new(axis(client_x, viewport_w), axis(client_y, viewport_h))
    }

    #[inline]
    pub fn set_raw(&mut self, target: Vec2) {
        self.raw = target.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Record a raw pointer/touch sample given in client pixels.
    pub fn on_client(&mut self, client_x: f32, client_y: f32, viewport_w: f32, viewport_h: f32) {
        self.set_raw(Self::normalize(client_x, client_y, viewport_w, viewport_h));
    }

    /// Advance one frame and return the new smoothed position.
    pub fn step(&mut self) -> PointerState {
        self.smoothed = self.smoothed.lerp(self.raw, self.smoothing);
        self.smoothed.into()
    }

    #[inline]
    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    #[inline]
    pub fn smoothed(&self) -> PointerState {
        self.smoothed.into()
    }

    #[inline]
    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_corners_and_centre() {
        assert_eq!(PointerTracker::normalize(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
        assert_eq!(PointerTracker::normalize(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
        assert_eq!(PointerTracker::normalize(800.0, 600.0, 800.0, 600.0), Vec2::ONE);
    }

    #[test]
    fn normalize_clamps_outside_viewport_and_handles_zero_size() {
        assert_eq!(PointerTracker::normalize(-50.0, 900.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
        assert_eq!(PointerTracker::normalize(10.0, 10.0, 0.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn single_step_covers_smoothing_fraction() {
        let mut t = PointerTracker::new();
        t.set_raw(Vec2::new(1.0, -1.0));
        let s = t.step();
        assert!((s.x - POINTER_SMOOTHING).abs() < 1e-6);
        assert!((s.y + POINTER_SMOOTHING).abs() < 1e-6);
    }
}
