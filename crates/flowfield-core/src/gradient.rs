//! Low-motion still image shown instead of the animated field.

/// Soft radial spot fading to transparent at `extent` × farthest-corner distance.
#[derive(Clone, Copy, Debug)]
pub struct RadialLayer {
    pub center: [f32; 2],
    pub rgba: [f32; 4],
    pub extent: f32,
}

/// Top-to-bottom layers, topmost first.
pub const STATIC_RADIALS: [RadialLayer; 2] = [
    RadialLayer {
        center: [0.20, 0.20],
        rgba: [12.0 / 255.0, 61.0 / 255.0, 44.0 / 255.0, 0.08],
        extent: 0.32,
    },
    RadialLayer {
        center: [0.82, 0.25],
        rgba: [15.0 / 255.0, 142.0 / 255.0, 199.0 / 255.0, 0.12],
        extent: 0.36,
    },
];

/// Vertical wash beneath the spots: (top, bottom).
pub const STATIC_WASH: ([f32; 4], [f32; 4]) = ([1.0, 1.0, 1.0, 0.8], [1.0, 1.0, 1.0, 0.6]);

/// The same image as a CSS `background`, for hosts without a 2D context.
pub const STATIC_GRADIENT_CSS: &str = "radial-gradient(circle at 20% 20%, rgba(12,61,44,0.08), transparent 32%), \
     radial-gradient(circle at 82% 25%, rgba(15,142,199,0.12), transparent 36%), \
     linear-gradient(180deg, rgba(255,255,255,0.8), rgba(255,255,255,0.6))";

fn farthest_corner(c: [f32; 2]) -> f32 {
    let dx = c[0].max(1.0 - c[0]);
    let dy = c[1].max(1.0 - c[1]);
    (dx * dx + dy * dy).sqrt()
}

// straight-alpha source-over
fn over(src: [f32; 4], dst: [f32; 4]) -> [f32; 4] {
    let a = src[3] + dst[3] * (1.0 - src[3]);
    if a <= 0.0 {
        return [0.0; 4];
    }
    let ch = |i: usize| (src[i] * src[3] + dst[i] * dst[3] * (1.0 - src[3])) / a;
    [ch(0), ch(1), ch(2), a]
}

/// Straight-alpha RGBA at `(u, v)` in \[0, 1\]², `v` growing downward.
pub fn static_gradient(u: f32, v: f32) -> [f32; 4] {
    let v = v.clamp(0.0, 1.0);
    let (top, bottom) = STATIC_WASH;
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = top[i] + (bottom[i] - top[i]) * v;
    }
    for layer in STATIC_RADIALS.iter().rev() {
        let dx = u - layer.center[0];
        let dy = v - layer.center[1];
        let r = (dx * dx + dy * dy).sqrt() / (layer.extent * farthest_corner(layer.center));
        let fade = (1.0 - r).clamp(0.0, 1.0);
        if fade > 0.0 {
            let mut src = layer.rgba;
            src[3] *= fade;
            out = over(src, out);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wash_dominates_far_from_spots() {
        let px = static_gradient(0.5, 1.0);
        assert!((px[3] - 0.6).abs() < 1e-5);
        assert!(px[0] > 0.99);
    }

    #[test]
    fn spot_tints_toward_green_at_its_centre() {
        let px = static_gradient(0.2, 0.2);
        assert!(px[0] < 1.0 && px[1] < 1.0);
        assert!(px[1] > px[0]);
        assert!(px[3] > 0.75);
    }
}
