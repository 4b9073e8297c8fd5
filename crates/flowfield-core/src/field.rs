//! CPU reference of the ocean flow field.
//!
//! Every function here mirrors a function of the same name in
//! `shaders/flow.wgsl`; [`crate::shader::flow_shader_source`] feeds both from
//! [`crate::constants`]. The field is pure and per-pixel: no state crosses
//! pixels or frames.

use crate::constants::*;
use crate::params::FlowParameters;
use crate::pointer::PointerState;
use crate::uniforms::FlowUniforms;
use glam::{Vec2, Vec3};

#[inline]
fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    if f.is_nan() {
        0.0
    } else {
        f.min(FRACT_MAX)
    }
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Deterministic pseudo-random scalar in \[0, 1) for any input, including
/// non-finite coordinates.
#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(Vec2::from(HASH_DOT)).sin() * HASH_SCALE)
}

/// Lattice value noise with C¹ (`3u² - 2u³`) blending.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let a = hash(i);
    let b = hash(i + Vec2::X);
    let c = hash(i + Vec2::Y);
    let d = hash(i + Vec2::ONE);
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Fractal sum of [`value_noise`] over [`FBM_OCTAVES`] octaves.
pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0;
    let mut amplitude = FBM_BASE_AMPLITUDE;
    for _ in 0..FBM_OCTAVES {
        value += amplitude * value_noise(p * FBM_BASE_FREQUENCY);
        p *= FBM_FREQUENCY_GAIN;
        amplitude *= FBM_AMPLITUDE_GAIN;
    }
    value
}

/// Slow two-axis undulation, independent of noise.
#[inline]
pub fn swell(p: Vec2, t: f32) -> f32 {
    (p.y * 2.6 + t * 1.4).sin() * 0.08 + (p.x * 1.4 + t * 0.9).sin() * 0.05
}

/// Per-layer contributions before colour composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldLayers {
    pub depth: f32,
    pub ridges: f32,
    pub caustics: f32,
    pub tendrils: f32,
    pub shadow: f32,
    pub glow: f32,
    pub surface: f32,
}

impl FieldLayers {
    /// `uv` in \[-1, 1\]², `t` already multiplied by [`TIME_SCALE`].
    pub fn evaluate(uv: Vec2, t: f32, pointer: Vec2, params: &FlowParameters) -> Self {
        let FlowParameters {
            intensity,
            density,
            wobble,
        } = *params;

        let depth = smoothstep(-1.0, 1.0, uv.y);

        let ridge_uv = uv * Vec2::new(1.8 + density, 1.2);
        let ridges = fbm(ridge_uv + Vec2::new(0.0, t * 0.6));

        let caustic_uv = uv * (3.0 + density * 2.0);
        let band = ((caustic_uv.x + caustic_uv.y * 0.6) * 3.0 + t * 3.5).sin();
        let caustics = smoothstep(0.4, 0.9, band * 0.5 + 0.5);

        let flow_uv = uv * (2.0 + density * 2.0) + pointer * (0.4 + wobble * 0.6);
        let flow = fbm(flow_uv + Vec2::new(t * 0.9, -t * 0.55));
        let filament = (fract(flow * (3.0 + density * 1.6)) - 0.5).abs();
        let tendrils = smoothstep(0.35 - intensity * 0.18, 0.05, filament);

        let shadow = 0.35 + 0.25 * (t * 1.2).sin();

        let falloff = 1.6 + (1.0 - intensity);
        let glow = (-(uv - pointer * GLOW_POINTER_SCALE).length() * falloff).exp() * GLOW_STRENGTH;

        let surface = swell(uv * (1.4 + density), t);

        Self {
            depth,
            ridges,
            caustics,
            tendrils,
            shadow,
            glow,
            surface,
        }
    }

    pub fn shade(&self) -> FieldSample {
        let abyss = Vec3::from(ABYSS);
        let kelp = Vec3::from(KELP);
        let cerulean = Vec3::from(CERULEAN);

        let mut color = abyss.lerp(kelp, self.depth * DEPTH_WEIGHT + self.surface * SURFACE_WEIGHT);
        color = color.lerp(cerulean, self.caustics * CAUSTIC_WEIGHT);
        color += self.tendrils * Vec3::from(TENDRIL_TINT);
        color += Vec3::splat(self.ridges * RIDGE_WEIGHT);
        color -= Vec3::splat(self.shadow * SHADOW_WEIGHT);
        color += self.glow * Vec3::from(GLOW_TINT);

        let alpha = ALPHA_BASE
            + self.tendrils * ALPHA_TENDRIL
            + self.caustics * ALPHA_CAUSTIC
            + self.glow * ALPHA_GLOW
            + self.surface * ALPHA_SURFACE;

        FieldSample {
            rgb: color,
            alpha: alpha.clamp(ALPHA_MIN, ALPHA_MAX),
        }
    }
}

/// One colour + alpha sample of the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    pub rgb: Vec3,
    pub alpha: f32,
}

impl FieldSample {
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.rgb.x, self.rgb.y, self.rgb.z, self.alpha]
    }

    /// Straight (non-premultiplied) 8-bit RGBA, as `ImageData` expects.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.rgb.x), q(self.rgb.y), q(self.rgb.z), q(self.alpha)]
    }
}

/// Evaluate the field at `uv` for scaled time `t`.
#[inline]
pub fn compose(uv: Vec2, t: f32, pointer: PointerState, params: &FlowParameters) -> FieldSample {
    FieldLayers::evaluate(uv, t, Vec2::new(pointer.x, pointer.y), params).shade()
}

/// Evaluate the field at `uv` for one frame's uniforms.
#[inline]
pub fn sample(uv: Vec2, frame: &FlowUniforms) -> FieldSample {
    FieldLayers::evaluate(uv, frame.time, Vec2::from(frame.pointer), &frame.params()).shade()
}
