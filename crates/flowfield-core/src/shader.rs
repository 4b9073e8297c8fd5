//! WGSL generation for the flow field.
//!
//! The program body is embedded from `shaders/flow.wgsl`; the tuning
//! constants it references are emitted from [`crate::constants`] so the GPU
//! program and [`crate::field`] cannot drift apart.

use crate::constants::*;
use std::fmt::Write;

pub static FLOW_WGSL_BODY: &str = include_str!("../shaders/flow.wgsl");

#[inline]
fn lit(v: f32) -> String {
    format!("{v:?}")
}

fn vec2_lit(v: [f32; 2]) -> String {
    format!("vec2<f32>({}, {})", lit(v[0]), lit(v[1]))
}

fn vec3_lit(v: [f32; 3]) -> String {
    format!("vec3<f32>({}, {}, {})", lit(v[0]), lit(v[1]), lit(v[2]))
}

/// `const` declarations for every tunable the shader body references.
pub fn constant_prelude() -> String {
    let scalars: [(&str, f32); 20] = [
        ("HASH_SCALE", HASH_SCALE),
        ("FRACT_MAX", FRACT_MAX),
        ("FBM_BASE_FREQUENCY", FBM_BASE_FREQUENCY),
        ("FBM_BASE_AMPLITUDE", FBM_BASE_AMPLITUDE),
        ("FBM_FREQUENCY_GAIN", FBM_FREQUENCY_GAIN),
        ("FBM_AMPLITUDE_GAIN", FBM_AMPLITUDE_GAIN),
        ("DEPTH_WEIGHT", DEPTH_WEIGHT),
        ("SURFACE_WEIGHT", SURFACE_WEIGHT),
        ("CAUSTIC_WEIGHT", CAUSTIC_WEIGHT),
        ("RIDGE_WEIGHT", RIDGE_WEIGHT),
        ("SHADOW_WEIGHT", SHADOW_WEIGHT),
        ("GLOW_STRENGTH", GLOW_STRENGTH),
        ("GLOW_POINTER_SCALE", GLOW_POINTER_SCALE),
        ("ALPHA_BASE", ALPHA_BASE),
        ("ALPHA_TENDRIL", ALPHA_TENDRIL),
        ("ALPHA_CAUSTIC", ALPHA_CAUSTIC),
        ("ALPHA_GLOW", ALPHA_GLOW),
        ("ALPHA_SURFACE", ALPHA_SURFACE),
        ("ALPHA_MIN", ALPHA_MIN),
        ("ALPHA_MAX", ALPHA_MAX),
    ];
    let colors: [(&str, [f32; 3]); 5] = [
        ("ABYSS", ABYSS),
        ("CERULEAN", CERULEAN),
        ("KELP", KELP),
        ("TENDRIL_TINT", TENDRIL_TINT),
        ("GLOW_TINT", GLOW_TINT),
    ];

    let mut out = String::with_capacity(1024);
    _ = writeln!(out, "// generated from flowfield_core::constants");
    _ = writeln!(out, "const HASH_DOT: vec2<f32> = {};", vec2_lit(HASH_DOT));
    _ = writeln!(out, "const FBM_OCTAVES: u32 = {}u;", FBM_OCTAVES);
    for (name, value) in scalars {
        _ = writeln!(out, "const {name}: f32 = {};", lit(value));
    }
    for (name, value) in colors {
        _ = writeln!(out, "const {name}: vec3<f32> = {};", vec3_lit(value));
    }
    out.push('\n');
    out
}

/// Complete WGSL module: generated constants followed by the program body.
pub fn flow_shader_source() -> String {
    let mut src = constant_prelude();
    src.push_str(FLOW_WGSL_BODY);
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_valid_wgsl_floats() {
        assert_eq!(lit(2.0), "2.0");
        assert_eq!(lit(0.55), "0.55");
        assert_eq!(vec3_lit([0.01, 0.16, 0.22]), "vec3<f32>(0.01, 0.16, 0.22)");
    }
}
