// Host-side tests for the CPU reference field, the generated WGSL and the
// uniform block layout.

use flowfield_core::constants::*;
use flowfield_core::field::{compose, fbm, hash, sample, value_noise};
use flowfield_core::raster::pixel_uv;
use flowfield_core::shader::{constant_prelude, flow_shader_source};
use flowfield_core::{FlowParameters, FlowUniforms, PointerState, Raster};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_params(rng: &mut StdRng) -> FlowParameters {
    FlowParameters::new(rng.gen(), rng.gen(), rng.gen())
}

#[test]
fn hash_stays_in_unit_interval() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
        let p = Vec2::new(rng.gen_range(-1e4..1e4), rng.gen_range(-1e4..1e4));
        let h = hash(p);
        assert!((0.0..1.0).contains(&h), "hash({p}) = {h}");
    }
    for p in [
        Vec2::new(f32::NAN, 0.0),
        Vec2::new(f32::INFINITY, 1.0),
        Vec2::new(f32::MAX, f32::MIN),
    ] {
        let h = hash(p);
        assert!((0.0..1.0).contains(&h), "hash({p}) = {h}");
    }
}

#[test]
fn hash_is_deterministic() {
    let p = Vec2::new(3.25, -17.5);
    assert_eq!(hash(p), hash(p));
    assert_ne!(hash(p), hash(p + Vec2::X));
}

#[test]
fn noise_and_fbm_are_bounded() {
    let amplitude_sum: f32 = (0..FBM_OCTAVES)
        .map(|i| FBM_BASE_AMPLITUDE * FBM_AMPLITUDE_GAIN.powi(i as i32))
        .sum();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2_000 {
        let p = Vec2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let n = value_noise(p);
        assert!((0.0..=1.0).contains(&n));
        let f = fbm(p);
        assert!(f >= 0.0 && f <= amplitude_sum + 1e-5);
    }
}

#[test]
fn composed_alpha_respects_clamp() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..2_000 {
        let uv = Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0));
        let pointer = PointerState {
            x: rng.gen_range(-1.0..=1.0),
            y: rng.gen_range(-1.0..=1.0),
        };
        let t = rng.gen_range(0.0..500.0);
        let s = compose(uv, t, pointer, &random_params(&mut rng));
        assert!(s.alpha >= ALPHA_MIN && s.alpha <= ALPHA_MAX);
        assert!(s.rgb.is_finite());
    }
}

#[test]
fn glow_follows_the_pointer() {
    let params = FlowParameters::default();
    let pointer = PointerState { x: 0.5, y: 0.5 };
    let near = flowfield_core::FieldLayers::evaluate(
        Vec2::splat(0.5 * GLOW_POINTER_SCALE),
        1.0,
        Vec2::new(pointer.x, pointer.y),
        &params,
    );
    let far = flowfield_core::FieldLayers::evaluate(
        Vec2::new(-1.0, -1.0),
        1.0,
        Vec2::new(pointer.x, pointer.y),
        &params,
    );
    assert!((near.glow - GLOW_STRENGTH).abs() < 1e-6);
    assert!(far.glow < near.glow);
}

#[test]
fn sample_uses_the_frame_clock_as_is() {
    let params = FlowParameters::new(0.4, 0.6, 0.2);
    let pointer = PointerState { x: -0.3, y: 0.1 };
    let frame = FlowUniforms::new(2.5, pointer, params, [64, 64]);
    let uv = Vec2::new(0.25, -0.4);
    assert_eq!(sample(uv, &frame), compose(uv, 2.5, pointer, &params));
}

#[test]
fn uniform_block_is_32_bytes() {
    assert_eq!(std::mem::size_of::<FlowUniforms>(), 32);
    let u = FlowUniforms::new(
        1.5,
        PointerState { x: 0.25, y: -0.5 },
        FlowParameters::new(0.1, 0.2, 0.3),
        [640, 480],
    );
    let floats: [f32; 8] = bytemuck::cast(u);
    assert_eq!(floats, [0.25, -0.5, 1.5, 0.1, 0.2, 0.3, 640.0, 480.0]);
}

#[test]
fn shader_declares_every_tunable() {
    let prelude = constant_prelude();
    for name in [
        "HASH_DOT",
        "HASH_SCALE",
        "FRACT_MAX",
        "FBM_OCTAVES",
        "ABYSS",
        "CERULEAN",
        "KELP",
        "ALPHA_MIN",
        "ALPHA_MAX",
        "GLOW_STRENGTH",
    ] {
        assert!(prelude.contains(&format!("const {name}:")), "missing {name}");
    }
    let src = flow_shader_source();
    assert!(src.starts_with(&prelude));
    assert!(src.contains("fn vs_fullscreen"));
    assert!(src.contains("fn fs_flow"));
}

#[test]
fn shader_literals_are_float_typed() {
    let prelude = constant_prelude();
    assert!(prelude.contains("const FBM_OCTAVES: u32 = 4u;"));
    assert!(prelude.contains("const SURFACE_WEIGHT: f32 = 0.4"));
}

#[test]
fn coarse_raster_with_unit_cell_matches_exact_field() {
    let frame = FlowUniforms::new(
        3.0,
        PointerState { x: 0.2, y: 0.7 },
        FlowParameters::default(),
        [16, 9],
    );
    let mut raster = Raster::new(16, 9).expect("raster");
    raster.render_field_coarse(&frame, 1);
    for y in 0..9 {
        for x in 0..16 {
            let want = sample(pixel_uv(x as f32, y as f32, 16, 9), &frame).to_rgba8();
            assert_eq!(raster.pixel(x, y), want, "pixel {x},{y}");
        }
    }
}

#[test]
fn coarse_raster_keeps_alpha_bounds() {
    let frame = FlowUniforms::new(
        9.0,
        PointerState { x: -0.6, y: 0.1 },
        FlowParameters::new(0.9, 0.8, 0.7),
        [50, 30],
    );
    let mut raster = Raster::new(50, 30).expect("raster");
    raster.render_field_coarse(&frame, 4);
    let lo = (ALPHA_MIN * 255.0).floor() as u8;
    let hi = (ALPHA_MAX * 255.0).ceil() as u8;
    for px in raster.as_rgba().chunks_exact(4) {
        assert!(px[3] >= lo && px[3] <= hi);
    }
}
