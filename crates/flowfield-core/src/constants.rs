// Tuning constants shared by the CPU reference field and the generated WGSL.
//
// These are aesthetic values: changing them changes the look of the
// background, not its correctness.

// Parameter defaults
pub const DEFAULT_INTENSITY: f32 = 0.62;
pub const DEFAULT_DENSITY: f32 = 0.48;
pub const DEFAULT_WOBBLE: f32 = 0.35;

// Presets derive density/wobble from intensity with these offsets
pub const PRESET_DENSITY_OFFSET: f32 = 0.08;
pub const PRESET_WOBBLE_OFFSET: f32 = 0.12;

// Pointer tracking
pub const POINTER_SMOOTHING: f32 = 0.05; // fraction of remaining distance covered per frame

// Animation clock: shader time = elapsed seconds * TIME_SCALE
pub const TIME_SCALE: f32 = 0.045;

// Hash
pub const HASH_DOT: [f32; 2] = [127.1, 311.7];
pub const HASH_SCALE: f32 = 43_758.547;
// Largest f32 strictly below 1.0; keeps fract() inside [0, 1)
pub const FRACT_MAX: f32 = 0.999_999_94;

// Fractal sum
pub const FBM_OCTAVES: u32 = 4;
pub const FBM_BASE_FREQUENCY: f32 = 1.6;
pub const FBM_BASE_AMPLITUDE: f32 = 0.55;
pub const FBM_FREQUENCY_GAIN: f32 = 1.9;
pub const FBM_AMPLITUDE_GAIN: f32 = 0.55;

// Palette
pub const ABYSS: [f32; 3] = [0.01, 0.16, 0.22]; // deep ocean
pub const CERULEAN: [f32; 3] = [0.07, 0.55, 0.82]; // light bands
pub const KELP: [f32; 3] = [0.05, 0.32, 0.24]; // green undertone
pub const TENDRIL_TINT: [f32; 3] = [0.06, 0.34, 0.26];
pub const GLOW_TINT: [f32; 3] = [0.14, 0.46, 0.60];

// Layer weights
pub const DEPTH_WEIGHT: f32 = 0.35;
pub const SURFACE_WEIGHT: f32 = 0.4;
pub const CAUSTIC_WEIGHT: f32 = 0.65;
pub const RIDGE_WEIGHT: f32 = 0.1;
pub const SHADOW_WEIGHT: f32 = 0.06;
pub const GLOW_STRENGTH: f32 = 0.34;
pub const GLOW_POINTER_SCALE: f32 = 0.8;

// Alpha composition
pub const ALPHA_BASE: f32 = 0.28;
pub const ALPHA_TENDRIL: f32 = 0.14;
pub const ALPHA_CAUSTIC: f32 = 0.1;
pub const ALPHA_GLOW: f32 = 0.32;
pub const ALPHA_SURFACE: f32 = 0.4;
pub const ALPHA_MIN: f32 = 0.24;
pub const ALPHA_MAX: f32 = 0.62;

// Surface sizing
pub const MAX_DPR: f32 = 1.6;
pub const CPU_CELL_PX: u32 = 4; // grid spacing in fallback-raster pixels
