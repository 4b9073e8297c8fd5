use crate::params::FlowParameters;
use crate::pointer::PointerState;

/// Per-frame values submitted to the flow shader.
///
/// Layout matches `struct FlowUniforms` in `shaders/flow.wgsl` (32 bytes, no
/// implicit padding).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlowUniforms {
    pub pointer: [f32; 2],
    pub time: f32,
    pub intensity: f32,
    pub density: f32,
    pub wobble: f32,
    pub resolution: [f32; 2],
}

impl FlowUniforms {
    /// `t` is the animation clock already scaled (elapsed seconds × time scale).
    pub fn new(
        t: f32,
        pointer: PointerState,
        params: FlowParameters,
        resolution: [u32; 2],
    ) -> Self {
        Self {
            pointer: pointer.to_array(),
            time: t.max(0.0),
            intensity: params.intensity,
            density: params.density,
            wobble: params.wobble,
            resolution: [resolution[0] as f32, resolution[1] as f32],
        }
    }

    #[inline]
    pub fn params(&self) -> FlowParameters {
        FlowParameters {
            intensity: self.intensity,
            density: self.density,
            wobble: self.wobble,
        }
    }
}
