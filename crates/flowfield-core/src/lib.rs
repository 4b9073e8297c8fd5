pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod field;
pub mod gradient;
pub mod lifecycle;
pub mod params;
pub mod pointer;
pub mod presets;
pub mod raster;
pub mod shader;
pub mod uniforms;

pub use config::{FallbackMode, FlowConfig};
pub use controls::{
    ControlBinding, ControlLayout, ControlView, Disclosure, Precision, SliderSpec, INLINE_LAYOUT,
    PANEL_LAYOUT,
};
pub use error::{FlowError, FlowResult};
pub use field::{FieldLayers, FieldSample};
pub use lifecycle::{
    FlowRenderer, FrameSurface, PageHide, RenderHost, RendererState, StaticReason,
};
pub use params::{FlowField, FlowParameters, ParameterStore, Subscription};
pub use pointer::{PointerState, PointerTracker};
pub use presets::{Preset, PRESETS};
pub use raster::Raster;
pub use uniforms::FlowUniforms;
