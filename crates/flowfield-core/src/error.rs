use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("rendering context unavailable: {0}")]
    Unsupported(String),
    #[error("surface has no pixels ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("unknown flow parameter `{0}`")]
    UnknownField(String),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("invalid config value for `{key}`: `{value}`")]
    InvalidConfig { key: String, value: String },
    #[error("surface error: {0}")]
    Surface(String),
}

pub type FlowResult<T> = Result<T, FlowError>;
