use crate::constants::{CPU_CELL_PX, MAX_DPR, POINTER_SMOOTHING, TIME_SCALE};
use crate::error::{FlowError, FlowResult};

/// What to show when no GPU context can be created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackMode {
    /// One still gradient; the frame loop never starts.
    #[default]
    Static,
    /// Keep animating on the CPU at reduced resolution.
    Cpu,
}

/// Per-mount overrides, read from `data-flow-*` attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowConfig {
    pub smoothing: f32,
    pub time_scale: f32,
    pub max_dpr: f32,
    pub fallback: FallbackMode,
    pub cpu_cell: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            smoothing: POINTER_SMOOTHING,
            time_scale: TIME_SCALE,
            max_dpr: MAX_DPR,
            fallback: FallbackMode::Static,
            cpu_cell: CPU_CELL_PX,
        }
    }
}

pub const ATTR_PREFIX: &str = "data-flow-";

fn invalid(key: &str, value: &str) -> FlowError {
    FlowError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_positive(key: &str, value: &str) -> FlowResult<f32> {
    match value.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid(key, value)),
    }
}

impl FlowConfig {
    /// Apply one `key = value` pair. Keys may carry the `data-flow-` prefix.
    pub fn apply(&mut self, key: &str, value: &str) -> FlowResult<()> {
        let key = key.strip_prefix(ATTR_PREFIX).unwrap_or(key);
        match key {
            "smoothing" => {
                let v = parse_positive(key, value)?;
                if v > 1.0 {
                    return Err(invalid(key, value));
                }
                self.smoothing = v;
            }
            "time-scale" => self.time_scale = parse_positive(key, value)?,
            "max-dpr" => self.max_dpr = parse_positive(key, value)?,
            "fallback" => {
                self.fallback = match value.trim() {
                    "static" => FallbackMode::Static,
                    "cpu" => FallbackMode::Cpu,
                    _ => return Err(invalid(key, value)),
                }
            }
            "cpu-cell" => {
                self.cpu_cell = match value.trim().parse::<u32>() {
                    Ok(v) if v > 0 => v,
                    _ => return Err(invalid(key, value)),
                }
            }
            _ => log::debug!("[flow] ignoring unknown config key {key}"),
        }
        Ok(())
    }

    /// Build a config from attribute pairs. Invalid entries keep their
    /// default and are returned alongside so the caller can report them.
    pub fn from_attrs<'a, I>(attrs: I) -> (Self, Vec<FlowError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();
        for (key, value) in attrs {
            if let Err(e) = config.apply(key, value) {
                errors.push(e);
            }
        }
        (config, errors)
    }

    /// Backing-store scale for a device pixel ratio.
    #[inline]
    pub fn effective_dpr(&self, device_pixel_ratio: f64) -> f64 {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.clamp(1.0, self.max_dpr.max(1.0) as f64)
        } else {
            1.0
        }
    }
}
