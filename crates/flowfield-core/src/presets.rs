use crate::constants::{PRESET_DENSITY_OFFSET, PRESET_WOBBLE_OFFSET};
use crate::error::FlowError;
use crate::params::{FlowParameters, ParameterStore};

/// Named shortcut for a target intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub value: f32,
}

pub const PRESETS: [Preset; 3] = [
    Preset {
        label: "Calm",
        value: 0.32,
    },
    Preset {
        label: "Story",
        value: 0.58,
    },
    Preset {
        label: "Storm",
        value: 0.82,
    },
];

impl Preset {
    /// Density and wobble drift upward with intensity so presets feel coupled.
    pub fn parameters(&self) -> FlowParameters {
        FlowParameters {
            intensity: self.value,
            density: (self.value + PRESET_DENSITY_OFFSET).min(1.0),
            wobble: (self.value + PRESET_WOBBLE_OFFSET).min(1.0),
        }
    }

    pub fn apply(&self, store: &ParameterStore) -> FlowParameters {
        log::debug!("[store] preset {} ({:.2})", self.label, self.value);
        store.set_all(self.parameters())
    }
}

pub fn find(label: &str) -> Result<&'static Preset, FlowError> {
    PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
        .ok_or_else(|| FlowError::UnknownPreset(label.to_string()))
}
