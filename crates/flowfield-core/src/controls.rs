//! Framework-agnostic model of the slider widgets.
//!
//! A widget is a [`ControlLayout`] bound to the shared [`ParameterStore`]
//! through a [`ControlBinding`]. Writes go through the store's clamped
//! setters; every widget re-renders from store notifications, so two widgets
//! on the same store always agree without talking to each other.

use crate::error::{FlowError, FlowResult};
use crate::params::{FlowField, FlowParameters, ParameterStore, Subscription};
use crate::presets::{Preset, PRESETS};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// `0.62` → `"62"`
    Percent,
    /// `0.62` → `"0.62"`
    TwoDecimals,
}

impl Precision {
    pub fn format(self, value: f32) -> String {
        match self {
            Precision::Percent => format!("{}", (value * 100.0).round() as i32),
            Precision::TwoDecimals => format!("{value:.2}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub field: FlowField,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderSpec {
    pub const fn unit(field: FlowField) -> Self {
        Self {
            field,
            min: 0.0,
            max: 1.0,
            step: 0.01,
        }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug)]
pub struct ControlLayout {
    pub id: &'static str,
    pub title: &'static str,
    pub hint: &'static str,
    pub sliders: &'static [SliderSpec],
    pub presets: &'static [Preset],
    pub precision: Precision,
    pub collapsible: bool,
}

impl ControlLayout {
    pub fn slider(&self, field: FlowField) -> Option<&SliderSpec> {
        self.sliders.iter().find(|s| s.field == field)
    }
}

/// Collapsible flow-controls panel.
pub static PANEL_LAYOUT: ControlLayout = ControlLayout {
    id: "flow-panel",
    title: "Flow controls",
    hint: "Drag the sliders or move your pointer - the shader reacts to both.",
    sliders: &[
        SliderSpec::unit(FlowField::Intensity),
        SliderSpec::unit(FlowField::Density),
        SliderSpec::unit(FlowField::Wobble),
    ],
    presets: &PRESETS,
    precision: Precision::Percent,
    collapsible: true,
};

/// Inline sandbox block with narrower safe ranges.
pub static INLINE_LAYOUT: ControlLayout = ControlLayout {
    id: "flow-sandbox",
    title: "Flow field sandbox",
    hint: "Intensity adjusts the contrast of filaments; density thickens them; wobble softens pointer responsiveness.",
    sliders: &[
        SliderSpec {
            field: FlowField::Intensity,
            min: 0.2,
            max: 1.0,
            step: 0.01,
        },
        SliderSpec {
            field: FlowField::Density,
            min: 0.2,
            max: 0.9,
            step: 0.01,
        },
        SliderSpec::unit(FlowField::Wobble),
    ],
    presets: &[],
    precision: Precision::TwoDecimals,
    collapsible: false,
};

/// Whatever displays a widget's sliders.
pub trait ControlView {
    fn show_value(&mut self, slider: &SliderSpec, value: f32, readout: &str);
}

fn render<V: ControlView + ?Sized>(view: &mut V, layout: &ControlLayout, params: &FlowParameters) {
    for slider in layout.sliders {
        let value = slider.field.get(params);
        view.show_value(slider, value, &layout.precision.format(value));
    }
}

/// Live connection between one widget and the store.
pub struct ControlBinding {
    layout: &'static ControlLayout,
    store: ParameterStore,
    subscription: Option<Subscription>,
}

impl ControlBinding {
    /// Render the current values into `view` and keep it in sync.
    pub fn bind<V: ControlView + 'static>(
        layout: &'static ControlLayout,
        store: &ParameterStore,
        view: Rc<RefCell<V>>,
    ) -> Self {
        render(&mut *view.borrow_mut(), layout, &store.get());
        let subscription = store.subscribe(move |params| match view.try_borrow_mut() {
            Ok(mut v) => render(&mut *v, layout, &params),
            Err(_) => log::debug!("[controls] {} view busy; skipping refresh", layout.id),
        });
        log::debug!("[controls] bound {}", layout.id);
        Self {
            layout,
            store: store.clone(),
            subscription: Some(subscription),
        }
    }

    /// A slider moved. The value is clamped to the slider's range, then to
    /// \[0, 1\] by the store.
    pub fn input(&self, field: FlowField, value: f32) -> Option<FlowParameters> {
        let Some(slider) = self.layout.slider(field) else {
            log::debug!("[controls] {} has no {} slider", self.layout.id, field.key());
            return None;
        };
        Some(self.store.set(field, slider.clamp(value)))
    }

    /// Same as [`Self::input`] for a raw `<input>` value string.
    pub fn input_text(&self, field: FlowField, raw: &str) -> Option<FlowParameters> {
        match raw.trim().parse::<f32>() {
            Ok(v) => self.input(field, v),
            Err(_) => {
                log::debug!("[controls] ignoring non-numeric input {raw:?}");
                None
            }
        }
    }

    pub fn apply_preset(&self, label: &str) -> FlowResult<FlowParameters> {
        let preset = self
            .layout
            .presets
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| FlowError::UnknownPreset(label.to_string()))?;
        Ok(preset.apply(&self.store))
    }

    pub fn values(&self) -> FlowParameters {
        self.store.get()
    }

    pub fn layout(&self) -> &'static ControlLayout {
        self.layout
    }

    pub fn is_bound(&self) -> bool {
        self.subscription
            .as_ref()
            .map(Subscription::is_active)
            .unwrap_or(false)
    }

    /// Stop reflecting store changes. Safe to call repeatedly.
    pub fn unbind(&mut self) {
        if let Some(mut sub) = self.subscription.take() {
            sub.unsubscribe();
            log::debug!("[controls] unbound {}", self.layout.id);
        }
    }
}

/// Open/closed state of a collapsible panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
}

impl Disclosure {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Label for the toggle button's secondary text.
    pub fn hint(&self) -> &'static str {
        if self.open {
            "hide"
        } else {
            "show"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_formats_like_the_widgets() {
        assert_eq!(Precision::Percent.format(0.62), "62");
        assert_eq!(Precision::Percent.format(0.006), "1");
        assert_eq!(Precision::TwoDecimals.format(0.3), "0.30");
    }

    #[test]
    fn disclosure_starts_closed() {
        let mut d = Disclosure::default();
        assert_eq!(d.hint(), "show");
        assert!(d.toggle());
        assert_eq!(d.hint(), "hide");
    }
}
