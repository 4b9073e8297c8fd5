//! DOM rendition of the control widgets.

use crate::constants::{
    HINT_CLASS, PANEL_OPEN_CLASS, PRESET_CLASS, READOUT_CLASS, SLIDER_ROW_CLASS, TOGGLE_CLASS,
    WIDGET_CLASS,
};
use crate::dom::{append_element, Listener};
use flowfield_core::{
    ControlBinding, ControlLayout, ControlView, Disclosure, FlowField, ParameterStore, SliderSpec,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

struct SliderRow {
    field: FlowField,
    input: web::HtmlInputElement,
    readout: web::Element,
}

/// Inputs and readouts of one widget.
#[derive(Default)]
pub struct DomControlView {
    rows: Vec<SliderRow>,
}

impl ControlView for DomControlView {
    fn show_value(&mut self, slider: &SliderSpec, value: f32, readout: &str) {
        if let Some(row) = self.rows.iter().find(|r| r.field == slider.field) {
            let v = format!("{value}");
            if row.input.value() != v {
                row.input.set_value(&v);
            }
            row.readout.set_text_content(Some(readout));
        }
    }
}

/// A mounted widget. Dropping it removes its markup and listeners and
/// unsubscribes from the store.
pub struct DomControls {
    root: web::Element,
    binding: Rc<RefCell<ControlBinding>>,
    listeners: Vec<Listener>,
}

impl Drop for DomControls {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Ok(mut b) = self.binding.try_borrow_mut() {
            b.unbind();
        }
        self.root.remove();
        log::debug!("[controls] removed {}", self.root.id());
    }
}

fn build_slider(
    document: &web::Document,
    parent: &web::Element,
    slider: &SliderSpec,
) -> Option<SliderRow> {
    let row = append_element(document, parent, "label", SLIDER_ROW_CLASS)?;
    let name = append_element(document, &row, "span", "")?;
    name.set_text_content(Some(slider.field.label()));
    let input = append_element(document, &row, "input", "")?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?;
    input.set_type("range");
    input.set_name(slider.field.key());
    input.set_min(&format!("{}", slider.min));
    input.set_max(&format!("{}", slider.max));
    input.set_step(&format!("{}", slider.step));
    let readout = append_element(document, &row, "output", READOUT_CLASS)?;
    Some(SliderRow {
        field: slider.field,
        input,
        readout,
    })
}

fn wire_toggle(
    document: &web::Document,
    root: &web::Element,
    body: &web::Element,
    title: &str,
) -> Option<Listener> {
    let button = append_element(document, root, "button", TOGGLE_CLASS)?;
    _ = button.set_attribute("type", "button");
    _ = button.set_attribute("aria-expanded", "false");
    let label = append_element(document, &button, "span", "")?;
    label.set_text_content(Some(title));
    let hint = append_element(document, &button, "small", "")?;
    // The body was appended first; keep the toggle above it.
    _ = root.insert_before(&button, Some(body.as_ref()));

    let mut disclosure = Disclosure::default();
    hint.set_text_content(Some(disclosure.hint()));
    _ = body.set_attribute("hidden", "");

    let root = root.clone();
    let body = body.clone();
    let target = button.clone();
    Listener::new(&button, "click", move |_| {
        let open = disclosure.toggle();
        hint.set_text_content(Some(disclosure.hint()));
        _ = target.set_attribute("aria-expanded", if open { "true" } else { "false" });
        if open {
            _ = root.class_list().add_1(PANEL_OPEN_CLASS);
            _ = body.remove_attribute("hidden");
        } else {
            _ = root.class_list().remove_1(PANEL_OPEN_CLASS);
            _ = body.set_attribute("hidden", "");
        }
    })
}

/// Build `layout` inside `mount` and bind it to `store`. Nothing is left
/// under `mount` if any part fails to build.
pub fn mount_controls(
    document: &web::Document,
    mount: &web::Element,
    layout: &'static ControlLayout,
    store: &ParameterStore,
) -> Option<DomControls> {
    let root = append_element(document, mount, "section", WIDGET_CLASS)?;
    root.set_id(layout.id);
    match build_widget(document, &root, layout, store) {
        Some((binding, listeners)) => {
            log::info!("[controls] mounted {}", layout.id);
            Some(DomControls {
                root,
                binding,
                listeners,
            })
        }
        None => {
            root.remove();
            log::warn!("[controls] could not build {}", layout.id);
            None
        }
    }
}

fn build_widget(
    document: &web::Document,
    root: &web::Element,
    layout: &'static ControlLayout,
    store: &ParameterStore,
) -> Option<(Rc<RefCell<ControlBinding>>, Vec<Listener>)> {
    let body = append_element(document, root, "div", "")?;
    let mut listeners = Vec::new();

    if layout.collapsible {
        listeners.extend(wire_toggle(document, root, &body, layout.title));
    } else {
        let heading = append_element(document, &body, "h3", "")?;
        heading.set_text_content(Some(layout.title));
    }

    let mut view = DomControlView::default();
    for slider in layout.sliders {
        view.rows.extend(build_slider(document, &body, slider));
    }
    let inputs: Vec<(FlowField, web::HtmlInputElement)> = view
        .rows
        .iter()
        .map(|r| (r.field, r.input.clone()))
        .collect();

    let binding = Rc::new(RefCell::new(ControlBinding::bind(
        layout,
        store,
        Rc::new(RefCell::new(view)),
    )));

    for (field, input) in inputs {
        let binding = binding.clone();
        let source = input.clone();
        listeners.extend(Listener::new(&input, "input", move |_| {
            binding.borrow().input_text(field, &source.value());
        }));
    }

    if !layout.presets.is_empty() {
        let row = append_element(document, &body, "div", "")?;
        for preset in layout.presets {
            let button = append_element(document, &row, "button", PRESET_CLASS)?;
            _ = button.set_attribute("type", "button");
            button.set_text_content(Some(preset.label));
            let binding = binding.clone();
            listeners.extend(Listener::new(&button, "click", move |_| {
                if let Err(e) = binding.borrow().apply_preset(preset.label) {
                    log::warn!("[controls] {e}");
                }
            }));
        }
    }

    let hint = append_element(document, &body, "p", HINT_CLASS)?;
    hint.set_text_content(Some(layout.hint));
    Some((binding, listeners))
}
