use crate::constants::{CANVAS_STYLE, REDUCED_MOTION_QUERY};
use flowfield_core::config::ATTR_PREFIX;
use flowfield_core::FlowConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (read(window.inner_width()), read(window.inner_height()))
}

pub fn style_background_canvas(canvas: &web::HtmlCanvasElement) {
    _ = canvas.set_attribute("style", CANVAS_STYLE);
    _ = canvas.set_attribute("aria-hidden", "true");
}

/// Match the backing store to CSS size × device pixel ratio, with the ratio
/// capped by `config.max_dpr`. Returns whether the size changed, which also
/// wipes any 2D content.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, config: &FlowConfig) -> bool {
    let Some(w) = web::window() else {
        return false;
    };
    let dpr = config.effective_dpr(w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    let mut changed = false;
    if canvas.width() != w_px {
        canvas.set_width(w_px);
        changed = true;
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
        changed = true;
    }
    changed
}

/// Collect `data-flow-*` attributes from `el` into a config. Bad values are
/// reported and left at their defaults.
pub fn read_config(el: &web::Element) -> FlowConfig {
    let names: js_sys::Array = el.get_attribute_names();
    let pairs: Vec<(String, String)> = names
        .iter()
        .filter_map(|n| n.as_string())
        .filter(|n| n.starts_with(ATTR_PREFIX))
        .filter_map(|n| el.get_attribute(&n).map(|v| (n, v)))
        .collect();
    let (config, errors) =
        FlowConfig::from_attrs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for e in errors {
        log::warn!("[flow] {e}");
    }
    config
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        Self::attach(target, kind, handler, false)
    }

    /// Passive listener: the handler never calls `preventDefault`.
    pub fn passive(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        Self::attach(target, kind, handler, true)
    }

    fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
        passive: bool,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        match target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("[flow] could not listen for {kind}: {e:?}");
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Create `<tag class="class">` under `parent`.
pub fn append_element(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    class: &str,
) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    parent.append_child(&el).ok()?;
    Some(el)
}
