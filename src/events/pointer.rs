use crate::dom::{self, Listener};
use flowfield_core::PointerTracker;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Feed window pointer movement into `tracker`. Both listeners are passive and
/// live on the window, since the canvas itself ignores pointer events.
pub fn wire_pointer(window: &web::Window, tracker: Rc<RefCell<PointerTracker>>) -> Vec<Listener> {
    ["pointermove", "pointerdown"]
        .into_iter()
        .filter_map(|kind| {
            let tracker = tracker.clone();
            let win = window.clone();
            Listener::passive(window, kind, move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                    return;
                };
                let (vw, vh) = dom::viewport_size(&win);
                if let Ok(mut t) = tracker.try_borrow_mut() {
                    t.on_client(ev.client_x() as f32, ev.client_y() as f32, vw, vh);
                }
            })
        })
        .collect()
}
