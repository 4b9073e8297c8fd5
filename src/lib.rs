#![cfg(target_arch = "wasm32")]
use flowfield_core::{
    FlowConfig, FlowError, FlowRenderer, PageHide, ParameterStore, PointerTracker, RendererState,
    INLINE_LAYOUT, PANEL_LAYOUT,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod controls;
mod dom;
mod events;
mod fallback;
mod frame;
mod render;

use constants::{CANVAS_ID, INLINE_MOUNT_ID, PANEL_MOUNT_ID};

/// Everything that lives for as long as the background is mounted.
struct App {
    controls: Vec<controls::DomControls>,
    renderer: Rc<RefCell<frame::WebRenderer>>,
    _resize: Option<dom::Listener>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn find_or_create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            el.set_id(CANVAS_ID);
            let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
            body.prepend_with_node_1(&el)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            log::debug!("[flow] created #{CANVAS_ID}");
            el
        }
    };
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

fn wire_canvas_resize(
    window: &web::Window,
    config: FlowConfig,
    renderer: &Rc<RefCell<frame::WebRenderer>>,
) -> Option<dom::Listener> {
    let renderer = Rc::downgrade(renderer);
    dom::Listener::passive(window, "resize", move |_| {
        // Looked up each time: the fallback path may have swapped the element.
        let canvas = dom::window_document()
            .and_then(|d| d.get_element_by_id(CANVAS_ID))
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok());
        let Some(canvas) = canvas else {
            return;
        };
        if !dom::sync_canvas_backing_size(&canvas, &config) {
            return;
        }
        if let Some(renderer) = renderer.upgrade() {
            if let Ok(mut r) = renderer.try_borrow_mut() {
                r.resized();
            }
        }
    })
}

fn on_pagehide(event: web::Event) {
    let persisted = event
        .dyn_ref::<web::PageTransitionEvent>()
        .is_some_and(|e| e.persisted());
    let hide = PageHide::from_persisted(persisted);
    if hide.tears_down() {
        teardown();
    } else {
        log::debug!("[flow] page cached; keeping the background");
    }
}

fn mount_widgets(document: &web::Document, store: &ParameterStore) -> Vec<controls::DomControls> {
    [(PANEL_MOUNT_ID, &PANEL_LAYOUT), (INLINE_MOUNT_ID, &INLINE_LAYOUT)]
        .into_iter()
        .filter_map(|(id, layout)| {
            let mount = document.get_element_by_id(id)?;
            controls::mount_controls(document, &mount, layout, store)
        })
        .collect()
}

/// Tear the background down: stop the frame loop, remove listeners and
/// widgets, release the GPU context. Safe to call more than once.
#[wasm_bindgen(js_name = flowTeardown)]
pub fn teardown() {
    let app = APP.with(|a| a.borrow_mut().take());
    if let Some(app) = app {
        drop(app.controls);
        app.renderer.borrow_mut().unmount();
        log::info!("[flow] background removed");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flowfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = find_or_create_canvas(&document)?;
    dom::style_background_canvas(&canvas);
    let config = dom::read_config(&canvas);
    dom::sync_canvas_backing_size(&canvas, &config);

    let store = ParameterStore::new();
    let tracker = Rc::new(RefCell::new(PointerTracker::with_smoothing(config.smoothing)));
    let reduced_motion = dom::prefers_reduced_motion(&window);

    // Only ask for a GPU when it will actually be used.
    let acquired = if reduced_motion {
        None
    } else {
        Some(frame::init_gpu(&canvas).await)
    };

    let resize_config = config.clone();
    let host = frame::WebHost::new(
        window.clone(),
        canvas,
        config.clone(),
        reduced_motion,
        tracker.clone(),
    );
    let renderer = Rc::new(RefCell::new(FlowRenderer::new(
        host,
        store.clone(),
        tracker,
        config,
    )));
    frame::install_loop(&renderer);
    let resize = wire_canvas_resize(&window, resize_config, &renderer);
    let state = renderer.borrow_mut().mount(move || {
        acquired.unwrap_or_else(|| Err(FlowError::Unsupported("no surface acquired".into())))
    });
    if state != RendererState::Running {
        log::info!("[flow] background is static ({:?})", state);
    }

    let controls = mount_widgets(&document, &store);
    APP.with(|a| {
        *a.borrow_mut() = Some(App {
            controls,
            renderer,
            _resize: resize,
        })
    });

    // Page-lifetime listener; the handler is what releases everything else.
    let pagehide = Closure::wrap(Box::new(on_pagehide) as Box<dyn FnMut(web::Event)>);
    _ = window.add_event_listener_with_callback("pagehide", pagehide.as_ref().unchecked_ref());
    pagehide.forget();

    Ok(())
}
