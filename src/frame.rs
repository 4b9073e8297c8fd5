use crate::dom::Listener;
use crate::events;
use crate::fallback::{self, CpuSurface};
use crate::render;
use flowfield_core::{
    FlowConfig, FlowError, FlowRenderer, FlowUniforms, FrameSurface, PointerTracker, RenderHost,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebRenderer = FlowRenderer<WebHost>;

/// Whatever the renderer ended up drawing with.
pub enum WebSurface {
    Gpu(render::GpuState),
    Cpu(CpuSurface),
}

impl FrameSurface for WebSurface {
    fn size(&self) -> [u32; 2] {
        match self {
            WebSurface::Gpu(g) => g.size(),
            WebSurface::Cpu(c) => c.size(),
        }
    }

    fn draw(&mut self, frame: &FlowUniforms) -> Result<(), FlowError> {
        match self {
            WebSurface::Gpu(g) => g.draw(frame),
            WebSurface::Cpu(c) => c.draw(frame),
        }
    }

    fn clear(&mut self) {
        match self {
            WebSurface::Gpu(g) => g.clear(),
            WebSurface::Cpu(c) => c.clear(),
        }
    }

    fn release(&mut self) {
        match self {
            WebSurface::Gpu(g) => g.release(),
            WebSurface::Cpu(c) => c.release(),
        }
    }
}

/// Browser side of the renderer: animation frames, window pointer listeners
/// and the fallback canvas paths.
pub struct WebHost {
    window: web::Window,
    canvas: web::HtmlCanvasElement,
    config: FlowConfig,
    reduced_motion: bool,
    tracker: Rc<RefCell<PointerTracker>>,
    pointer_listeners: Vec<Listener>,
    tick: Option<Closure<dyn FnMut(f64)>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl WebHost {
    pub fn new(
        window: web::Window,
        canvas: web::HtmlCanvasElement,
        config: FlowConfig,
        reduced_motion: bool,
        tracker: Rc<RefCell<PointerTracker>>,
    ) -> Self {
        Self {
            window,
            canvas,
            config,
            reduced_motion,
            tracker,
            pointer_listeners: Vec::new(),
            tick: None,
            raf_id: Rc::new(Cell::new(None)),
        }
    }
}

impl RenderHost for WebHost {
    type Surface = WebSurface;

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn attach_pointer(&mut self) {
        if self.pointer_listeners.is_empty() {
            self.pointer_listeners = events::wire_pointer(&self.window, self.tracker.clone());
        }
    }

    fn detach_pointer(&mut self) {
        self.pointer_listeners.clear();
    }

    fn request_frame(&mut self) {
        let Some(tick) = &self.tick else {
            log::warn!("[flow] frame requested before the loop was installed");
            return;
        };
        match self.window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("[flow] requestAnimationFrame failed: {e:?}"),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.raf_id.take() {
            _ = self.window.cancel_animation_frame(id);
        }
    }

    fn present_static(&mut self) {
        fallback::paint_static(&mut self.canvas);
    }

    fn fallback_surface(&mut self) -> Result<WebSurface, FlowError> {
        CpuSurface::new(&mut self.canvas, self.config.cpu_cell).map(WebSurface::Cpu)
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Result<WebSurface, FlowError> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Ok(WebSurface::Gpu(g)),
        Err(e) => {
            log::warn!("[gpu] WebGPU init error: {:?}", e);
            Err(FlowError::Unsupported(e.to_string()))
        }
    }
}

/// Install the animation-frame callback. Must run before `mount`, which
/// schedules the first frame. The callback only holds a weak reference, so
/// dropping the renderer ends the loop.
pub fn install_loop(renderer: &Rc<RefCell<WebRenderer>>) {
    let weak = Rc::downgrade(renderer);
    let raf_id = renderer.borrow().host().raf_id.clone();
    let started = Instant::now();
    let tick = Closure::wrap(Box::new(move |_ts: f64| {
        raf_id.set(None);
        let Some(renderer) = weak.upgrade() else {
            return;
        };
        let Ok(mut renderer) = renderer.try_borrow_mut() else {
            log::warn!("[flow] renderer busy; frame skipped");
            return;
        };
        renderer.frame(started.elapsed().as_secs_f32());
    }) as Box<dyn FnMut(f64)>);
    renderer.borrow_mut().host_mut().tick = Some(tick);
}
