//! Frame renderer lifecycle.
//!
//! ```text
//! Uninitialized ──mount──▶ Running ──unmount──▶ TornDown
//!       │                                          ▲
//!       └──mount (reduced motion / no context)──▶ Suspended ──unmount──┘
//! ```
//!
//! The platform side implements [`RenderHost`] (frame callbacks, pointer
//! listeners, the static image) and [`FrameSurface`] (one drawable target).
//! Pointer listener and frame callback are acquired together on entering
//! `Running` and released together on every exit path, including `Drop`.

use crate::config::{FallbackMode, FlowConfig};
use crate::error::FlowError;
use crate::params::ParameterStore;
use crate::pointer::PointerTracker;
use crate::uniforms::FlowUniforms;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticReason {
    ReducedMotion,
    Unsupported,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Running,
    Suspended(StaticReason),
    TornDown,
}

/// A target the field can be drawn into once per frame.
pub trait FrameSurface {
    /// Current drawable size in pixels.
    fn size(&self) -> [u32; 2];
    fn draw(&mut self, frame: &FlowUniforms) -> Result<(), FlowError>;
    /// Leave the target fully transparent. Called once, right before
    /// [`release`](FrameSurface::release).
    fn clear(&mut self) {}
    /// Free the context. Called at most once.
    fn release(&mut self) {}
}

pub trait RenderHost {
    type Surface: FrameSurface;

    fn prefers_reduced_motion(&self) -> bool;
    fn attach_pointer(&mut self);
    fn detach_pointer(&mut self);
    /// Schedule one call to [`FlowRenderer::frame`] on the next display frame.
    fn request_frame(&mut self);
    /// Drop any scheduled frame callback. Must tolerate nothing being scheduled.
    fn cancel_frame(&mut self);
    /// Show the low-motion still image.
    fn present_static(&mut self);
    /// Surface used when the primary context is unavailable and the config
    /// asks for [`FallbackMode::Cpu`].
    fn fallback_surface(&mut self) -> Result<Self::Surface, FlowError> {
        Err(FlowError::Unsupported("no fallback surface".into()))
    }
}

/// Why the page is being hidden, from `PageTransitionEvent.persisted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Kept in the back/forward cache and restored as-is.
    Cached,
    Unloaded,
}

impl PageHide {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Cached
        } else {
            PageHide::Unloaded
        }
    }

    /// A cached page keeps its widgets and context for the restore.
    pub fn tears_down(self) -> bool {
        self == PageHide::Unloaded
    }
}

pub struct FlowRenderer<H: RenderHost> {
    host: H,
    store: ParameterStore,
    pointer: Rc<RefCell<PointerTracker>>,
    config: FlowConfig,
    surface: Option<H::Surface>,
    state: RendererState,
    frames: u64,
}

impl<H: RenderHost> FlowRenderer<H> {
    pub fn new(
        host: H,
        store: ParameterStore,
        pointer: Rc<RefCell<PointerTracker>>,
        config: FlowConfig,
    ) -> Self {
        Self {
            host,
            store,
            pointer,
            config,
            surface: None,
            state: RendererState::Uninitialized,
            frames: 0,
        }
    }

    /// Leave `Uninitialized`. `acquire` is only invoked when motion is allowed.
    pub fn mount<F>(&mut self, acquire: F) -> RendererState
    where
        F: FnOnce() -> Result<H::Surface, FlowError>,
    {
        if self.state != RendererState::Uninitialized {
            log::warn!("[flow] mount ignored in state {:?}", self.state);
            return self.state;
        }
        if self.host.prefers_reduced_motion() {
            self.enter_static(StaticReason::ReducedMotion);
            return self.state;
        }

        let surface = acquire().or_else(|e| {
            log::warn!("[fallback] {e}");
            match self.config.fallback {
                FallbackMode::Cpu => self.host.fallback_surface(),
                FallbackMode::Static => Err(e),
            }
        });
        match surface {
            Ok(surface) => {
                self.surface = Some(surface);
                self.host.attach_pointer();
                self.host.request_frame();
                self.state = RendererState::Running;
                log::info!("[flow] running");
            }
            Err(_) => self.enter_static(StaticReason::Unsupported),
        }
        self.state
    }

    fn enter_static(&mut self, reason: StaticReason) {
        self.host.present_static();
        self.state = RendererState::Suspended(reason);
        log::info!("[flow] static image ({:?})", reason);
    }

    /// Render one frame and schedule the next. Returns `false` (and schedules
    /// nothing) outside `Running`.
    pub fn frame(&mut self, elapsed_sec: f32) -> bool {
        if self.state != RendererState::Running {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let pointer = self.pointer.borrow_mut().step();
        let uniforms = FlowUniforms::new(
            elapsed_sec * self.config.time_scale,
            pointer,
            self.store.get(),
            surface.size(),
        );
        if let Err(e) = surface.draw(&uniforms) {
            log::error!("[flow] draw error: {e}");
        }
        self.frames += 1;
        self.host.request_frame();
        true
    }

    /// The host changed the drawable's backing size. Resizing wipes a 2D
    /// canvas, so a still image is painted again; a running surface picks the
    /// new size up on its next frame. Returns whether a repaint happened.
    pub fn resized(&mut self) -> bool {
        match self.state {
            RendererState::Suspended(_) => {
                self.host.present_static();
                true
            }
            _ => false,
        }
    }

    /// Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        match self.state {
            RendererState::TornDown => return,
            RendererState::Running => {
                self.host.cancel_frame();
                self.host.detach_pointer();
            }
            RendererState::Uninitialized | RendererState::Suspended(_) => {}
        }
        if let Some(mut surface) = self.surface.take() {
            surface.clear();
            surface.release();
        }
        self.state = RendererState::TornDown;
        log::info!("[flow] torn down after {} frames", self.frames);
    }

    #[inline]
    pub fn state(&self) -> RendererState {
        self.state
    }

    #[inline]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn pointer(&self) -> &Rc<RefCell<PointerTracker>> {
        &self.pointer
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: RenderHost> Drop for FlowRenderer<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
