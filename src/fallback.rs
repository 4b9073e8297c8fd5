//! Canvas 2D output for when WebGPU is unavailable or motion is reduced.
//!
//! Both paths rasterise into a small [`Raster`] held on an off-screen canvas
//! and let the browser scale it up onto the visible one.

use crate::constants::CPU_DOWNSCALE;
use crate::dom;
use flowfield_core::gradient::STATIC_GRADIENT_CSS;
use flowfield_core::{FlowError, FlowUniforms, FrameSurface, Raster};
use wasm_bindgen::{Clamped, JsCast};
use web_sys as web;

fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// A 2D context for `canvas`. A canvas already claimed by another context
/// type yields none, so it is swapped for a fresh clone in the document.
pub fn claim_2d(canvas: &mut web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    if let Some(ctx) = context_2d(canvas) {
        return Some(ctx);
    }
    let fresh = canvas
        .clone_node()
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    canvas.replace_with_with_node_1(&fresh).ok()?;
    fresh.set_width(canvas.width());
    fresh.set_height(canvas.height());
    log::debug!("[fallback] replaced canvas to obtain a 2d context");
    *canvas = fresh;
    context_2d(canvas)
}

fn reduced_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    (
        (canvas.width() / CPU_DOWNSCALE).max(1),
        (canvas.height() / CPU_DOWNSCALE).max(1),
    )
}

/// Copies a [`Raster`] onto a visible canvas through a scratch canvas.
struct Blitter {
    target: web::CanvasRenderingContext2d,
    scratch: web::HtmlCanvasElement,
    scratch_ctx: web::CanvasRenderingContext2d,
}

impl Blitter {
    fn new(target: web::CanvasRenderingContext2d) -> Option<Self> {
        let document = dom::window_document()?;
        let scratch = document
            .create_element("canvas")
            .ok()?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        let scratch_ctx = context_2d(&scratch)?;
        target.set_image_smoothing_enabled(true);
        Some(Self {
            target,
            scratch,
            scratch_ctx,
        })
    }

    fn blit(&self, raster: &Raster, dest_w: u32, dest_h: u32) -> Result<(), FlowError> {
        let js = |e: wasm_bindgen::JsValue| FlowError::Surface(format!("{e:?}"));
        if self.scratch.width() != raster.width() {
            self.scratch.set_width(raster.width());
        }
        if self.scratch.height() != raster.height() {
            self.scratch.set_height(raster.height());
        }
        let image = web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(raster.as_rgba()),
            raster.width(),
            raster.height(),
        )
        .map_err(js)?;
        self.scratch_ctx.put_image_data(&image, 0.0, 0.0).map_err(js)?;
        self.target
            .clear_rect(0.0, 0.0, dest_w as f64, dest_h as f64);
        self.target
            .draw_image_with_html_canvas_element_and_dw_and_dh(
                &self.scratch,
                0.0,
                0.0,
                dest_w as f64,
                dest_h as f64,
            )
            .map_err(js)
    }
}

/// Paint the still gradient onto `canvas`, or fall back to a CSS background
/// when no 2D context can be had.
pub fn paint_static(canvas: &mut web::HtmlCanvasElement) {
    let painted = claim_2d(canvas).and_then(Blitter::new).and_then(|b| {
        let (w, h) = reduced_size(canvas);
        let mut raster = Raster::new(w, h).ok()?;
        raster.render_static();
        b.blit(&raster, canvas.width(), canvas.height()).ok()
    });
    if painted.is_some() {
        log::info!("[fallback] static gradient painted");
        return;
    }
    match canvas.style().set_property("background", STATIC_GRADIENT_CSS) {
        Ok(()) => log::info!("[fallback] static gradient applied as CSS background"),
        Err(e) => log::warn!("[fallback] no way to paint the static gradient: {e:?}"),
    }
}

/// Animated field rendered on the CPU at reduced resolution.
pub struct CpuSurface {
    canvas: web::HtmlCanvasElement,
    blitter: Blitter,
    raster: Raster,
    cell: u32,
}

impl CpuSurface {
    pub fn new(canvas: &mut web::HtmlCanvasElement, cell: u32) -> Result<Self, FlowError> {
        let blitter = claim_2d(canvas)
            .and_then(Blitter::new)
            .ok_or_else(|| FlowError::Unsupported("2d canvas context".into()))?;
        let (w, h) = reduced_size(canvas);
        log::info!("[fallback] cpu field at {w}x{h}, grid every {cell}px");
        Ok(Self {
            canvas: canvas.clone(),
            blitter,
            raster: Raster::new(w, h)?,
            cell,
        })
    }
}

impl FrameSurface for CpuSurface {
    fn size(&self) -> [u32; 2] {
        [self.raster.width(), self.raster.height()]
    }

    fn draw(&mut self, frame: &FlowUniforms) -> Result<(), FlowError> {
        let (w, h) = reduced_size(&self.canvas);
        if (w, h) != (self.raster.width(), self.raster.height()) {
            self.raster.resize(w, h)?;
        }
        self.raster.render_field_coarse(frame, self.cell);
        self.blitter
            .blit(&self.raster, self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        self.blitter
            .target
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }
}
