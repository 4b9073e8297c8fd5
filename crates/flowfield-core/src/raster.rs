//! CPU rasterisation for hosts without a GPU context.

use crate::error::{FlowError, FlowResult};
use crate::field::sample;
use crate::gradient::static_gradient;
use crate::uniforms::FlowUniforms;
use glam::{Vec2, Vec4};

/// Map a pixel centre to field coordinates (\[-1, 1\]², y up).
#[inline]
pub fn pixel_uv(px: f32, py: f32, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new((px + 0.5) / w * 2.0 - 1.0, 1.0 - (py + 0.5) / h * 2.0)
}

#[inline]
fn quantize(c: Vec4) -> [u8; 4] {
    let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    [q(c.x), q(c.y), q(c.z), q(c.w)]
}

/// Straight-alpha RGBA8 pixel buffer, row-major from the top-left.
#[derive(Clone, Debug)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> FlowResult<Self> {
        if width == 0 || height == 0 {
            return Err(FlowError::EmptySurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Reallocate if the size changed; a zero size is rejected and leaves the
    /// buffer untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> FlowResult<()> {
        if width == 0 || height == 0 {
            return Err(FlowError::EmptySurface { width, height });
        }
        if width != self.width || height != self.height {
            *self = Self::new(width, height)?;
        }
        Ok(())
    }

    pub fn render_static(&mut self) {
        let (w, h) = (self.width, self.height);
        for (i, px) in self.pixels.chunks_exact_mut(4).enumerate() {
            let x = (i as u32 % w) as f32 + 0.5;
            let y = (i as u32 / w) as f32 + 0.5;
            let c = static_gradient(x / w as f32, y / h as f32);
            px.copy_from_slice(&quantize(Vec4::from(c)));
        }
    }

    /// Evaluate the field on a grid every `cell` pixels and bilinearly
    /// upscale. `cell == 1` evaluates every pixel exactly.
    pub fn render_field_coarse(&mut self, frame: &FlowUniforms, cell: u32) {
        let cell = cell.max(1);
        let (w, h) = (self.width, self.height);
        let gw = ((w - 1) / cell + 2) as usize;
        let gh = ((h - 1) / cell + 2) as usize;

        let mut grid = Vec::with_capacity(gw * gh);
        for gy in 0..gh {
            for gx in 0..gw {
                let uv = pixel_uv((gx as u32 * cell) as f32, (gy as u32 * cell) as f32, w, h);
                grid.push(Vec4::from(sample(uv, frame).to_array()));
            }
        }

        let inv = 1.0 / cell as f32;
        for y in 0..h {
            let fy = y as f32 * inv;
            let y0 = fy.floor() as usize;
            let ty = fy - y0 as f32;
            for x in 0..w {
                let fx = x as f32 * inv;
                let x0 = fx.floor() as usize;
                let tx = fx - x0 as f32;
                let at = |gx: usize, gy: usize| grid[gy * gw + gx];
                let top = at(x0, y0).lerp(at(x0 + 1, y0), tx);
                let bottom = at(x0, y0 + 1).lerp(at(x0 + 1, y0 + 1), tx);
                let c = top.lerp(bottom, ty);
                let i = (y as usize * w as usize + x as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&quantize(c));
            }
        }
    }
}
