//! Seam between the effect logic and whatever actually draws.
//!
//! The browser build implements these traits on top of WebGL2
//! (`wasm::gl`); tests supply in-memory fakes.

use crate::config::{self, GlassConfig};
use crate::error::GlassResult;
use crate::lookup::LookupTexture;
use crate::shade::Uniforms;

/// Layout size of a target element in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_renderable(&self) -> bool {
        config::is_renderable(self.width, self.height)
    }

    /// Drawing-buffer size for a device pixel ratio, capped at
    /// [`config::MAX_PIXEL_RATIO`] and never below one pixel.
    pub fn to_pixels(self, device_pixel_ratio: f64) -> (u32, u32) {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(config::MAX_PIXEL_RATIO)
        } else {
            1.0
        };
        let px = |v: f64| (v * ratio).round().max(1.0) as u32;
        (px(self.width), px(self.height))
    }
}

/// One rendering surface bound to one element.
pub trait Surface {
    /// Reallocate the drawing buffer; returns its new size in device pixels.
    fn resize(&mut self, size: SurfaceSize) -> GlassResult<[f32; 2]>;

    /// Current drawing-buffer size in device pixels.
    fn pixel_size(&self) -> [f32; 2];

    /// Issue one draw of the full-surface quad.
    fn draw(&mut self, uniforms: &Uniforms) -> GlassResult<()>;
}

/// The injected rendering library: creates surfaces attached to targets.
pub trait SurfaceFactory {
    type Target;
    type Surface: Surface;

    fn create(
        &self,
        target: &Self::Target,
        size: SurfaceSize,
        config: &GlassConfig,
        lookup: &LookupTexture,
    ) -> GlassResult<Self::Surface>;
}
