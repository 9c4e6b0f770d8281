//! A single effect instance: one surface, its uniforms, its clock and its
//! pending resize.

use log::{debug, trace};

use crate::clock::FrameClock;
use crate::config::{GlassConfig, DEBOUNCE_MS};
use crate::debounce::Debouncer;
use crate::error::GlassResult;
use crate::lookup::LookupTexture;
use crate::shade::Uniforms;
use crate::surface::{Surface, SurfaceSize};

pub struct EffectInstance<S> {
    surface: S,
    uniforms: Uniforms,
    lookup: LookupTexture,
    clock: FrameClock,
    resize: Debouncer<SurfaceSize>,
    frames: u64,
}

impl<S: Surface> EffectInstance<S> {
    pub fn new(surface: S, config: &GlassConfig, lookup: LookupTexture) -> Self {
        let uniforms = Uniforms::from_config(config, surface.pixel_size());
        Self {
            surface,
            uniforms,
            lookup,
            clock: FrameClock::new(),
            resize: Debouncer::new(DEBOUNCE_MS),
            frames: 0,
        }
    }

    /// Advance time from an animation-frame timestamp and draw once.
    pub fn frame(&mut self, timestamp_ms: f64) -> GlassResult<()> {
        self.uniforms.time = self.clock.advance(timestamp_ms);
        if self.clock.take_tick() {
            debug!("glass ticking at {:.0}ms", timestamp_ms);
        }
        self.surface.draw(&self.uniforms)?;
        self.frames += 1;
        Ok(())
    }

    /// Record a resize event; nothing is reallocated until [`flush_resize`](Self::flush_resize).
    pub fn observe_resize(&mut self, size: SurfaceSize, now_ms: f64) {
        trace!("resize observed {}x{}", size.width, size.height);
        self.resize.observe(size, now_ms);
    }

    /// Apply the last observed size if the debounce window has elapsed.
    ///
    /// Returns whether the surface was resized. Sizes too small to render
    /// are dropped and the surface keeps its previous dimensions.
    pub fn flush_resize(&mut self, now_ms: f64) -> GlassResult<bool> {
        let Some(size) = self.resize.take_due(now_ms) else {
            return Ok(false);
        };
        if !size.is_renderable() {
            debug!("skipping resize to {}x{}", size.width, size.height);
            return Ok(false);
        }
        let pixels = self.surface.resize(size)?;
        self.uniforms.set_resolution(pixels);
        Ok(true)
    }

    pub fn resize_deadline(&self) -> Option<f64> {
        self.resize.deadline()
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn lookup(&self) -> &LookupTexture {
        &self.lookup
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
