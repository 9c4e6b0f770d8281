//! CPU mirror of the fragment programs in `shader.rs`.
//!
//! Used for the host-side preview and for checking the shading math without
//! a GPU. Results follow the GLSL closely but are not bit-identical to any
//! particular driver.

use crate::color::Rgb;
use crate::config::{GlassConfig, ShaderMode, GRAIN_AMOUNT};
use crate::lookup::LookupTexture;

const BLOB_RADIUS: f32 = 0.35;

/// Everything the fragment stage reads besides the lookup texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniforms {
    /// Seconds.
    pub time: f32,
    pub aspect: f32,
    pub distortion: f32,
    pub grain: f32,
    /// Drawing-buffer size in device pixels.
    pub resolution: [f32; 2],
    pub color_one: Rgb,
    pub color_two: Rgb,
    pub mode: ShaderMode,
}

impl Uniforms {
    pub fn from_config(config: &GlassConfig, resolution: [f32; 2]) -> Self {
        let mut uniforms = Self {
            time: 0.0,
            aspect: 1.0,
            distortion: config.distortion,
            grain: GRAIN_AMOUNT,
            resolution,
            color_one: config.color_one,
            color_two: config.color_two,
            mode: config.mode,
        };
        uniforms.set_resolution(resolution);
        uniforms
    }

    /// Update the pixel size and the aspect ratio derived from it.
    pub fn set_resolution(&mut self, resolution: [f32; 2]) {
        self.resolution = resolution;
        let [w, h] = resolution;
        if w > 0.0 && h > 0.0 {
            self.aspect = w / h;
        }
    }
}

/// Premultiplied RGBA in `0.0..=1.0`.
pub type Rgba = [f32; 4];

pub fn shade(uv: [f32; 2], uniforms: &Uniforms, lookup: &LookupTexture) -> Rgba {
    match uniforms.mode {
        ShaderMode::Glass => shade_glass(uv, uniforms, lookup),
        ShaderMode::Pulse => shade_pulse(uniforms),
    }
}

fn shade_glass(uv: [f32; 2], u: &Uniforms, lookup: &LookupTexture) -> Rgba {
    let col = f32::from(lookup.sample(uv[0]));
    let off = (hash(col) - 0.5) * u.distortion;

    let p = [(uv[0] + off) * u.aspect, uv[1]];
    let [c1, c2] = blob_centers(u.time, u.aspect);

    let a = blob(p, c1, BLOB_RADIUS);
    let b = blob(p, c2, BLOB_RADIUS);
    let alpha = a.max(b);

    let color = u.color_one.lerp(u.color_two, b);
    let cell = [
        (uv[0] * u.resolution[0]).floor() + fract(u.time) * 61.0,
        (uv[1] * u.resolution[1]).floor() + fract(u.time) * 61.0,
    ];
    let grain = (hash2(cell) - 0.5) * u.grain;

    let premul = |c: f32| ((c + grain) * alpha).clamp(0.0, 1.0);
    [premul(color.r()), premul(color.g()), premul(color.b()), alpha]
}

fn shade_pulse(u: &Uniforms) -> Rgba {
    let pulse = if fract(u.time * 4.0) >= 0.5 { 1.0 } else { 0.0 };
    let c = u.color_one.lerp(u.color_two, pulse);
    [c.r(), c.g(), c.b(), 1.0]
}

/// Blob centers in aspect-scaled space at time `t`.
pub fn blob_centers(t: f32, aspect: f32) -> [[f32; 2]; 2] {
    [
        [
            (0.3 + 0.12 * (0.35 * t).sin()) * aspect,
            0.6 + 0.10 * (0.27 * t).cos(),
        ],
        [
            (0.7 + 0.12 * (0.31 * t).cos()) * aspect,
            0.4 + 0.10 * (0.23 * t).sin(),
        ],
    ]
}

pub fn blob(p: [f32; 2], c: [f32; 2], r: f32) -> f32 {
    let d = ((p[0] - c[0]).powi(2) + (p[1] - c[1]).powi(2)).sqrt();
    let s = (1.0 - d / r).clamp(0.0, 1.0);
    s * s * (3.0 - 2.0 * s)
}

pub fn hash(n: f32) -> f32 {
    fract(n.sin() * 43758.5453)
}

pub fn hash2(q: [f32; 2]) -> f32 {
    fract((q[0] * 12.9898 + q[1] * 78.233).sin() * 43758.5453)
}

/// GLSL `fract`: always in `0.0..1.0`, also for negative input.
fn fract(x: f32) -> f32 {
    x - x.floor()
}
