//! GLSL ES 3.00 sources.
//!
//! Keep `shade.rs` in step with any change to the fragment math.

use crate::config::ShaderMode;

/// Full-surface quad; clip-space positions in, uv out.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 a_position;
out vec2 v_uv;

void main() {
    v_uv = a_position * 0.5 + 0.5;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;

pub const GLASS_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
out vec4 frag_color;

uniform float u_time;
uniform float u_aspect;
uniform float u_distortion;
uniform float u_grain;
uniform vec2 u_resolution;
uniform vec3 u_color_one;
uniform vec3 u_color_two;
uniform sampler2D u_lookup;

float hash(float n) {
    return fract(sin(n) * 43758.5453);
}

float hash2(vec2 q) {
    return fract(sin(dot(q, vec2(12.9898, 78.233))) * 43758.5453);
}

float blob(vec2 p, vec2 c, float r) {
    float s = clamp(1.0 - length(p - c) / r, 0.0, 1.0);
    return s * s * (3.0 - 2.0 * s);
}

void main() {
    float col = texture(u_lookup, vec2(v_uv.x, 0.5)).r * 255.0;
    float off = (hash(col) - 0.5) * u_distortion;

    vec2 uv = v_uv;
    uv.x += off;
    vec2 p = vec2(uv.x * u_aspect, uv.y);

    float t = u_time;
    vec2 c1 = vec2((0.3 + 0.12 * sin(0.35 * t)) * u_aspect, 0.6 + 0.10 * cos(0.27 * t));
    vec2 c2 = vec2((0.7 + 0.12 * cos(0.31 * t)) * u_aspect, 0.4 + 0.10 * sin(0.23 * t));

    float a = blob(p, c1, 0.35);
    float b = blob(p, c2, 0.35);
    float alpha = max(a, b);

    vec3 color = mix(u_color_one, u_color_two, b);
    float grain = (hash2(floor(v_uv * u_resolution) + fract(t) * 61.0) - 0.5) * u_grain;

    frag_color = vec4(clamp((color + grain) * alpha, 0.0, 1.0), alpha);
}
"#;

pub const PULSE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec2 v_uv;
out vec4 frag_color;

uniform float u_time;
uniform vec3 u_color_one;
uniform vec3 u_color_two;

void main() {
    float pulse = step(0.5, fract(u_time * 4.0));
    frag_color = vec4(mix(u_color_one, u_color_two, pulse), 1.0);
}
"#;

pub fn fragment_source(mode: ShaderMode) -> &'static str {
    match mode {
        ShaderMode::Glass => GLASS_FRAGMENT_SHADER,
        ShaderMode::Pulse => PULSE_FRAGMENT_SHADER,
    }
}

/// Uniform names every formulation is expected to expose.
pub fn uniform_names(mode: ShaderMode) -> &'static [&'static str] {
    match mode {
        ShaderMode::Glass => &[
            "u_time",
            "u_aspect",
            "u_distortion",
            "u_grain",
            "u_resolution",
            "u_color_one",
            "u_color_two",
            "u_lookup",
        ],
        ShaderMode::Pulse => &["u_time", "u_color_one", "u_color_two"],
    }
}
