//! WebGL2 implementation of the surface seam.

use std::collections::HashMap;

use js_sys::{Float32Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject, Window,
};

use crate::config::GlassConfig;
use crate::error::{GlassError, GlassResult};
use crate::lookup::LookupTexture;
use crate::shade::Uniforms;
use crate::shader::{self, VERTEX_SHADER};
use crate::surface::{Surface, SurfaceFactory, SurfaceSize};

/// Two-triangle strip covering clip space.
const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

pub struct WebGlFactory {
    document: Document,
    pixel_ratio: f64,
}

impl WebGlFactory {
    /// Confirm WebGL2 is available before any element is touched.
    ///
    /// Only looks for the `WebGL2RenderingContext` constructor; no context is
    /// created, so repeated scans do not eat into the browser's context budget.
    pub fn detect(window: &Window) -> GlassResult<Self> {
        let has_webgl2 = Reflect::has(window, &JsValue::from_str("WebGL2RenderingContext"))
            .unwrap_or(false);
        if !has_webgl2 {
            return Err(GlassError::unavailable("WebGL2 not supported"));
        }
        let document = window
            .document()
            .ok_or_else(|| GlassError::unavailable("no document"))?;
        Ok(Self {
            document,
            pixel_ratio: window.device_pixel_ratio(),
        })
    }
}

impl SurfaceFactory for WebGlFactory {
    type Target = Element;
    type Surface = GlSurface;

    fn create(
        &self,
        target: &Element,
        size: SurfaceSize,
        config: &GlassConfig,
        lookup: &LookupTexture,
    ) -> GlassResult<GlSurface> {
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")?
            .dyn_into()
            .map_err(JsValue::from)?;
        let style = canvas.style();
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("display", "block")?;
        style.set_property("pointer-events", "none")?;

        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &context_options()?)?
            .ok_or_else(|| GlassError::unavailable("WebGL2 context refused"))?
            .dyn_into()
            .map_err(JsValue::from)?;

        let program = link_program(
            &gl,
            &compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?,
            &compile_shader(&gl, GL::FRAGMENT_SHADER, shader::fragment_source(config.mode))?,
        )?;

        let mut uniforms = HashMap::new();
        for &name in shader::uniform_names(config.mode) {
            if let Some(location) = gl.get_uniform_location(&program, name) {
                uniforms.insert(name, location);
            }
        }

        let vao = upload_quad(&gl, &program)?;
        let texture = upload_lookup(&gl, lookup)?;

        gl.enable(GL::BLEND);
        gl.blend_func(GL::ONE, GL::ONE_MINUS_SRC_ALPHA);

        target.append_child(&canvas)?;

        let mut surface = GlSurface {
            canvas,
            gl,
            program,
            vao,
            texture,
            uniforms,
            pixel_ratio: self.pixel_ratio,
            pixel_size: [1.0, 1.0],
        };
        surface.resize(size)?;
        Ok(surface)
    }
}

pub struct GlSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    texture: WebGlTexture,
    uniforms: HashMap<&'static str, WebGlUniformLocation>,
    pixel_ratio: f64,
    pixel_size: [f32; 2],
}

impl GlSurface {
    fn uniform(&self, name: &str) -> Option<&WebGlUniformLocation> {
        self.uniforms.get(name)
    }
}

impl Surface for GlSurface {
    fn resize(&mut self, size: SurfaceSize) -> GlassResult<[f32; 2]> {
        let (w, h) = size.to_pixels(self.pixel_ratio);
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.pixel_size = [w as f32, h as f32];
        Ok(self.pixel_size)
    }

    fn pixel_size(&self) -> [f32; 2] {
        self.pixel_size
    }

    fn draw(&mut self, u: &Uniforms) -> GlassResult<()> {
        let gl = &self.gl;
        let [w, h] = self.pixel_size;
        gl.viewport(0, 0, w as i32, h as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform1f(self.uniform("u_time"), u.time);
        gl.uniform1f(self.uniform("u_aspect"), u.aspect);
        gl.uniform1f(self.uniform("u_distortion"), u.distortion);
        gl.uniform1f(self.uniform("u_grain"), u.grain);
        gl.uniform2f(self.uniform("u_resolution"), u.resolution[0], u.resolution[1]);
        let [r, g, b] = u.color_one.0;
        gl.uniform3f(self.uniform("u_color_one"), r, g, b);
        let [r, g, b] = u.color_two.0;
        gl.uniform3f(self.uniform("u_color_two"), r, g, b);

        if let Some(location) = self.uniform("u_lookup") {
            gl.active_texture(GL::TEXTURE0);
            gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
            gl.uniform1i(Some(location), 0);
        }

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        gl.bind_vertex_array(None);

        if gl.is_context_lost() {
            return Err(GlassError::js("WebGL context lost"));
        }
        Ok(())
    }
}

fn context_options() -> Result<JsValue, JsValue> {
    let opts = Object::new();
    Reflect::set(&opts, &"alpha".into(), &true.into())?;
    Reflect::set(&opts, &"antialias".into(), &false.into())?;
    Reflect::set(&opts, &"premultipliedAlpha".into(), &true.into())?;
    Reflect::set(&opts, &"powerPreference".into(), &"high-performance".into())?;
    Ok(opts.into())
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> GlassResult<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| GlassError::shader("unable to create shader object"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown compile error".to_string());
        Err(GlassError::shader(log))
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> GlassResult<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| GlassError::shader("unable to create program"))?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown link error".to_string());
        Err(GlassError::shader(log))
    }
}

fn upload_quad(gl: &GL, program: &WebGlProgram) -> GlassResult<WebGlVertexArrayObject> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| GlassError::js("unable to create vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let buffer = gl
        .create_buffer()
        .ok_or_else(|| GlassError::js("unable to create buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let vertices = Float32Array::from(&QUAD[..]);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

    let location = gl.get_attrib_location(program, "a_position");
    if location < 0 {
        return Err(GlassError::shader("a_position not found"));
    }
    let location = location as u32;
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, 2, GL::FLOAT, false, 0, 0);

    gl.bind_vertex_array(None);
    Ok(vao)
}

fn upload_lookup(gl: &GL, lookup: &LookupTexture) -> GlassResult<WebGlTexture> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| GlassError::js("unable to create texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.pixel_storei(GL::UNPACK_ALIGNMENT, 1);
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA8 as i32,
        lookup.width() as i32,
        lookup.height() as i32,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(lookup.as_bytes()),
    )?;
    // Nearest keeps each flute on a single column index.
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::NEAREST as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::NEAREST as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    gl.bind_texture(GL::TEXTURE_2D, None);
    Ok(texture)
}
