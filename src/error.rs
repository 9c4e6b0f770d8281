pub type GlassResult<T> = Result<T, GlassError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GlassError {
    /// The rendering backend (WebGL2) could not be obtained at all.
    #[error("rendering library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("element too small to render ({width}x{height})")]
    TooSmall { width: f64, height: f64 },

    #[error("shader error: {0}")]
    Shader(String),

    #[error("js error: {0}")]
    Js(String),
}

impl GlassError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::LibraryUnavailable(msg.into())
    }

    pub fn shader(msg: impl Into<String>) -> Self {
        Self::Shader(msg.into())
    }

    pub fn js(msg: impl Into<String>) -> Self {
        Self::Js(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GlassError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GlassError> for wasm_bindgen::JsValue {
    fn from(err: GlassError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
