//! Animated "fluted glass" backdrop for page elements.
//!
//! Any element carrying `data-glass` (with a value other than `"false"`)
//! receives a WebGL2 canvas that renders two drifting color blobs seen
//! through vertical glass flutes. Everything except the `wasm` module is
//! plain Rust and runs on the host.

pub mod clock;
pub mod color;
pub mod config;
pub mod debounce;
pub mod effect;
pub mod error;
pub mod lookup;
pub mod registry;
pub mod scan;
pub mod shade;
pub mod shader;
pub mod surface;

pub use config::{GlassConfig, ShaderMode};
pub use error::{GlassError, GlassResult};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod gl;
    pub(crate) mod page;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        console_log::init_with_level(level).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if document.ready_state() == "complete" {
            page::init_all()?;
            return Ok(());
        }

        let on_load = Closure::wrap(Box::new(move || {
            if let Err(e) = page::init_all() {
                log::error!("glass init aborted: {e:?}");
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        on_load.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::page::{init_all, instance_count};
