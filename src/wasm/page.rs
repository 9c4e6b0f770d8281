use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::gl::{GlSurface, WebGlFactory};
use super::render;
use crate::config::{self, GlassConfig};
use crate::registry::EffectRegistry;
use crate::scan::{scan, Candidate};
use crate::surface::SurfaceSize;

thread_local! {
    static REGISTRY: RefCell<EffectRegistry<Element, GlSurface>> = RefCell::new(EffectRegistry::new());
}

/// Initialize every marked element that does not have an instance yet.
///
/// Safe to call again after adding elements to the page; existing
/// instances are left alone. Returns the number of instances created.
#[wasm_bindgen(js_name = initAll)]
pub fn init_all() -> Result<u32, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let selector = format!("[{}]", config::MARKER_ATTR);
    let nodes = document.query_selector_all(&selector)?;
    let candidates = (0..nodes.length())
        .filter_map(|i| nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()))
        .map(|element| {
            let rect = element.get_bounding_client_rect();
            Candidate {
                marker: element.get_attribute(config::MARKER_ATTR),
                size: SurfaceSize::new(rect.width(), rect.height()),
                config: GlassConfig::from_attributes(|name| element.get_attribute(name)),
                target: element,
            }
        });

    let created = REGISTRY.with(|registry| {
        scan(
            &mut registry.borrow_mut(),
            WebGlFactory::detect(&window),
            candidates,
        )
    });

    let count = created.len() as u32;
    for (element, effect) in created {
        render::start(&window, element, effect)?;
    }
    Ok(count)
}

/// Number of live instances.
#[wasm_bindgen(js_name = instanceCount)]
pub fn instance_count() -> u32 {
    REGISTRY.with(|registry| registry.borrow().len() as u32)
}
