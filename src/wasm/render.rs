use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::error;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, Window};

use super::gl::GlSurface;
use crate::config::DEBOUNCE_MS;
use crate::registry::EffectHandle;
use crate::surface::SurfaceSize;

/// Wire one instance to the page: a debounced resize listener and an
/// animation-frame loop that runs for the lifetime of the page.
pub fn start(
    window: &Window,
    element: Element,
    effect: EffectHandle<GlSurface>,
) -> Result<(), JsValue> {
    watch_resize(window, element, Rc::clone(&effect))?;
    animate(window, effect)
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn watch_resize(
    window: &Window,
    element: Element,
    effect: EffectHandle<GlSurface>,
) -> Result<(), JsValue> {
    // Fires once the window has been quiet for DEBOUNCE_MS.
    let flush = {
        let effect = Rc::clone(&effect);
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let mut instance = effect.borrow_mut();
            // The timer only survives a quiet window, so the deadline has passed
            // even if the clock granularity says otherwise.
            let now = now_ms(&window).max(instance.resize_deadline().unwrap_or(0.0));
            if let Err(e) = instance.flush_resize(now) {
                error!("glass resize failed: {e}");
            }
        }) as Box<dyn FnMut()>)
    };

    let timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let on_resize = {
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let rect = element.get_bounding_client_rect();
            effect
                .borrow_mut()
                .observe_resize(SurfaceSize::new(rect.width(), rect.height()), now_ms(&window));

            if let Some(id) = timer.take() {
                window.clear_timeout_with_handle(id);
            }
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                flush.as_ref().unchecked_ref(),
                DEBOUNCE_MS as i32,
            ) {
                Ok(id) => timer.set(Some(id)),
                Err(e) => error!("glass resize timer failed: {e:?}"),
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn animate(window: &Window, effect: EffectHandle<GlSurface>) -> Result<(), JsValue> {
    // The frame callback re-arms itself through `f`, which is filled once the
    // closure exists. A frame error ends the loop for this instance only.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);
    let loop_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if let Err(e) = effect.borrow_mut().frame(timestamp) {
            error!("glass frame failed, stopping: {e}");
            return;
        }

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = loop_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                error!("glass could not schedule frame: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}
