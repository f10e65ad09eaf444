//! Page-load wiring: animation frame + DOMContentLoaded, and the page-global
//! toggle entry point.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{browser_controller, load_page_config, BrowserController};
use crate::config::ThemeConfig;
use crate::controller::LifecycleSignal;
use crate::preference::ThemeMode;

type SharedController = Rc<RefCell<BrowserController>>;

thread_local! {
    static INSTALLED: RefCell<Option<SharedController>> = const { RefCell::new(None) };
}

/// Controller installed for this page, if any.
pub fn installed() -> Option<SharedController> {
    INSTALLED.with(|slot| slot.borrow().clone())
}

/// Run the bootstrap for this page and register both lifecycle callbacks.
///
/// Idempotent per page: a second call returns the controller installed by
/// the first.
pub fn install(config: ThemeConfig) -> Result<SharedController> {
    if let Some(existing) = installed() {
        return Ok(existing);
    }

    let controller: SharedController = Rc::new(RefCell::new(browser_controller(config)?));
    let plan = controller.borrow_mut().bootstrap();
    INSTALLED.with(|slot| *slot.borrow_mut() = Some(controller.clone()));

    let window = web_sys::window().ok_or_else(|| anyhow!("window is not available"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("document is not available"))?;

    if plan.apply_dark {
        let on_frame = {
            let controller = controller.clone();
            Closure::once_into_js(move |_timestamp: f64| {
                controller
                    .borrow_mut()
                    .on_lifecycle(LifecycleSignal::AnimationFrame);
            })
        };
        // Browsers without requestAnimationFrame still get DOMContentLoaded
        if let Err(e) = window.request_animation_frame(on_frame.unchecked_ref()) {
            tracing::debug!("requestAnimationFrame unavailable: {:?}", e);
        }
    }

    if document.ready_state() == "loading" {
        let on_ready = {
            let controller = controller.clone();
            Closure::once_into_js(move |_event: web_sys::Event| {
                controller
                    .borrow_mut()
                    .on_lifecycle(LifecycleSignal::DomContentLoaded);
            })
        };
        window
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|e| anyhow!("Failed to listen for DOMContentLoaded: {:?}", e))?;
    } else {
        // Installed after the event already fired
        controller
            .borrow_mut()
            .on_lifecycle(LifecycleSignal::DomContentLoaded);
    }

    Ok(controller)
}

/// `install` with configuration read from the page.
#[wasm_bindgen(js_name = installDarkMode)]
pub fn install_from_page() -> Result<(), JsValue> {
    install_shared().map(|_| ()).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn install_shared() -> Result<SharedController> {
    install(load_page_config())
}

/// Toggle the theme; for `onclick` handlers in plain HTML.
///
/// Returns whether the page is dark afterwards.
#[wasm_bindgen(js_name = toggleDarkMode)]
pub fn toggle_dark_mode() -> bool {
    let controller = match installed() {
        Some(controller) => controller,
        None => match install_shared() {
            Ok(controller) => controller,
            Err(e) => {
                tracing::warn!("Dark mode toggle unavailable: {}", e);
                return false;
            }
        },
    };
    let mode: ThemeMode = controller.borrow_mut().toggle();
    mode.is_dark()
}
