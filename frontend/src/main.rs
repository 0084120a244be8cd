use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

mod app;
mod config;
mod error;
mod utils {
    pub mod dom;
    pub mod geometry;
    pub mod timing;
}
mod effects {
    pub mod carousel;
    pub mod decor;
    pub mod devices;
    pub mod parallax;
    pub mod progress;
    pub mod reveal;
    pub mod sections;
    pub mod smooth_scroll;
}

use app::PageEffects;
use error::EffectResult;
use utils::dom;

// Hidden host for the effects component, so the page markup is untouched.
fn create_root() -> EffectResult<Element> {
    let document = dom::document()?;
    let root = dom::create_div(&document, "")?;
    root.set_id(config::ROOT_ID);
    dom::set_style(&root, "display", "none");
    dom::body(&document)?.append_child(&root)?;
    Ok(root.into())
}

fn mount() {
    match create_root() {
        Ok(root) => {
            yew::Renderer::<PageEffects>::with_root(root).render();
        }
        Err(e) => log::warn!("Could not mount page effects: {}", e),
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(config::log_level()));

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            log::warn!("Page effects disabled: {}", e);
            return;
        }
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(mount);
        if let Err(e) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            log::warn!("Could not wait for DOMContentLoaded: {:?}", e);
        }
    } else {
        mount();
    }
}
