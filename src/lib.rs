#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated single-page portfolio compiled to WebAssembly.
//!
//! The motion, form and notification logic is target-independent and tested
//! on the host; the `wasm` module wires it to the DOM and WebGL2.

pub mod config;
pub mod cursor;
pub mod decor;
pub mod easing;
pub mod error;
pub mod form;
pub mod notify;
pub mod relay;
pub mod scroll;
pub mod sections;
pub mod shader;
pub mod tween;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod contact;
    mod cursor;
    mod dom;
    mod page;
    mod relay;
    mod render;
    mod sections;
    mod toaster;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("ink")
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let root = document.get_element_by_id("app").ok_or("#app not found")?;

        page::mount(window, document, canvas, root)?;
        Ok(())
    }
}
