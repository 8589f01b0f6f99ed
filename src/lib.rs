#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Waving-flag shader demo.
//!
//! The platform-independent core (geometry, uniforms, camera, orbit controls,
//! debug-panel model, render context) builds and tests on the host; the
//! WebGL2 and DOM bindings only compile for `wasm32`.

pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod params;
pub mod scene;
pub mod shader;
pub mod textures;
pub mod uniforms;
pub mod viewport;

pub use config::DemoConfig;
pub use context::{Demo, Frame, Update, UpdateSender};
pub use error::{DemoError, Result};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::error::DemoError;
    use crate::{Demo, DemoConfig};

    mod gl;
    mod input;
    mod panel;
    mod render;
    mod texture;

    /// Canvas the demo draws into.
    const CANVAS_ID: &str = "webgl";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        console_log::init_with_level(log::Level::Info).ok();

        start().map_err(|err| {
            log::error!("startup failed: {err}");
            JsValue::from(err)
        })
    }

    fn start() -> Result<(), DemoError> {
        let window = web_sys::window().ok_or(DemoError::MissingElement("window"))?;
        let document = window.document().ok_or(DemoError::MissingElement("document"))?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(DemoError::MissingElement("canvas"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| DemoError::MissingElement("canvas"))?;

        let demo = Demo::new(DemoConfig::default(), &mut rand::thread_rng())?;
        let renderer = gl::GlRenderer::new(&canvas, demo.scene())?;
        panel::build(&document, demo.config(), demo.uniforms(), demo.updates())?;
        input::attach(&canvas, demo.updates())?;
        render::start(window, canvas, demo, renderer)?;

        log::info!("flag demo running");
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
