use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

pub use api::*;

/// Engine plus a caller-owned color cache kept alive across re-renders.
#[wasm_bindgen]
pub struct ColorSession {
    pub(crate) engine: mapcolor::ColorEngine,
    pub(crate) cache: mapcolor::ColorCache,
}

impl ColorSession {
    pub fn rs_new(config: mapcolor::ColoringConfig) -> ColorSession {
        let engine = mapcolor::ColorEngine::new(config);
        let cache = engine.new_cache();
        ColorSession { engine, cache }
    }
}
