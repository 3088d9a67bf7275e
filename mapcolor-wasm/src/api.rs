use crate::{error, interop, ColorSession};
use mapcolor::{
    assign_by_hash, json::regions_from_geojson, validate_unique_ids, ColorEngine, ColoringConfig, Palette, Region,
    Strategy,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Every entry point taking features rejects duplicate ids the same way
fn read_regions(features: JsValue) -> Result<Vec<Region>, JsValue> {
    let v = serde_wasm_bindgen::from_value::<serde_json::Value>(features)
        .map_err(|_| error::invalid_input("features"))?;
    let regions = regions_from_geojson(&v).map_err(|e| error::from_core(&e))?;
    validate_unique_ids(&regions).map_err(|e| error::from_core(&e))?;
    Ok(regions)
}

// null/undefined -> default palette; any array of strings is taken as-is
fn read_palette(palette: JsValue) -> Result<Palette, JsValue> {
    if palette.is_null() || palette.is_undefined() {
        return Ok(Palette::default());
    }
    if let Some(name) = palette.as_string() {
        return Palette::named(&name)
            .ok_or_else(|| error::from_core(&mapcolor::Error::InvalidPalette(format!("unknown palette '{name}'"))));
    }
    let entries: Vec<String> = serde_wasm_bindgen::from_value(palette)
        .map_err(|_| error::err("invalid_palette", "palette must be an array of color strings", None))?;
    if entries.len() > mapcolor::geometry::limits::MAX_PALETTE_LEN {
        return Err(error::from_core(&mapcolor::Error::LimitExceeded {
            what: "palette",
            max: mapcolor::geometry::limits::MAX_PALETTE_LEN,
            got: entries.len(),
        }));
    }
    Ok(Palette::new(entries))
}

fn read_strategy(strategy: &str) -> Result<Strategy, JsValue> {
    strategy.parse().map_err(|_| error::invalid_strategy(strategy))
}

fn color_regions_impl(features: JsValue, palette: JsValue, strategy: &str) -> Result<JsValue, JsValue> {
    let regions = read_regions(features)?;
    let config = ColoringConfig { palette: read_palette(palette)?, strategy: read_strategy(strategy)?, ..Default::default() };
    let (assignment, report) = ColorEngine::new(config).assign_with_report(&regions);
    if let Some(r) = report.filter(|r| r.fallbacks > 0) {
        interop::warn(&format!(
            "mapcolor: palette smaller than needed, {} regions reuse a neighbor's color",
            r.fallbacks
        ));
    }
    Ok(interop::to_js(&assignment))
}

/// `{ id: color }`, or `null` when the input cannot be read.
#[wasm_bindgen]
pub fn color_regions(features: JsValue, palette: JsValue, strategy: &str) -> JsValue {
    color_regions_impl(features, palette, strategy).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn color_regions_res(features: JsValue, palette: JsValue, strategy: &str) -> JsValue {
    match color_regions_impl(features, palette, strategy) {
        Ok(v) => error::ok(v),
        Err(e) => e,
    }
}

/// `{ id: [neighbor ids] }` in feature order.
#[wasm_bindgen]
pub fn build_adjacency(features: JsValue) -> JsValue {
    match read_regions(features) {
        Ok(regions) => interop::to_js(&mapcolor::build_adjacency(&regions)),
        Err(_) => JsValue::NULL,
    }
}

#[wasm_bindgen]
pub fn build_adjacency_res(features: JsValue) -> JsValue {
    match read_regions(features) {
        Ok(regions) => error::ok(interop::to_js(&mapcolor::build_adjacency(&regions))),
        Err(e) => e,
    }
}

/// Hash assignment straight from an id list; no geometry needed.
#[wasm_bindgen]
pub fn hash_colors(ids: JsValue, palette: JsValue) -> JsValue {
    let Ok(ids) = serde_wasm_bindgen::from_value::<Vec<String>>(ids) else { return JsValue::NULL };
    match read_palette(palette) {
        Ok(p) => interop::to_js(&assign_by_hash(&ids, &p)),
        Err(_) => JsValue::NULL,
    }
}

#[wasm_bindgen]
impl ColorSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ColorSession {
        ColorSession::rs_new(ColoringConfig::default())
    }

    /// Replace the config (same JSON shape as `ColoringConfig::from_json`); drops the cache.
    pub fn configure_res(&mut self, config: JsValue) -> JsValue {
        let v = match serde_wasm_bindgen::from_value::<serde_json::Value>(config) {
            Ok(v) => v,
            Err(_) => return error::invalid_input("config"),
        };
        match ColoringConfig::from_json_value(v) {
            Ok(cfg) => {
                *self = ColorSession::rs_new(cfg);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_core(&e),
        }
    }

    pub fn strategy(&self) -> String { self.engine.strategy().as_str().to_string() }

    pub fn colors(&mut self, features: JsValue, theme: &str) -> JsValue {
        match self.colors_impl(features, theme) {
            Ok(v) => v,
            Err(_) => JsValue::NULL,
        }
    }

    pub fn colors_res(&mut self, features: JsValue, theme: &str) -> JsValue {
        match self.colors_impl(features, theme) {
            Ok(v) => error::ok(v),
            Err(e) => e,
        }
    }

    /// `{ hits, misses, evictions, len, capacity }`
    pub fn cache_stats(&self) -> JsValue {
        let s = self.cache.stats();
        let obj = interop::new_obj();
        interop::set_kv(&obj, "hits", &JsValue::from_f64(s.hits as f64));
        interop::set_kv(&obj, "misses", &JsValue::from_f64(s.misses as f64));
        interop::set_kv(&obj, "evictions", &JsValue::from_f64(s.evictions as f64));
        interop::set_kv(&obj, "len", &JsValue::from_f64(self.cache.len() as f64));
        interop::set_kv(&obj, "capacity", &JsValue::from_f64(self.cache.capacity() as f64));
        obj.into()
    }

    pub fn clear_cache(&mut self) { self.cache.clear(); }
}

impl ColorSession {
    fn colors_impl(&mut self, features: JsValue, theme: &str) -> Result<JsValue, JsValue> {
        let regions = read_regions(features)?;
        let assignment = self.engine.assign_cached(&mut self.cache, theme, &regions);
        Ok(interop::to_js(&assignment))
    }
}

impl Default for ColorSession {
    fn default() -> Self { ColorSession::new() }
}
