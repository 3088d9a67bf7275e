use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}

// Plain objects instead of ES Maps so the page can index colors by id
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}

pub fn warn(msg: &str) { web_sys::console::warn_1(&JsValue::from_str(msg)); }
