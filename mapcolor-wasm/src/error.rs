use crate::interop::{new_obj, set_kv};
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Envelope for a core error; structured variants carry their fields as `data`.
pub fn from_core(e: &mapcolor::Error) -> JsValue {
    let data = match e {
        mapcolor::Error::LimitExceeded { what, max, got } => {
            let d = new_obj();
            set_kv(&d, "what", &JsValue::from_str(what));
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            set_kv(&d, "got", &JsValue::from_f64(*got as f64));
            Some(d.into())
        }
        mapcolor::Error::DuplicateId { id, first, second } => {
            let d = new_obj();
            set_kv(&d, "id", &JsValue::from_str(id));
            set_kv(&d, "first", &JsValue::from_f64(*first as f64));
            set_kv(&d, "second", &JsValue::from_f64(*second as f64));
            Some(d.into())
        }
        _ => None,
    };
    err(e.code(), e.to_string(), data)
}

#[inline]
pub fn invalid_input(what: &str) -> JsValue {
    err("invalid_input", format!("{} could not be read", what), None)
}

#[inline]
pub fn invalid_strategy(got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("invalid_strategy", "strategy must be 'adjacency', 'adjacency-first-fit' or 'hash'", Some(d.into()))
}
