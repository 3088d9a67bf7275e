//! GeoJSON-shaped ingestion: features already decoded by the page (e.g. from
//! TopoJSON) arrive here as `serde_json::Value`s and become [`Region`]s.
//!
//! Parsing is lenient about geometry (unsupported types and non-numeric
//! positions contribute nothing) and strict about size limits.

use crate::error::{Error, Result};
use crate::geometry::limits;
use crate::model::{resolve_id, Geometry, Region, RegionProperties, Ring};
use serde_json::{Map, Value};

/// Accepts a `FeatureCollection`, a single `Feature`, or a bare array of features.
pub fn regions_from_geojson(v: &Value) -> Result<Vec<Region>> {
    let features: Vec<&Value> = match v {
        Value::Array(items) => items.iter().collect(),
        Value::Object(o) => match o.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => o
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| Error::InvalidInput("FeatureCollection without a features array".into()))?
                .iter()
                .collect(),
            Some("Feature") => vec![v],
            other => return Err(Error::InvalidInput(format!("unsupported top-level type {other:?}"))),
        },
        _ => return Err(Error::InvalidInput("expected a feature collection or an array of features".into())),
    };
    if features.len() > limits::MAX_REGIONS {
        return Err(Error::LimitExceeded { what: "regions", max: limits::MAX_REGIONS, got: features.len() });
    }

    let mut total_vertices = 0usize;
    let mut out = Vec::with_capacity(features.len());
    for (index, f) in features.into_iter().enumerate() {
        let region = region_from_feature(f, index)?;
        total_vertices += vertex_count(&region);
        if total_vertices > limits::MAX_VERTICES_TOTAL {
            return Err(Error::LimitExceeded { what: "vertices", max: limits::MAX_VERTICES_TOTAL, got: total_vertices });
        }
        out.push(region);
    }
    Ok(out)
}

pub fn regions_from_geojson_str(s: &str) -> Result<Vec<Region>> {
    let v: Value = serde_json::from_str(s)?;
    regions_from_geojson(&v)
}

/// One feature; `index` is its position in the list and the last id fallback.
pub fn region_from_feature(f: &Value, index: usize) -> Result<Region> {
    let obj = f
        .as_object()
        .ok_or_else(|| Error::InvalidInput(format!("feature {index} is not an object")))?;
    let properties = obj.get("properties").and_then(Value::as_object).map(parse_properties).unwrap_or_default();
    let id = resolve_id(id_string(obj.get("id")).as_deref(), properties.id.as_deref(), index);
    let geometry = obj.get("geometry").and_then(parse_geometry);
    let region = Region { id, geometry, properties };
    let n = vertex_count(&region);
    if n > limits::MAX_VERTICES_PER_REGION {
        return Err(Error::LimitExceeded { what: "vertices per region", max: limits::MAX_VERTICES_PER_REGION, got: n });
    }
    Ok(region)
}

// Strings as-is, integral numbers without a fraction ("28079" and 28079 resolve alike)
fn id_string(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => n.to_string(),
        }),
        _ => None,
    }
}

fn parse_properties(obj: &Map<String, Value>) -> RegionProperties {
    let mut props = RegionProperties::default();
    for (k, v) in obj {
        match (k.as_str(), v) {
            ("id", _) if id_string(Some(v)).is_some() => props.id = id_string(Some(v)),
            ("name", Value::String(s)) => props.name = Some(s.clone()),
            ("province", Value::String(s)) => props.province = Some(s.clone()),
            _ => {
                props.extra.insert(k.clone(), v.clone());
            }
        }
    }
    props
}

/// `None` for missing, null or non-polygonal geometry.
pub fn parse_geometry(v: &Value) -> Option<Geometry> {
    let obj = v.as_object()?;
    let coords = obj.get("coordinates")?.as_array()?;
    match obj.get("type")?.as_str()? {
        "Polygon" => Some(Geometry::Polygon(parse_rings(coords))),
        "MultiPolygon" => Some(Geometry::MultiPolygon(
            coords.iter().filter_map(Value::as_array).map(|p| parse_rings(p)).collect(),
        )),
        _ => None,
    }
}

fn parse_rings(rings: &[Value]) -> Vec<Ring> {
    rings
        .iter()
        .filter_map(Value::as_array)
        .map(|ring| ring.iter().filter_map(parse_position).collect())
        .collect()
}

// [x, y, ...] with numeric x and y; extra ordinates (altitude) are ignored
fn parse_position(v: &Value) -> Option<[f64; 2]> {
    let a = v.as_array()?;
    match (a.first()?.as_f64(), a.get(1)?.as_f64()) {
        (Some(x), Some(y)) => Some([x, y]),
        _ => None,
    }
}

fn vertex_count(r: &Region) -> usize {
    r.geometry.as_ref().map_or(0, |g| g.rings().map(Vec::len).sum())
}
