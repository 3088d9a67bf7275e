use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// One closed ring of `[x, y]` positions (first == last is not required).
pub type Ring = Vec<[f64; 2]>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Geometry::Polygon(rings) => Box::new(rings.iter()),
            Geometry::MultiPolygon(polys) => Box::new(polys.iter().flatten()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    // administrative grouping, e.g. the province a municipality belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A colorable map entity. Geometry is read-only to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: RegionProperties,
}

impl Region {
    pub fn new(id: impl Into<String>, geometry: Option<Geometry>) -> Region {
        Region { id: id.into(), geometry, properties: RegionProperties::default() }
    }

    pub fn polygon(id: impl Into<String>, rings: Vec<Ring>) -> Region {
        Region::new(id, Some(Geometry::Polygon(rings)))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Region {
        self.properties.name = Some(name.into());
        self
    }
}

/// First defined value wins: explicit id, then `properties.id`, then the list index.
pub fn resolve_id(id: Option<&str>, props_id: Option<&str>, index: usize) -> String {
    id.or(props_id).map(str::to_string).unwrap_or_else(|| index.to_string())
}

/// Caller-side check that no two input regions share an id. The engine itself
/// collapses duplicates into one node, which callers should not rely on.
pub fn validate_unique_ids(regions: &[Region]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(regions.len());
    for (i, r) in regions.iter().enumerate() {
        if let Some(&first) = seen.get(r.id.as_str()) {
            return Err(Error::DuplicateId { id: r.id.clone(), first, second: i });
        }
        seen.insert(&r.id, i);
    }
    Ok(())
}

/// Region id -> palette entry. Rebuilt on every pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorAssignment {
    colors: BTreeMap<String, String>,
}

impl ColorAssignment {
    pub fn new() -> ColorAssignment { ColorAssignment::default() }

    pub(crate) fn insert(&mut self, id: String, color: String) { self.colors.insert(id, color); }

    pub fn get(&self, id: &str) -> Option<&str> { self.colors.get(id).map(String::as_str) }

    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of ids per color, keyed by color string.
    pub fn usage(&self) -> BTreeMap<&str, usize> {
        let mut out = BTreeMap::new();
        for c in self.colors.values() {
            *out.entry(c.as_str()).or_insert(0) += 1;
        }
        out
    }

    pub fn into_map(self) -> BTreeMap<String, String> { self.colors }
}

impl FromIterator<(String, String)> for ColorAssignment {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        ColorAssignment { colors: iter.into_iter().collect() }
    }
}
