use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geometry::tolerance::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::palette::Palette;

/// Which assigner the engine runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Adjacency graph + balanced greedy coloring.
    #[default]
    Adjacency,
    /// Adjacency graph + first-fit greedy coloring.
    AdjacencyFirstFit,
    /// Stable hash of the id; no geometry work.
    Hash,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Adjacency => "adjacency",
            Strategy::AdjacencyFirstFit => "adjacency-first-fit",
            Strategy::Hash => "hash",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "adjacency" | "greedy" => Ok(Strategy::Adjacency),
            "adjacency-first-fit" | "first-fit" => Ok(Strategy::AdjacencyFirstFit),
            "hash" => Ok(Strategy::Hash),
            _ => Err(Error::InvalidConfig(format!("unknown strategy '{s}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColoringConfig {
    pub palette: Palette,
    pub strategy: Strategy,
    /// Decimal places for shared-vertex matching.
    pub precision: u32,
    /// Capacity of caches made by [`crate::ColorEngine::new_cache`]; 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        ColoringConfig {
            palette: Palette::default(),
            strategy: Strategy::default(),
            precision: DEFAULT_PRECISION,
            cache_capacity: 4096,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    // either a list of hex strings or the name of a bundled scheme
    palette: Option<Value>,
    strategy: Option<Strategy>,
    precision: Option<u32>,
    cache_capacity: Option<usize>,
}

impl ColoringConfig {
    pub fn from_json(s: &str) -> Result<ColoringConfig> {
        let v: Value = serde_json::from_str(s)?;
        ColoringConfig::from_json_value(v)
    }

    /// Missing keys take their defaults; palettes from config are hex-validated.
    pub fn from_json_value(v: Value) -> Result<ColoringConfig> {
        let raw: RawConfig = serde_json::from_value(v).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let mut cfg = ColoringConfig::default();
        match raw.palette {
            None => {}
            Some(Value::String(name)) => {
                cfg.palette = Palette::named(&name).ok_or_else(|| Error::InvalidPalette(format!("unknown palette '{name}'")))?;
            }
            Some(Value::Array(items)) => {
                let entries = items
                    .into_iter()
                    .map(|i| match i {
                        Value::String(s) => Ok(s),
                        other => Err(Error::InvalidPalette(format!("palette entry {other} is not a string"))),
                    })
                    .collect::<Result<Vec<String>>>()?;
                cfg.palette = Palette::validated(entries)?;
            }
            Some(other) => return Err(Error::InvalidPalette(format!("expected array or name, got {other}"))),
        }
        if let Some(s) = raw.strategy {
            cfg.strategy = s;
        }
        if let Some(p) = raw.precision {
            if p > MAX_PRECISION {
                return Err(Error::InvalidConfig(format!("precision {p} exceeds {MAX_PRECISION}")));
            }
            cfg.precision = p;
        }
        if let Some(c) = raw.cache_capacity {
            cfg.cache_capacity = c;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_missing_keys() {
        let cfg = ColoringConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ColoringConfig::default());
        assert_eq!(cfg.palette.len(), 8);
    }

    #[test]
    fn full_config() {
        let cfg = ColoringConfig::from_json_value(json!({
            "palette": ["#1b9e77", "#d95f02", "#7570b3"],
            "strategy": "hash",
            "precision": 4,
            "cache_capacity": 0
        }))
        .unwrap();
        assert_eq!(cfg.palette.len(), 3);
        assert_eq!(cfg.strategy, Strategy::Hash);
        assert_eq!(cfg.precision, 4);
        assert_eq!(cfg.cache_capacity, 0);
    }

    #[test]
    fn named_palette() {
        let cfg = ColoringConfig::from_json_value(json!({"palette": "set3", "strategy": "adjacency-first-fit"})).unwrap();
        assert_eq!(cfg.palette.len(), 12);
        assert_eq!(cfg.strategy, Strategy::AdjacencyFirstFit);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(ColoringConfig::from_json_value(json!({"palette": ["red"]})), Err(Error::InvalidColor(_))));
        assert!(matches!(ColoringConfig::from_json_value(json!({"palette": [1]})), Err(Error::InvalidPalette(_))));
        assert!(matches!(ColoringConfig::from_json_value(json!({"palette": "nope"})), Err(Error::InvalidPalette(_))));
        assert!(matches!(ColoringConfig::from_json_value(json!({"strategy": "sat"})), Err(Error::InvalidConfig(_))));
        assert!(matches!(ColoringConfig::from_json_value(json!({"precision": 40})), Err(Error::InvalidConfig(_))));
        assert!(matches!(ColoringConfig::from_json_value(json!({"precision": MAX_PRECISION + 1})), Err(Error::InvalidConfig(_))));
        assert_eq!(ColoringConfig::from_json_value(json!({"precision": MAX_PRECISION})).unwrap().precision, MAX_PRECISION);
        assert!(matches!(ColoringConfig::from_json_value(json!({"colour": 1})), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn strategy_parses_aliases() {
        assert_eq!("greedy".parse::<Strategy>().unwrap(), Strategy::Adjacency);
        assert_eq!("first-fit".parse::<Strategy>().unwrap(), Strategy::AdjacencyFirstFit);
        assert!("random".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Hash.as_str(), "hash");
    }
}
