pub mod cache;
pub mod config;
pub mod error;
pub mod json;
pub mod model;
pub mod palette;
pub mod geometry {
    pub mod bbox;
    pub mod flatten;
    pub mod limits;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod adjacency;
    pub mod greedy;
    pub mod hash;
}

pub use algorithms::adjacency::{build_adjacency, build_adjacency_with, AdjacencyGraph, AdjacencyOptions};
pub use algorithms::greedy::{color_graph, color_graph_report, ColoringReport, GreedyMode};
pub use algorithms::hash::{assign_by_hash, string_hash};
pub use cache::{id_set_fingerprint, CacheKey, CacheStats, ColorCache};
pub use config::{ColoringConfig, Strategy};
pub use error::{Error, Result};
pub use model::{validate_unique_ids, ColorAssignment, Geometry, Region, RegionProperties};
pub use palette::{Color, Palette};

use tracing::debug;

/// Runs the configured strategy over a region list. Holds no per-call state.
#[derive(Clone, Debug, Default)]
pub struct ColorEngine {
    config: ColoringConfig,
}

impl ColorEngine {
    pub fn new(config: ColoringConfig) -> ColorEngine { ColorEngine { config } }

    pub fn config(&self) -> &ColoringConfig { &self.config }

    pub fn palette(&self) -> &Palette { &self.config.palette }

    pub fn strategy(&self) -> Strategy { self.config.strategy }

    /// A fresh cache sized by the config.
    pub fn new_cache(&self) -> ColorCache { ColorCache::new(self.config.cache_capacity) }

    pub fn adjacency(&self, regions: &[Region]) -> AdjacencyGraph {
        build_adjacency_with(regions, &AdjacencyOptions { precision: self.config.precision })
    }

    pub fn assign(&self, regions: &[Region]) -> ColorAssignment { self.assign_with_report(regions).0 }

    /// The report is only produced by the adjacency strategies.
    pub fn assign_with_report(&self, regions: &[Region]) -> (ColorAssignment, Option<ColoringReport>) {
        let mode = match self.config.strategy {
            Strategy::Hash => return (assign_by_hash(regions.iter().map(|r| r.id.as_str()), self.palette()), None),
            Strategy::Adjacency => GreedyMode::Balanced,
            Strategy::AdjacencyFirstFit => GreedyMode::FirstFit,
        };
        let graph = self.adjacency(regions);
        let (assignment, report) = color_graph_report(&graph, self.palette(), mode);
        (assignment, Some(report))
    }

    /// Reuses `cache` when this exact id set was already colored with this
    /// palette, strategy and theme; otherwise recolors and refreshes it.
    pub fn assign_cached(&self, cache: &mut ColorCache, theme: &str, regions: &[Region]) -> ColorAssignment {
        let ids: Vec<&str> = regions.iter().map(|r| r.id.as_str()).collect();
        let key = self.cache_key(&ids, theme);
        if let Some(hit) = cache.lookup_assignment(&key, &ids) {
            debug!(regions = ids.len(), theme, "color cache hit");
            return hit;
        }
        let assignment = self.assign(regions);
        cache.insert_assignment(&key, &assignment);
        assignment
    }

    fn cache_key(&self, ids: &[&str], theme: &str) -> CacheKey {
        CacheKey::new(self.palette().fingerprint(), id_set_fingerprint(ids), format!("{}/{}", self.config.strategy.as_str(), theme))
    }
}
