use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::{
    geometry::{
        bbox::BBox,
        flatten::region_positions,
        tolerance::{quant_scale, quantize, DEFAULT_PRECISION},
    },
    model::Region,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjacencyOptions {
    /// Decimal places kept when matching shared vertices.
    pub precision: u32,
}

impl Default for AdjacencyOptions {
    fn default() -> Self { AdjacencyOptions { precision: DEFAULT_PRECISION } }
}

/// Symmetric neighbor graph over region ids, kept in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    adj: Vec<BTreeSet<usize>>,
}

impl AdjacencyGraph {
    pub fn new() -> AdjacencyGraph { AdjacencyGraph::default() }

    /// Build from an externally computed edge list. Edges naming unknown ids
    /// and self-loops are ignored.
    pub fn from_edges<S: AsRef<str>>(ids: &[S], edges: &[(S, S)]) -> AdjacencyGraph {
        let mut g = AdjacencyGraph::new();
        for id in ids {
            g.add_node(id.as_ref());
        }
        for (a, b) in edges {
            if let (Some(&ia), Some(&ib)) = (g.index.get(a.as_ref()), g.index.get(b.as_ref())) {
                g.link(ia, ib);
            }
        }
        g
    }

    /// Returns the node index; an already-known id keeps its original slot.
    pub(crate) fn add_node(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), i);
        self.adj.push(BTreeSet::new());
        i
    }

    pub(crate) fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.adj[a].insert(b);
        self.adj[b].insert(a);
    }

    pub(crate) fn neighbor_indices(&self, i: usize) -> &BTreeSet<usize> { &self.adj[i] }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[String] { &self.ids }

    pub fn contains(&self, id: &str) -> bool { self.index.contains_key(id) }

    pub fn neighbors(&self, id: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let i = *self.index.get(id)?;
        Some(self.adj[i].iter().map(move |&j| self.ids[j].as_str()))
    }

    pub fn degree(&self, id: &str) -> Option<usize> { self.index.get(id).map(|&i| self.adj[i].len()) }

    pub fn max_degree(&self) -> usize { self.adj.iter().map(BTreeSet::len).max().unwrap_or(0) }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize { self.adj.iter().map(BTreeSet::len).sum::<usize>() / 2 }

    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.adj[ia].contains(&ib),
            _ => false,
        }
    }

    pub fn to_map(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), self.adj[i].iter().map(|&j| self.ids[j].clone()).collect()))
            .collect()
    }
}

// { "id": ["neighbor", ...], ... } in insertion order
impl Serialize for AdjacencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for (i, id) in self.ids.iter().enumerate() {
            let ns: Vec<&str> = self.adj[i].iter().map(|&j| self.ids[j].as_str()).collect();
            map.serialize_entry(id, &ns)?;
        }
        map.end()
    }
}

pub fn build_adjacency(regions: &[Region]) -> AdjacencyGraph {
    build_adjacency_with(regions, &AdjacencyOptions::default())
}

/// Bounding-box prune, then shared-vertex test on the survivors.
///
/// Two regions are neighbors when at least one vertex coincides after
/// rounding to `opts.precision` decimals. Edges that touch without a common
/// vertex are not detected.
pub fn build_adjacency_with(regions: &[Region], opts: &AdjacencyOptions) -> AdjacencyGraph {
    let mut g = AdjacencyGraph::new();
    let node_of: Vec<usize> = regions.iter().map(|r| g.add_node(&r.id)).collect();
    let positions: Vec<Vec<[f64; 2]>> = regions.iter().map(region_positions).collect();
    let boxes: Vec<Option<BBox>> = positions.iter().map(|p| BBox::from_points(p)).collect();

    let scale = quant_scale(opts.precision);
    // vertex sets are only built for regions that survive the prune at least once
    let keys: Vec<OnceCell<HashSet<(i64, i64)>>> = (0..regions.len()).map(|_| OnceCell::new()).collect();
    let vertex_keys = |i: usize| keys[i].get_or_init(|| positions[i].iter().map(|&p| quantize(p, scale)).collect());

    let mut candidates = 0usize;
    for i in 0..regions.len() {
        let Some(bi) = boxes[i] else { continue };
        for j in (i + 1)..regions.len() {
            let Some(bj) = boxes[j] else { continue };
            if !bi.intersects(&bj) {
                continue;
            }
            candidates += 1;
            let (ni, nj) = (node_of[i], node_of[j]);
            if ni == nj || g.adj[ni].contains(&nj) {
                continue;
            }
            let (ki, kj) = (vertex_keys(i), vertex_keys(j));
            let (small, large) = if ki.len() <= kj.len() { (ki, kj) } else { (kj, ki) };
            if small.iter().any(|k| large.contains(k)) {
                g.link(ni, nj);
            }
        }
    }
    debug!(
        regions = regions.len(),
        nodes = g.len(),
        candidates,
        edges = g.edge_count(),
        "adjacency built"
    );
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    fn square(id: &str, x: f64, y: f64) -> Region {
        Region::polygon(id, vec![vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]]])
    }

    #[test]
    fn shared_edge_squares_are_neighbors() {
        let g = build_adjacency(&[square("a", 0.0, 0.0), square("b", 1.0, 0.0), square("c", 5.0, 5.0)]);
        assert!(g.are_adjacent("a", "b"));
        assert!(g.are_adjacent("b", "a"));
        assert_eq!(g.degree("c"), Some(0));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn corner_touch_counts() {
        let g = build_adjacency(&[square("a", 0.0, 0.0), square("d", 1.0, 1.0)]);
        assert!(g.are_adjacent("a", "d"));
    }

    #[test]
    fn overlapping_boxes_without_shared_vertex_are_not_neighbors() {
        // b's left edge lies on a's right edge but the vertices are offset
        let a = square("a", 0.0, 0.0);
        let b = Region::polygon("b", vec![vec![[1.0, 0.5], [2.0, 0.5], [2.0, 1.5], [1.0, 1.5]]]);
        let g = build_adjacency(&[a, b]);
        assert!(!g.are_adjacent("a", "b"));
    }

    #[test]
    fn float_noise_below_precision_is_absorbed() {
        let a = square("a", 0.0, 0.0);
        let b = Region::polygon("b", vec![vec![[1.0, 0.000_000_01], [2.0, 0.0], [2.0, 1.0]]]);
        assert!(build_adjacency(&[a.clone(), b.clone()]).are_adjacent("a", "b"));
        let fine = AdjacencyOptions { precision: 9 };
        assert!(!build_adjacency_with(&[a, b], &fine).are_adjacent("a", "b"));
    }

    #[test]
    fn large_projected_coordinates_keep_distinct_vertices() {
        let a = Region::polygon("a", vec![vec![[1.0e7, 0.0], [2.0e7, 0.0], [2.0e7, 1.0]]]);
        let b = Region::polygon("b", vec![vec![[1.5e7, 0.0], [3.0e7, 0.5], [1.5e7, 1.0]]]);
        for precision in [DEFAULT_PRECISION, 9, 12, 40] {
            let g = build_adjacency_with(&[a.clone(), b.clone()], &AdjacencyOptions { precision });
            assert!(!g.are_adjacent("a", "b"), "precision {precision}");
        }
    }

    #[test]
    fn missing_geometry_is_isolated_but_present() {
        let g = build_adjacency(&[square("a", 0.0, 0.0), Region::new("ghost", None)]);
        assert!(g.contains("ghost"));
        assert_eq!(g.neighbors("ghost").unwrap().count(), 0);
    }

    #[test]
    fn multipolygon_parts_all_participate() {
        let island = Region::new(
            "m",
            Some(Geometry::MultiPolygon(vec![
                vec![vec![[10.0, 10.0], [11.0, 10.0], [11.0, 11.0]]],
                vec![vec![[1.0, 0.0], [1.0, 1.0], [0.5, 0.5]]],
            ])),
        );
        let g = build_adjacency(&[square("a", 0.0, 0.0), island]);
        assert!(g.are_adjacent("a", "m"));
    }

    #[test]
    fn duplicate_ids_collapse_without_self_loops() {
        let g = build_adjacency(&[square("a", 0.0, 0.0), square("a", 1.0, 0.0), square("b", 2.0, 0.0)]);
        assert_eq!(g.len(), 2);
        assert_eq!(g.ids(), &["a".to_string(), "b".to_string()]);
        assert!(g.are_adjacent("a", "b"));
        assert!(!g.are_adjacent("a", "a"));
    }

    #[test]
    fn from_edges_ignores_unknown_and_self() {
        let g = AdjacencyGraph::from_edges(&["x", "y"], &[("x", "y"), ("x", "x"), ("x", "z")]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.max_degree(), 1);
        assert!(!g.contains("z"));
    }

    #[test]
    fn serializes_in_insertion_order() {
        let g = AdjacencyGraph::from_edges(&["z", "a"], &[("z", "a")]);
        assert_eq!(serde_json::to_string(&g).unwrap(), r#"{"z":["a"],"a":["z"]}"#);
    }
}
