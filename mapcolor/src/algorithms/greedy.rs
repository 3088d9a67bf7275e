use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{algorithms::adjacency::AdjacencyGraph, model::ColorAssignment, palette::Palette};

/// How a free palette slot is chosen for the next region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GreedyMode {
    /// Least globally used free color, ties to the lowest palette index.
    #[default]
    Balanced,
    /// Lowest free palette index.
    FirstFit,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColoringReport {
    pub max_degree: usize,
    /// Regions whose every palette entry was already taken by a neighbor.
    pub fallbacks: usize,
    /// Adjacent pairs that ended up sharing a color.
    pub conflicts: usize,
    /// Assignments per palette index.
    pub usage: Vec<usize>,
}

pub fn color_graph(g: &AdjacencyGraph, palette: &Palette, mode: GreedyMode) -> ColorAssignment {
    color_graph_report(g, palette, mode).0
}

/// Degree-descending greedy coloring.
///
/// Regions are visited by descending degree, ties in insertion order. When
/// the palette has more entries than the maximum degree no two neighbors
/// share a color. Otherwise a region whose palette is fully forbidden
/// reuses the least-used color (lowest index on ties).
pub fn color_graph_report(g: &AdjacencyGraph, palette: &Palette, mode: GreedyMode) -> (ColorAssignment, ColoringReport) {
    let k = palette.len();
    let mut report = ColoringReport { max_degree: g.max_degree(), usage: vec![0; k], ..Default::default() };
    if k == 0 {
        return (ColorAssignment::new(), report);
    }

    let mut order: Vec<usize> = (0..g.len()).collect();
    // stable: equal degrees keep insertion order
    order.sort_by_key(|&i| Reverse(g.neighbor_indices(i).len()));

    let mut slot: Vec<Option<usize>> = vec![None; g.len()];
    let mut forbidden = vec![false; k];
    for &i in &order {
        forbidden.fill(false);
        for &j in g.neighbor_indices(i) {
            if let Some(c) = slot[j] {
                forbidden[c] = true;
            }
        }
        let free = (0..k).filter(|&c| !forbidden[c]);
        let pick = match mode {
            GreedyMode::FirstFit => free.min(),
            GreedyMode::Balanced => free.min_by_key(|&c| (report.usage[c], c)),
        };
        let c = pick.unwrap_or_else(|| {
            report.fallbacks += 1;
            trace!(id = %g.ids()[i], "palette exhausted, reusing least-used color");
            least_used(&report.usage)
        });
        slot[i] = Some(c);
        report.usage[c] += 1;
    }

    for (i, ns) in (0..g.len()).map(|i| (i, g.neighbor_indices(i))) {
        report.conflicts += ns.iter().filter(|&&j| j > i && slot[j] == slot[i]).count();
    }

    let assignment = g
        .ids()
        .iter()
        .zip(&slot)
        .filter_map(|(id, c)| c.and_then(|c| palette.get(c)).map(|color| (id.clone(), color.to_string())))
        .collect();
    debug!(
        regions = g.len(),
        colors = k,
        max_degree = report.max_degree,
        fallbacks = report.fallbacks,
        conflicts = report.conflicts,
        "greedy coloring done"
    );
    (assignment, report)
}

fn least_used(usage: &[usize]) -> usize {
    usage.iter().enumerate().min_by_key(|&(c, n)| (*n, c)).map(|(c, _)| c).unwrap_or(0)
}
