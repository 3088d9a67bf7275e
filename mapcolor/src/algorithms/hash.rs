use std::collections::BTreeSet;

use tracing::debug;

use crate::{model::ColorAssignment, palette::Palette};

/// Polynomial rolling hash over UTF-16 code units: `h = h * 31 + unit`, wrapping at 2^32.
pub fn string_hash(s: &str) -> u32 {
    s.encode_utf16().fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32))
}

/// Adjacency-free assignment that only depends on the set of ids.
///
/// Distinct ids are ordered by `(hash, id)` and dealt palette entries round
/// robin, so the result is identical for any input order and every color is
/// used `floor(n/k)` or `ceil(n/k)` times. Touching regions may share a color.
pub fn assign_by_hash<I, S>(ids: I, palette: &Palette) -> ColorAssignment
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if palette.is_empty() {
        return ColorAssignment::new();
    }
    let distinct: BTreeSet<String> = ids.into_iter().map(|s| s.as_ref().to_string()).collect();
    let mut keyed: Vec<(u32, String)> = distinct.into_iter().map(|id| (string_hash(&id), id)).collect();
    keyed.sort_unstable();

    let k = palette.len();
    let assignment: ColorAssignment = keyed
        .into_iter()
        .enumerate()
        .filter_map(|(pos, (_, id))| palette.get(pos % k).map(|c| (id, c.to_string())))
        .collect();
    debug!(regions = assignment.len(), colors = k, "hash coloring done");
    assignment
}
