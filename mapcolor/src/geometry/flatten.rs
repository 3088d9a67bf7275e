use crate::geometry::limits::in_coord_bounds;
use crate::model::{Geometry, Region};

/// Flatten a geometry's coordinate tree into `[x, y]` pairs.
/// Positions with non-finite or out-of-range coordinates are skipped.
pub fn flatten_positions(geometry: &Geometry) -> Vec<[f64; 2]> {
    let mut out = Vec::new();
    for ring in geometry.rings() {
        out.extend(ring.iter().copied().filter(|p| in_coord_bounds(p[0]) && in_coord_bounds(p[1])));
    }
    out
}

/// All usable vertices of a region; empty for missing geometry.
pub fn region_positions(region: &Region) -> Vec<[f64; 2]> {
    region.geometry.as_ref().map(flatten_positions).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_non_finite() {
        let g = Geometry::Polygon(vec![vec![[0.0, 0.0], [f64::NAN, 1.0], [2.0, f64::INFINITY], [1.0, 1.0]]]);
        assert_eq!(flatten_positions(&g), vec![[0.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn missing_geometry_has_no_vertices() {
        assert!(region_positions(&Region::new("x", None)).is_empty());
    }
}
