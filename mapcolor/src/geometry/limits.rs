// Centralized ingestion limits to harden against untrusted input (GeoJSON from the page)

// Working-set caps; adjacency is O(n^2) so regions stay in the low thousands
pub const MAX_REGIONS: usize = 20_000;
pub const MAX_VERTICES_PER_REGION: usize = 250_000;
pub const MAX_VERTICES_TOTAL: usize = 5_000_000;

// Palette
pub const MAX_PALETTE_LEN: usize = 256;

// Numeric bounds (generous enough for projected metres as well as lon/lat)
pub const COORD_MIN: f64 = -1.0e9;
pub const COORD_MAX: f64 = 1.0e9;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && (COORD_MIN..=COORD_MAX).contains(&x) }
