// Vertex-coincidence quantization for the shared-vertex adjacency test

// Decimal places kept when comparing vertices (absorbs float noise in source data)
pub const DEFAULT_PRECISION: u32 = 6;
// Largest p with COORD_MAX * 10^p inside i64; finer grids would saturate keys
pub const MAX_PRECISION: u32 = 9;

#[inline]
pub fn quant_scale(precision: u32) -> f64 { 10f64.powi(precision.min(MAX_PRECISION) as i32) }

/// Round a position to `scale` (see [`quant_scale`]) and return it as an exact integer key.
#[inline]
pub fn quantize(p: [f64; 2], scale: f64) -> (i64, i64) {
    ((p[0] * scale).round() as i64, (p[1] * scale).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_below_precision_collapses() {
        let s = quant_scale(DEFAULT_PRECISION);
        assert_eq!(quantize([-3.7038, 40.4168], s), quantize([-3.70380000001, 40.41679999999], s));
        assert_ne!(quantize([-3.7038, 40.4168], s), quantize([-3.703801, 40.4168], s));
    }

    #[test]
    fn precision_is_clamped() {
        assert_eq!(quant_scale(40), quant_scale(MAX_PRECISION));
    }

    #[test]
    fn keys_at_coordinate_bounds_do_not_saturate() {
        use crate::geometry::limits::{COORD_MAX, COORD_MIN};
        let s = quant_scale(MAX_PRECISION);
        assert!(COORD_MAX * s < i64::MAX as f64);
        let (hi, _) = quantize([COORD_MAX, 0.0], s);
        let (lo, _) = quantize([COORD_MIN, 0.0], s);
        assert_ne!(hi, i64::MAX);
        assert_ne!(lo, i64::MIN);
        assert_ne!(quantize([1.0e7, 0.0], s), quantize([1.5e7, 0.0], s));
        assert_ne!(quantize([COORD_MAX, 0.0], s), quantize([COORD_MAX - 1.0, 0.0], s));
    }
}
