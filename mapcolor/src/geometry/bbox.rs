use serde::Serialize;

/// Axis-aligned bounding box. Recomputed each pass, never cached.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// `None` when there are no points.
    pub fn from_points(points: &[[f64; 2]]) -> Option<BBox> {
        let (first, rest) = points.split_first()?;
        let mut b = BBox { min_x: first[0], min_y: first[1], max_x: first[0], max_y: first[1] };
        for p in rest {
            if p[0] < b.min_x { b.min_x = p[0]; }
            if p[0] > b.max_x { b.max_x = p[0]; }
            if p[1] < b.min_y { b.min_y = p[1]; }
            if p[1] > b.max_y { b.max_y = p[1]; }
        }
        Some(b)
    }

    /// Closed-interval overlap; touching edges count as overlapping.
    #[inline]
    pub fn intersects(&self, o: &BBox) -> bool {
        !(self.max_x < o.min_x || self.min_x > o.max_x || self.max_y < o.min_y || self.min_y > o.max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_points_have_no_box() {
        assert_eq!(BBox::from_points(&[]), None);
    }

    #[test]
    fn min_max_per_axis() {
        let b = BBox::from_points(&[[1.0, 5.0], [-2.0, 3.0], [4.0, -1.0]]).unwrap();
        assert_eq!(b, BBox { min_x: -2.0, min_y: -1.0, max_x: 4.0, max_y: 5.0 });
    }

    #[test]
    fn shared_corner_overlaps_gap_does_not() {
        let a = BBox { min_x: 0.0, min_y: 0.0, max_x: 1.0, max_y: 1.0 };
        let touching = BBox { min_x: 1.0, min_y: 1.0, max_x: 2.0, max_y: 2.0 };
        let apart = BBox { min_x: 1.5, min_y: 0.0, max_x: 2.0, max_y: 1.0 };
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
    }
}
