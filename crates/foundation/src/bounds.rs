use crate::math::precision::is_positive_extent;

/// Axis-aligned bounding box in projected (pixel) space.
///
/// `Aabb2::empty()` is the identity for `union`; it has negative extent and
/// reports `is_degenerate()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn empty() -> Self {
        Aabb2 {
            min: [f64::INFINITY, f64::INFINITY],
            max: [f64::NEG_INFINITY, f64::NEG_INFINITY],
        }
    }

    /// Box spanning `[0, 0]..[width, height]`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Aabb2::new([0.0, 0.0], [width, height])
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        let mut out = Self::empty();
        for p in points {
            out.include(p);
        }
        out
    }

    /// Grows the box to contain `p`. Non-finite points are ignored.
    pub fn include(&mut self, p: [f64; 2]) {
        if !p[0].is_finite() || !p[1].is_finite() {
            return;
        }
        self.min[0] = self.min[0].min(p[0]);
        self.min[1] = self.min[1].min(p[1]);
        self.max[0] = self.max[0].max(p[0]);
        self.max[1] = self.max[1].max(p[1]);
    }

    pub fn union(&self, other: &Self) -> Self {
        Aabb2 {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    pub fn is_empty(&self) -> bool {
        !(self.min[0] <= self.max[0] && self.min[1] <= self.max[1])
    }

    /// Zero (or negative) width or height, or any non-finite corner.
    pub fn is_degenerate(&self) -> bool {
        !(is_positive_extent(self.width()) && is_positive_extent(self.height()))
    }

    /// Expands every side by `pad`.
    pub fn padded(&self, pad: f64) -> Self {
        Aabb2 {
            min: [self.min[0] - pad, self.min[1] - pad],
            max: [self.max[0] + pad, self.max[1] + pad],
        }
    }

    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }
}

impl Default for Aabb2 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb2;

    #[test]
    fn empty_is_union_identity() {
        let b = Aabb2::new([1.0, 2.0], [3.0, 5.0]);
        assert_eq!(Aabb2::empty().union(&b), b);
        assert!(Aabb2::empty().is_empty());
        assert!(Aabb2::empty().is_degenerate());
    }

    #[test]
    fn from_points_skips_non_finite() {
        let b = Aabb2::from_points([[1.0, 1.0], [f64::NAN, 9.0], [4.0, -2.0]]);
        assert_eq!(b, Aabb2::new([1.0, -2.0], [4.0, 1.0]));
        assert_eq!(b.center(), [2.5, -0.5]);
    }

    #[test]
    fn point_and_line_boxes_are_degenerate() {
        let point = Aabb2::from_points([[3.0, 3.0]]);
        assert!(!point.is_empty());
        assert!(point.is_degenerate());

        let line = Aabb2::from_points([[0.0, 3.0], [10.0, 3.0]]);
        assert!(line.is_degenerate());

        assert!(!Aabb2::from_size(800.0, 600.0).is_degenerate());
    }

    #[test]
    fn padded_grows_every_side() {
        let b = Aabb2::from_size(10.0, 10.0).padded(20.0);
        assert_eq!(b, Aabb2::new([-20.0, -20.0], [30.0, 30.0]));
        assert!(b.contains([-5.0, 29.0]));
        assert!(!b.contains([31.0, 0.0]));
    }
}
