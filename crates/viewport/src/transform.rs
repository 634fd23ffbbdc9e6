use foundation::bounds::Aabb2;
use serde::{Deserialize, Serialize};

/// Uniform scale `k` followed by translation `(x, y)`: `p' = k * p + t`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0] * self.k + self.x, p[1] * self.k + self.y]
    }

    pub fn invert(&self, p: [f64; 2]) -> [f64; 2] {
        [self.invert_x(p[0]), self.invert_y(p[1])]
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Translates in the untransformed space: `t * translate(a, b)`.
    pub fn translate(&self, a: f64, b: f64) -> Self {
        Self::new(self.k, self.x + self.k * a, self.y + self.k * b)
    }

    pub fn is_finite(&self) -> bool {
        self.k.is_finite() && self.k > 0.0 && self.x.is_finite() && self.y.is_finite()
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!("translate({},{}) scale({})", self.x, self.y, self.k)
    }

    /// Shifts the transform so the viewport `[0, 0]..size` never shows more
    /// than `extent` (in untransformed space) allows. Axes where the extent
    /// is smaller than the view are centred.
    pub fn constrain(&self, size: [f64; 2], extent: Aabb2) -> Self {
        if extent.is_empty() {
            return *self;
        }
        let dx0 = self.invert_x(0.0) - extent.min[0];
        let dx1 = self.invert_x(size[0]) - extent.max[0];
        let dy0 = self.invert_y(0.0) - extent.min[1];
        let dy1 = self.invert_y(size[1]) - extent.max[1];
        self.translate(settle(dx0, dx1), settle(dy0, dy1))
    }
}

fn settle(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let shift = d0.min(0.0);
    if shift != 0.0 { shift } else { d1.max(0.0) }
}

#[cfg(test)]
mod tests {
    use super::ZoomTransform;
    use foundation::bounds::Aabb2;

    #[test]
    fn apply_and_invert_round_trip() {
        let t = ZoomTransform::new(2.0, -400.0, -300.0);
        assert_eq!(t.apply([400.0, 300.0]), [400.0, 300.0]);
        assert_eq!(t.invert([0.0, 0.0]), [200.0, 150.0]);
        assert_eq!(t.to_svg(), "translate(-400,-300) scale(2)");
    }

    #[test]
    fn constrain_blocks_panning_a_world_that_fits() {
        let extent = Aabb2::new([20.0, 20.0], [780.0, 580.0]);
        let panned = ZoomTransform::new(1.0, 500.0, -80.0);
        assert_eq!(
            panned.constrain([800.0, 600.0], extent),
            ZoomTransform::IDENTITY
        );
    }

    #[test]
    fn constrain_stops_at_the_extent_edge() {
        let extent = Aabb2::new([20.0, 20.0], [780.0, 580.0]);
        let t = ZoomTransform::new(2.0, 600.0, -300.0).constrain([800.0, 600.0], extent);
        assert_eq!(t.invert_x(0.0), 20.0);
        assert_eq!(t.y, -300.0);
    }
}
