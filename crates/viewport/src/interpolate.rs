//! Smooth zoom between two transforms (van Wijk & Nuij, "Smooth and
//! efficient zooming and panning").
//!
//! Views are `[ux, uy, w]`: the untransformed point at the viewport centre
//! and the untransformed width visible across the viewport.

use runtime::tween::Interpolate;

use crate::transform::ZoomTransform;

const RHO: f64 = std::f64::consts::SQRT_2;
const RHO2: f64 = 2.0;
const RHO4: f64 = 4.0;
const EPSILON2: f64 = 1e-12;

/// Path through view space from `p0` to `p1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomPath {
    p0: [f64; 3],
    d: [f64; 2],
    d1: f64,
    r0: f64,
    s: f64,
    w1: f64,
}

impl ZoomPath {
    pub fn new(p0: [f64; 3], p1: [f64; 3]) -> Self {
        let [ux0, uy0, w0] = p0;
        let [ux1, uy1, w1] = p1;
        let dx = ux1 - ux0;
        let dy = uy1 - uy0;
        let d2 = dx * dx + dy * dy;

        if d2 < EPSILON2 {
            return Self {
                p0,
                d: [dx, dy],
                d1: 0.0,
                r0: 0.0,
                s: (w1 / w0).ln() / RHO,
                w1,
            };
        }

        let d1 = d2.sqrt();
        let b0 = (w1 * w1 - w0 * w0 + RHO4 * d2) / (2.0 * w0 * RHO2 * d1);
        let b1 = (w1 * w1 - w0 * w0 - RHO4 * d2) / (2.0 * w1 * RHO2 * d1);
        let r0 = ((b0 * b0 + 1.0).sqrt() - b0).ln();
        let r1 = ((b1 * b1 + 1.0).sqrt() - b1).ln();
        Self {
            p0,
            d: [dx, dy],
            d1,
            r0,
            s: (r1 - r0) / RHO,
            w1,
        }
    }

    /// Path length in view units; proportional to a natural duration.
    pub fn length(&self) -> f64 {
        self.s
    }

    pub fn at(&self, t: f64) -> [f64; 3] {
        let [ux0, uy0, w0] = self.p0;
        let [dx, dy] = self.d;
        if t >= 1.0 {
            return [ux0 + dx, uy0 + dy, self.w1];
        }
        let s = t * self.s;
        if self.d1 == 0.0 {
            return [ux0 + t * dx, uy0 + t * dy, w0 * (RHO * s).exp()];
        }
        let cosh_r0 = self.r0.cosh();
        let u = w0 / (RHO2 * self.d1) * (cosh_r0 * (RHO * s + self.r0).tanh() - self.r0.sinh());
        [ux0 + u * dx, uy0 + u * dy, w0 * cosh_r0 / (RHO * s + self.r0).cosh()]
    }
}

/// Interpolates transforms around the viewport centre.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomInterpolator {
    from: ZoomTransform,
    to: ZoomTransform,
    centre: [f64; 2],
    w: f64,
    path: ZoomPath,
}

impl ZoomInterpolator {
    pub fn new(from: ZoomTransform, to: ZoomTransform, size: [f64; 2]) -> Self {
        let centre = [size[0] / 2.0, size[1] / 2.0];
        let w = size[0].max(size[1]);
        let view = |t: &ZoomTransform| {
            let [ux, uy] = t.invert(centre);
            [ux, uy, w / t.k]
        };
        Self {
            from,
            to,
            centre,
            w,
            path: ZoomPath::new(view(&from), view(&to)),
        }
    }

    pub fn from(&self) -> ZoomTransform {
        self.from
    }

    pub fn to(&self) -> ZoomTransform {
        self.to
    }
}

impl Interpolate for ZoomInterpolator {
    type Value = ZoomTransform;

    fn value_at(&self, t: f64) -> ZoomTransform {
        if t >= 1.0 {
            return self.to;
        }
        if t <= 0.0 {
            return self.from;
        }
        let [ux, uy, vw] = self.path.at(t);
        let k = self.w / vw;
        let next = ZoomTransform::new(k, self.centre[0] - ux * k, self.centre[1] - uy * k);
        if next.is_finite() { next } else { self.to }
    }
}
