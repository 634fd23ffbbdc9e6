//! Spherical polygon area, used to detect rings wound the "wrong" way.
//!
//! Rings are `[lon, lat]` in degrees. A polygon wound so that it covers
//! more than a hemisphere has an area above `2π` steradians; the whole
//! sphere is `4π`.

use std::f64::consts::{FRAC_PI_4, TAU};

/// Area of a hemisphere (steradians).
pub const HEMISPHERE_SR: f64 = TAU;

/// Signed half-angle sum for one ring. The closing point may be present or
/// omitted; a repeated point contributes nothing.
pub fn ring_area_sum(ring: &[[f64; 2]]) -> f64 {
    let Some(&first) = ring.first() else {
        return 0.0;
    };

    let start = ring_vertex(first);
    let mut prev = start;
    let mut sum = 0.0;
    for &p in ring.iter().skip(1).chain(std::iter::once(&first)) {
        let next = ring_vertex(p);
        let d_lambda = next.lambda - prev.lambda;
        let sd = if d_lambda >= 0.0 { 1.0 } else { -1.0 };
        let ad = sd * d_lambda;
        let k = prev.sin_phi * next.sin_phi;
        let u = prev.cos_phi * next.cos_phi + k * ad.cos();
        let v = k * sd * ad.sin();
        sum += v.atan2(u);
        prev = next;
    }
    sum
}

/// Area (steradians) enclosed by a polygon given as outer ring plus holes.
pub fn polygon_area(rings: &[Vec<[f64; 2]>]) -> f64 {
    let sum: f64 = rings.iter().map(|r| ring_area_sum(r)).sum();
    let folded = if sum < 0.0 { TAU + sum } else { sum };
    2.0 * folded
}

/// Total area of a set of polygons.
pub fn multi_polygon_area(polygons: &[Vec<Vec<[f64; 2]>>]) -> f64 {
    polygons.iter().map(|p| polygon_area(p)).sum()
}

#[derive(Copy, Clone)]
struct RingVertex {
    lambda: f64,
    cos_phi: f64,
    sin_phi: f64,
}

fn ring_vertex(p: [f64; 2]) -> RingVertex {
    let phi = p[1].to_radians() / 2.0 + FRAC_PI_4;
    let (sin_phi, cos_phi) = phi.sin_cos();
    RingVertex {
        lambda: p[0].to_radians(),
        cos_phi,
        sin_phi,
    }
}
