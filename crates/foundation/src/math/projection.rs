//! Planar map projections with a d3-style `scale`/`translate` screen mapping.
//!
//! Raw projections map `(lon, lat)` in degrees to unit-scale planar
//! coordinates with y pointing north. `Projection` then applies
//! `[tx + k * x, ty - k * y]` so screen y grows downwards.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::bounds::Aabb2;

/// Web Mercator latitude limit (degrees).
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_78;

/// Scale used before any fit has been computed.
pub const DEFAULT_SCALE: f64 = 150.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionKind {
    #[default]
    NaturalEarth1,
    Mercator,
}

impl ProjectionKind {
    /// Unit-scale planar coordinates, or `None` for non-finite input.
    pub fn raw(self, lon_deg: f64, lat_deg: f64) -> Option<[f64; 2]> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return None;
        }
        let lambda = lon_deg.to_radians();
        match self {
            ProjectionKind::NaturalEarth1 => {
                let phi = lat_deg.clamp(-90.0, 90.0).to_radians();
                let phi2 = phi * phi;
                let phi4 = phi2 * phi2;
                let x = lambda
                    * (0.8707 - 0.131979 * phi2
                        + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4)));
                let y = phi
                    * (1.007226
                        + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)));
                Some([x, y])
            }
            ProjectionKind::Mercator => {
                let phi = lat_deg
                    .clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
                    .to_radians();
                Some([lambda, (FRAC_PI_4 + phi / 2.0).tan().ln()])
            }
        }
    }
}

/// A raw projection plus its screen mapping.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub scale: f64,
    pub translate: [f64; 2],
}

impl Projection {
    pub fn new(kind: ProjectionKind, scale: f64, translate: [f64; 2]) -> Self {
        Self {
            kind,
            scale,
            translate,
        }
    }

    /// Default mapping centred in a `width` x `height` viewport.
    pub fn centered(kind: ProjectionKind, width: f64, height: f64) -> Self {
        Self::new(kind, DEFAULT_SCALE, [width / 2.0, height / 2.0])
    }

    /// Projects `[lon, lat]` (degrees) to screen pixels.
    pub fn project(&self, lon_lat: [f64; 2]) -> Option<[f64; 2]> {
        let [x, y] = self.kind.raw(lon_lat[0], lon_lat[1])?;
        Some([
            self.translate[0] + self.scale * x,
            self.translate[1] - self.scale * y,
        ])
    }

    /// Fits the projection so every coordinate lands inside `extent`, keeping
    /// the aspect ratio and centring the content.
    ///
    /// Returns `None` when the coordinates have no area to fit.
    pub fn fit_extent<I>(kind: ProjectionKind, extent: Aabb2, lon_lats: I) -> Option<Self>
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        let raw = Aabb2::from_points(
            lon_lats
                .into_iter()
                .filter_map(|p| kind.raw(p[0], p[1]))
                .map(|[x, y]| [x, -y]),
        );
        if raw.is_degenerate() || extent.is_degenerate() {
            return None;
        }

        let w = extent.width();
        let h = extent.height();
        let k = (w / raw.width()).min(h / raw.height());
        let tx = extent.min[0] + (w - k * (raw.min[0] + raw.max[0])) / 2.0;
        let ty = extent.min[1] + (h - k * (raw.min[1] + raw.max[1])) / 2.0;
        Some(Self::new(kind, k, [tx, ty]))
    }
}
