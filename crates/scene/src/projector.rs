//! Screen-space geometry for the map: projection fitting, projected rings,
//! per-feature bounds and SVG path data.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use foundation::bounds::Aabb2;
use foundation::math::{Projection, ProjectionKind};
use formats::geojson::GeoFeature;

use crate::feature_index::FeatureIndex;

pub const FALLBACK_WIDTH: f64 = 800.0;
pub const FALLBACK_HEIGHT: f64 = 600.0;

/// Viewport size with unusable axes replaced by 800x600.
pub fn viewport_size(width: f64, height: f64) -> [f64; 2] {
    let pick = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
    [pick(width, FALLBACK_WIDTH), pick(height, FALLBACK_HEIGHT)]
}

/// One feature in projected pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFeature {
    pub code: Option<String>,
    pub name: Option<String>,
    /// Polygons, each as outer ring plus holes.
    pub polygons: Vec<Vec<Vec<[f64; 2]>>>,
    pub bounds: Aabb2,
    pub path: String,
}

/// Projection fitted to the world plus the cached projected geometry.
#[derive(Debug, Clone)]
pub struct GeoProjector {
    kind: ProjectionKind,
    margin: f64,
    size: [f64; 2],
    projection: Projection,
    features: Vec<ProjectedFeature>,
    by_code: BTreeMap<String, usize>,
    world_bounds: Aabb2,
}

impl GeoProjector {
    pub fn new(kind: ProjectionKind, index: &FeatureIndex, width: f64, height: f64, margin: f64) -> Self {
        let size = viewport_size(width, height);
        let mut projector = Self {
            kind,
            margin: margin.max(0.0),
            size,
            projection: Projection::centered(kind, size[0], size[1]),
            features: Vec::new(),
            by_code: BTreeMap::new(),
            world_bounds: Aabb2::empty(),
        };
        projector.refit(index);
        projector
    }

    /// Refits the projection for a new viewport size.
    pub fn resize(&mut self, index: &FeatureIndex, width: f64, height: f64) {
        self.size = viewport_size(width, height);
        self.refit(index);
    }

    fn refit(&mut self, index: &FeatureIndex) {
        let [w, h] = self.size;
        let mut extent = Aabb2::new([self.margin, self.margin], [w - self.margin, h - self.margin]);
        if extent.is_degenerate() {
            extent = Aabb2::from_size(w, h);
        }

        let coords = index
            .features()
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .flat_map(|g| g.rings().flatten().copied());
        self.projection = Projection::fit_extent(self.kind, extent, coords)
            .unwrap_or_else(|| Projection::centered(self.kind, w, h));

        self.features = index
            .features()
            .iter()
            .map(|f| project_feature(&self.projection, f))
            .collect();
        self.by_code = self
            .features
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.code.clone().map(|c| (c, i)))
            .rev()
            .collect();
        self.world_bounds = self
            .features
            .iter()
            .fold(Aabb2::empty(), |acc, f| acc.union(&f.bounds));

        tracing::debug!(
            width = w,
            height = h,
            scale = self.projection.scale,
            "fitted projection"
        );
    }

    pub fn size(&self) -> [f64; 2] {
        self.size
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn project(&self, lon_lat: [f64; 2]) -> Option<[f64; 2]> {
        self.projection.project(lon_lat)
    }

    pub fn features(&self) -> &[ProjectedFeature] {
        &self.features
    }

    pub fn feature(&self, code: &str) -> Option<&ProjectedFeature> {
        self.by_code.get(code).map(|&i| &self.features[i])
    }

    /// Union of every drawn feature's bounds.
    pub fn world_bounds(&self) -> Aabb2 {
        self.world_bounds
    }

    /// Union of the bounds of `codes`; codes without a feature are skipped.
    pub fn bounds_of<'a, I>(&self, codes: I) -> Aabb2
    where
        I: IntoIterator<Item = &'a str>,
    {
        codes
            .into_iter()
            .filter_map(|c| self.feature(c))
            .fold(Aabb2::empty(), |acc, f| acc.union(&f.bounds))
    }
}

fn project_feature(projection: &Projection, feature: &GeoFeature) -> ProjectedFeature {
    let mut bounds = Aabb2::empty();
    let polygons: Vec<Vec<Vec<[f64; 2]>>> = feature
        .geometry
        .as_ref()
        .map(|g| {
            g.polygons()
                .into_iter()
                .map(|rings| {
                    rings
                        .iter()
                        .map(|ring| {
                            let projected: Vec<[f64; 2]> =
                                ring.iter().filter_map(|p| projection.project(*p)).collect();
                            for p in &projected {
                                bounds.include(*p);
                            }
                            projected
                        })
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default();

    ProjectedFeature {
        code: feature.code().map(str::to_string),
        name: feature.name().map(str::to_string),
        path: path_data(&polygons),
        polygons,
        bounds,
    }
}

/// SVG path data (`M x,y L ... Z` per ring).
pub fn path_data(polygons: &[Vec<Vec<[f64; 2]>>]) -> String {
    let mut d = String::new();
    for ring in polygons.iter().flatten() {
        let points = match (ring.first(), ring.last()) {
            (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
            _ => ring.as_slice(),
        };
        if points.len() < 3 {
            continue;
        }
        for (i, [x, y]) in points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{cmd}{},{}", fmt_coord(*x), fmt_coord(*y));
        }
        d.push('Z');
    }
    d
}

fn fmt_coord(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::{GeoProjector, path_data, viewport_size};
    use crate::feature_index::FeatureIndex;
    use foundation::math::ProjectionKind;
    use formats::geojson::FeatureCollection;

    fn index() -> FeatureIndex {
        let value = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "A", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[-170, -50], [-170, 70], [-10, 70], [-10, -50], [-170, -50]]]}},
                {"type": "Feature", "id": "B", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[10, -50], [10, 70], [170, 70], [170, -50], [10, -50]]]}}
            ]
        });
        let collection = FeatureCollection::from_geojson_value(&value).expect("collection");
        FeatureIndex::build(collection, ["A", "B", "C"], &[])
    }

    #[test]
    fn zero_size_falls_back() {
        assert_eq!(viewport_size(0.0, 0.0), [800.0, 600.0]);
        assert_eq!(viewport_size(1024.0, f64::NAN), [1024.0, 600.0]);
    }

    #[test]
    fn world_fits_inside_margin() {
        let projector = GeoProjector::new(ProjectionKind::NaturalEarth1, &index(), 800.0, 600.0, 40.0);
        let world = projector.world_bounds();
        assert!(world.min[0] >= 40.0 - 1e-6 && world.min[1] >= 40.0 - 1e-6);
        assert!(world.max[0] <= 760.0 + 1e-6 && world.max[1] <= 560.0 + 1e-6);
        let touches_x = (world.width() - 720.0).abs() < 1e-6;
        let touches_y = (world.height() - 520.0).abs() < 1e-6;
        assert!(touches_x || touches_y);
    }

    #[test]
    fn bounds_skip_missing_codes() {
        let projector = GeoProjector::new(ProjectionKind::Mercator, &index(), 800.0, 600.0, 40.0);
        let a = projector.feature("A").expect("A").bounds;
        assert_eq!(projector.bounds_of(["A", "C"]), a);
        assert!(projector.bounds_of(["C"]).is_empty());
        let both = projector.bounds_of(["A", "B"]);
        assert_eq!(both, projector.world_bounds());
    }

    #[test]
    fn resize_refits() {
        let mut projector = GeoProjector::new(ProjectionKind::NaturalEarth1, &index(), 800.0, 600.0, 40.0);
        let before = projector.world_bounds();
        projector.resize(&index(), 1600.0, 1200.0);
        let after = projector.world_bounds();
        assert!((after.width() - 2.0 * before.width() - 80.0).abs() < 1e-6
            || (after.height() - 2.0 * before.height() - 80.0).abs() < 1e-6);
        assert_eq!(projector.size(), [1600.0, 1200.0]);
    }

    #[test]
    fn path_data_drops_closing_point() {
        let d = path_data(&[vec![vec![[0.0, 0.0], [10.0, 0.0], [10.0, 5.5], [0.0, 0.0]]]]);
        assert_eq!(d, "M0,0L10,0L10,5.5Z");
        assert_eq!(path_data(&[vec![vec![[0.0, 0.0], [1.0, 1.0]]]]), "");
    }
}
