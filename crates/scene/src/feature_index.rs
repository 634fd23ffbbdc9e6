//! Code -> feature lookup over the drawable part of a FeatureCollection.

use std::collections::{BTreeMap, BTreeSet};

use foundation::math::{HEMISPHERE_SR, polygon_area};
use formats::geojson::{FeatureCollection, GeoFeature, GeoGeometry};

/// Drawable features with consistent winding, plus a lookup by code.
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    features: Vec<GeoFeature>,
    by_code: BTreeMap<String, usize>,
    missing: Vec<String>,
}

impl FeatureIndex {
    /// Builds the index.
    ///
    /// Features whose code is in `excluded` or that carry no areal geometry
    /// are dropped. `recognized` codes without geometry are reported through
    /// `missing_codes`.
    pub fn build<'a, R>(collection: FeatureCollection, recognized: R, excluded: &[String]) -> Self
    where
        R: IntoIterator<Item = &'a str>,
    {
        let excluded: BTreeSet<&str> = excluded.iter().map(String::as_str).collect();
        let mut features = Vec::with_capacity(collection.features.len());
        let mut by_code = BTreeMap::new();
        let mut reversed = 0usize;

        for mut feature in collection.features {
            if feature.code().is_some_and(|c| excluded.contains(c)) {
                continue;
            }
            let Some(geometry) = feature.geometry.as_mut() else {
                continue;
            };
            if normalize_winding(geometry) {
                reversed += 1;
            }

            let index = features.len();
            if let Some(code) = feature.code() {
                if by_code.contains_key(code) {
                    tracing::debug!(code, "duplicate feature code, keeping the first");
                } else {
                    by_code.insert(code.to_string(), index);
                }
            }
            features.push(feature);
        }

        let mut missing: Vec<String> = recognized
            .into_iter()
            .filter(|code| !by_code.contains_key(*code))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        for code in &missing {
            tracing::warn!(code = code.as_str(), "no geographic feature for entity");
        }

        tracing::debug!(
            features = features.len(),
            reversed,
            missing = missing.len(),
            "built feature index"
        );
        Self {
            features,
            by_code,
            missing,
        }
    }

    /// Drawable features in source order.
    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    pub fn get(&self, code: &str) -> Option<&GeoFeature> {
        self.by_code.get(code).map(|&i| &self.features[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.get(code).and_then(GeoFeature::name)
    }

    /// Recognized codes that have no drawable feature, sorted.
    pub fn missing_codes(&self) -> &[String] {
        &self.missing
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Reverses every ring when the feature as a whole covers more than a
/// hemisphere. Returns whether anything changed.
pub fn normalize_winding(geometry: &mut GeoGeometry) -> bool {
    let area: f64 = geometry.polygons().into_iter().map(polygon_area).sum();
    if !area.is_finite() || area <= HEMISPHERE_SR {
        return false;
    }
    for ring in geometry.rings_mut() {
        ring.reverse();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::{FeatureIndex, normalize_winding};
    use formats::geojson::{FeatureCollection, GeoGeometry};
    use pretty_assertions::assert_eq;

    // Clockwise when viewed on a map with north up.
    fn square(lon: f64, lat: f64) -> Vec<[f64; 2]> {
        vec![
            [lon, lat],
            [lon, lat + 1.0],
            [lon + 1.0, lat + 1.0],
            [lon + 1.0, lat],
            [lon, lat],
        ]
    }

    fn collection() -> FeatureCollection {
        let mut ccw = square(10.0, 50.0);
        ccw.reverse();
        let value = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "DEU", "properties": {"name": "Germany"},
                 "geometry": {"type": "Polygon", "coordinates": [ccw]}},
                {"type": "Feature", "properties": {"iso_a3": "FRA", "name": "France"},
                 "geometry": {"type": "Polygon", "coordinates": [square(2.0, 46.0)]}},
                {"type": "Feature", "id": "ATA", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [square(0.0, -80.0)]}},
                {"type": "Feature", "id": "XXX", "properties": {}, "geometry": null}
            ]
        });
        FeatureCollection::from_geojson_value(&value).expect("collection")
    }

    #[test]
    fn filters_excluded_and_empty_features() {
        let index = FeatureIndex::build(collection(), ["DEU", "FRA"], &["ATA".to_string()]);
        assert_eq!(index.len(), 2);
        assert!(index.get("ATA").is_none());
        assert!(index.get("XXX").is_none());
        assert_eq!(index.name_of("FRA"), Some("France"));
    }

    #[test]
    fn reports_recognized_codes_without_geometry() {
        let index = FeatureIndex::build(
            collection(),
            ["XXX", "DEU", "ESP", "ESP"],
            &["ATA".to_string()],
        );
        assert_eq!(index.missing_codes(), ["ESP".to_string(), "XXX".to_string()]);
    }

    #[test]
    fn counter_clockwise_features_are_reversed() {
        let index = FeatureIndex::build(collection(), ["DEU"], &[]);
        let deu = index.get("DEU").and_then(|f| f.geometry.as_ref()).expect("DEU");
        let GeoGeometry::Polygon(rings) = deu else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0], square(10.0, 50.0));

        let fra = index.get("FRA").and_then(|f| f.geometry.as_ref()).expect("FRA");
        let GeoGeometry::Polygon(rings) = fra else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0], square(2.0, 46.0));
    }

    #[test]
    fn holes_flip_together_with_their_shell() {
        let mut shell = square(0.0, 0.0);
        shell.reverse();
        let hole = vec![[0.25, 0.25], [0.75, 0.25], [0.75, 0.75], [0.25, 0.75], [0.25, 0.25]];
        let mut geometry = GeoGeometry::Polygon(vec![shell.clone(), hole.clone()]);

        assert!(normalize_winding(&mut geometry));
        let GeoGeometry::Polygon(rings) = &geometry else {
            panic!("expected polygon");
        };
        let mut expected_hole = hole;
        expected_hole.reverse();
        assert_eq!(rings[0], square(0.0, 0.0));
        assert_eq!(rings[1], expected_hole);

        assert!(!normalize_winding(&mut geometry));
    }
}
