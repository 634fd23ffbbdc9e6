//! GeoJSON FeatureCollection parsing for country outlines.
//!
//! Only areal geometries matter to the map: `Polygon` and `MultiPolygon`
//! are parsed, `null` geometries are kept as `None`, and other geometry
//! types are dropped with a warning.

use serde_json::{Map, Value};

/// A closed ring of `[lon, lat]` pairs in degrees.
pub type Ring = Vec<[f64; 2]>;

#[derive(Debug, Clone, PartialEq)]
pub enum GeoGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl GeoGeometry {
    /// Polygons as outer ring + holes, regardless of variant.
    pub fn polygons(&self) -> Vec<&[Ring]> {
        match self {
            GeoGeometry::Polygon(rings) => vec![rings.as_slice()],
            GeoGeometry::MultiPolygon(polys) => polys.iter().map(|p| p.as_slice()).collect(),
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        let polys = match self {
            GeoGeometry::Polygon(rings) => std::slice::from_ref(rings),
            GeoGeometry::MultiPolygon(polys) => polys.as_slice(),
        };
        polys.iter().flatten()
    }

    pub fn rings_mut(&mut self) -> Box<dyn Iterator<Item = &mut Ring> + '_> {
        match self {
            GeoGeometry::Polygon(rings) => Box::new(rings.iter_mut()),
            GeoGeometry::MultiPolygon(polys) => Box::new(polys.iter_mut().flatten()),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.rings().map(|r| r.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<GeoGeometry>,
}

impl GeoFeature {
    /// Entity code: the feature id, else an ISO-A3 property.
    pub fn code(&self) -> Option<&str> {
        if let Some(id) = self.id.as_deref() {
            return Some(id);
        }
        ["iso_a3", "ISO_A3", "ADM0_A3"]
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(|v| v.as_str()))
    }

    pub fn name(&self) -> Option<&str> {
        ["name", "NAME", "ADMIN"]
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(|v| v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<GeoFeature>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::Json(e) => write!(f, "JSON parse error: {e}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoJsonError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload).map_err(GeoJsonError::Json)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, GeoJsonError> {
        let obj = value.as_object().ok_or(GeoJsonError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeoJsonError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let invalid = |reason: String| GeoJsonError::InvalidFeature { index, reason };

            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| invalid("feature must be an object".to_string()))?;
            let feat_type = feat_obj
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| invalid("feature missing type".to_string()))?;
            if feat_type != "Feature" {
                return Err(invalid(format!("unexpected feature type: {feat_type}")));
            }

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let geometry = match feat_obj.get("geometry") {
                None | Some(Value::Null) => None,
                Some(geometry_val) => parse_geometry(geometry_val).map_err(invalid)?,
            };
            if geometry.is_none() {
                tracing::debug!(index, id = ?id, "feature without areal geometry");
            }

            features.push(GeoFeature {
                id,
                properties,
                geometry,
            });
        }

        Ok(Self { features })
    }
}

fn parse_geometry(value: &Value) -> Result<Option<GeoGeometry>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" | "MultiPolygon" => {}
        other => {
            tracing::warn!(geometry = other, "ignoring non-areal geometry");
            return Ok(None);
        }
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    if ty == "Polygon" {
        Ok(Some(GeoGeometry::Polygon(parse_polygon(coords)?)))
    } else {
        Ok(Some(GeoGeometry::MultiPolygon(parse_multi_polygon(coords)?)))
    }
}

fn parse_position(coords: &Value) -> Result<[f64; 2], String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok([lon, lat])
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Ring>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Ring>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}
