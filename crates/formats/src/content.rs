//! Dashboard content: regions, countries, data points and their datasets.
//!
//! The document is read once at startup and never mutated. Keys are
//! camelCase to match the JSON the content team edits.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use foundation::math::ProjectionKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardContent {
    /// Organizational-unit lenses in selector order; the first is the default.
    #[serde(default = "default_org_options")]
    pub org_options: Vec<String>,
    /// Label of the lens that renders the compare structure.
    #[serde(default)]
    pub compare_option: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub regions: Vec<RegionContent>,
    #[serde(default)]
    pub countries: Vec<EntityContent>,
    /// Feature codes never drawn (e.g. Antarctica).
    #[serde(default = "default_excluded_features")]
    pub excluded_features: Vec<String>,
    #[serde(default)]
    pub projection: ProjectionKind,
    #[serde(default)]
    pub zoom: ZoomSettings,
    #[serde(default)]
    pub labels: Labels,
}

fn default_org_options() -> Vec<String> {
    vec!["Group".to_string()]
}

fn default_excluded_features() -> Vec<String> {
    vec!["ATA".to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionContent {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Member entity codes in display order.
    #[serde(default)]
    pub countries: Vec<String>,
}

impl RegionContent {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContent {
    pub code: String,
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub points: Vec<DataPointContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointContent {
    pub id: String,
    pub title: String,
    pub category: String,
    /// `[lon, lat]` in degrees.
    #[serde(default)]
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default)]
    pub data: PointData,
}

impl DataPointContent {
    /// Valid `[lon, lat]`, or `None` for malformed coordinates.
    pub fn lon_lat(&self) -> Option<[f64; 2]> {
        match self.coordinates.as_slice() {
            &[lon, lat]
                if lon.is_finite()
                    && lat.is_finite()
                    && (-180.0..=180.0).contains(&lon)
                    && (-90.0..=90.0).contains(&lat) =>
            {
                Some([lon, lat])
            }
            _ => None,
        }
    }
}

/// Per-lens datasets of one data point.
///
/// `units` maps an organizational-unit key to its dataset; an explicit
/// `null` and a missing key both mean "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareDataset>,
    #[serde(flatten)]
    pub units: BTreeMap<String, Option<Dataset>>,
}

impl PointData {
    pub fn unit(&self, key: &str) -> Option<&Dataset> {
        self.units.get(key).and_then(|d| d.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub progress: Vec<ProgressItem>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.summary.as_deref().is_none_or(str::is_empty)
            && self.metrics.is_empty()
            && self.progress.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    pub label: String,
    /// Percent, nominally 0..=100.
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareDataset {
    #[serde(default)]
    pub left_label: Option<String>,
    #[serde(default)]
    pub right_label: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub metrics: Vec<CompareRow>,
}

impl CompareDataset {
    pub fn is_empty(&self) -> bool {
        self.summary.as_deref().is_none_or(str::is_empty) && self.metrics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRow {
    pub label: String,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

/// Zoom and fit tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Upper bound for automatic fits, below `max_scale`.
    pub fit_scale_cap: Option<f64>,
    pub padding: f64,
    pub region_padding: Option<f64>,
    pub entity_padding: Option<f64>,
    pub duration_ms: f64,
    /// Pixels the world may be panned past the viewport edge.
    pub translate_padding: f64,
    /// Margin kept around the world when fitting the projection.
    pub viewport_margin: f64,
    pub stroke_width: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 10.0,
            fit_scale_cap: Some(8.0),
            padding: 0.9,
            region_padding: None,
            entity_padding: None,
            duration_ms: 900.0,
            translate_padding: 20.0,
            viewport_margin: 40.0,
            stroke_width: 0.6,
        }
    }
}

/// User-visible strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Labels {
    pub world: String,
    pub no_data: String,
    pub coming_soon: String,
    pub no_overview: String,
    pub no_description: String,
    pub intro_title: String,
    pub intro_steps: String,
    pub regions_title: String,
    pub regions_hint: String,
    pub countries_suffix: String,
    pub status_active: String,
    pub status_pending: String,
    pub tooltip_active: String,
    pub tooltip_pending: String,
    pub sites_suffix: String,
    pub legend_title: String,
    pub missing_value: String,
    pub load_error_title: String,
    pub load_error: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            world: "Welt".to_string(),
            no_data: "Kein Datensatz verfügbar.".to_string(),
            coming_soon: "Coming Soon: Datensatz befindet sich in Vorbereitung.".to_string(),
            no_overview: "Keine Übersicht verfügbar.".to_string(),
            no_description: "Keine Beschreibung verfügbar.".to_string(),
            intro_title: "So funktioniert es".to_string(),
            intro_steps:
                "1. Kontinent auswählen · 2. Land fokussieren · 3. Themenpunkt öffnen.".to_string(),
            regions_title: "Kontinente".to_string(),
            regions_hint:
                "Nutze die Chips oder klicke auf die Karte, um zu einer Region zu springen."
                    .to_string(),
            countries_suffix: "Länder".to_string(),
            status_active: "Aktiv".to_string(),
            status_pending: "In Vorbereitung".to_string(),
            tooltip_active: "aktiv".to_string(),
            tooltip_pending: "in Vorbereitung".to_string(),
            sites_suffix: "Standorte".to_string(),
            legend_title: "Legende".to_string(),
            missing_value: "—".to_string(),
            load_error_title: "Fehler".to_string(),
            load_error: "Die Kartendaten konnten nicht geladen werden.".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ContentError {
    Parse(serde_json::Error),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Parse(e) => write!(f, "content parse error: {e}"),
        }
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContentError::Parse(e) => Some(e),
        }
    }
}

/// A problem found by `DashboardContent::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentIssue {
    NoOrgOptions,
    CompareOptionNotListed { option: String },
    /// No point carries data for this option and no compare option is set.
    OptionWithoutData { option: String },
    DuplicateRegion { region: String },
    DuplicateEntity { code: String },
    UnknownRegion { code: String, region: String },
    NotListedInRegion { code: String, region: String },
    UnknownMember { region: String, code: String },
    DuplicatePoint { code: String, point: String },
    UnknownCategory { code: String, point: String, category: String },
    InvalidCoordinates { code: String, point: String },
}

impl ContentIssue {
    /// Fatal issues break lookup invariants; the rest degrade gracefully.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ContentIssue::NoOrgOptions
                | ContentIssue::DuplicateRegion { .. }
                | ContentIssue::DuplicateEntity { .. }
                | ContentIssue::UnknownRegion { .. }
        )
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentIssue::NoOrgOptions => write!(f, "orgOptions is empty"),
            ContentIssue::CompareOptionNotListed { option } => {
                write!(f, "compareOption {option:?} is not listed in orgOptions")
            }
            ContentIssue::OptionWithoutData { option } => write!(
                f,
                "orgOptions entry {option:?} matches no dataset and compareOption is not set"
            ),
            ContentIssue::DuplicateRegion { region } => write!(f, "duplicate region {region:?}"),
            ContentIssue::DuplicateEntity { code } => write!(f, "duplicate country {code:?}"),
            ContentIssue::UnknownRegion { code, region } => {
                write!(f, "country {code:?} references unknown region {region:?}")
            }
            ContentIssue::NotListedInRegion { code, region } => {
                write!(f, "country {code:?} is not listed in region {region:?}")
            }
            ContentIssue::UnknownMember { region, code } => {
                write!(f, "region {region:?} lists {code:?} without a country entry")
            }
            ContentIssue::DuplicatePoint { code, point } => {
                write!(f, "country {code:?} has duplicate data point {point:?}")
            }
            ContentIssue::UnknownCategory {
                code,
                point,
                category,
            } => write!(
                f,
                "data point {code}/{point} uses unknown category {category:?}"
            ),
            ContentIssue::InvalidCoordinates { code, point } => {
                write!(f, "data point {code}/{point} has invalid coordinates")
            }
        }
    }
}

impl DashboardContent {
    pub fn from_json_str(payload: &str) -> Result<Self, ContentError> {
        crate::json::from_str_lenient(payload).map_err(ContentError::Parse)
    }

    pub fn region(&self, id: &str) -> Option<&RegionContent> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn entity(&self, code: &str) -> Option<&EntityContent> {
        self.countries.iter().find(|e| e.code == code)
    }

    /// Checks cross references. Issues are reported in document order.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        if self.org_options.is_empty() {
            issues.push(ContentIssue::NoOrgOptions);
        }
        if let Some(option) = &self.compare_option
            && !self.org_options.contains(option)
        {
            issues.push(ContentIssue::CompareOptionNotListed {
                option: option.clone(),
            });
        }

        if self.compare_option.is_none() {
            let points = || self.countries.iter().flat_map(|e| &e.points);
            let has_data = points().any(|p| !p.data.units.is_empty() || p.data.compare.is_some());
            for option in self.org_options.iter().filter(|_| has_data) {
                if !points().any(|p| p.data.units.contains_key(option)) {
                    issues.push(ContentIssue::OptionWithoutData {
                        option: option.clone(),
                    });
                }
            }
        }

        let mut region_ids = BTreeSet::new();
        for region in &self.regions {
            if !region_ids.insert(region.id.as_str()) {
                issues.push(ContentIssue::DuplicateRegion {
                    region: region.id.clone(),
                });
            }
        }

        let category_ids: BTreeSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        let mut codes = BTreeSet::new();
        for entity in &self.countries {
            if !codes.insert(entity.code.as_str()) {
                issues.push(ContentIssue::DuplicateEntity {
                    code: entity.code.clone(),
                });
            }

            match self.region(&entity.region) {
                None => issues.push(ContentIssue::UnknownRegion {
                    code: entity.code.clone(),
                    region: entity.region.clone(),
                }),
                Some(region) if !region.countries.contains(&entity.code) => {
                    issues.push(ContentIssue::NotListedInRegion {
                        code: entity.code.clone(),
                        region: entity.region.clone(),
                    });
                }
                Some(_) => {}
            }

            let mut point_ids = BTreeSet::new();
            for point in &entity.points {
                if !point_ids.insert(point.id.as_str()) {
                    issues.push(ContentIssue::DuplicatePoint {
                        code: entity.code.clone(),
                        point: point.id.clone(),
                    });
                }
                if !category_ids.contains(point.category.as_str()) {
                    issues.push(ContentIssue::UnknownCategory {
                        code: entity.code.clone(),
                        point: point.id.clone(),
                        category: point.category.clone(),
                    });
                }
                if point.lon_lat().is_none() {
                    issues.push(ContentIssue::InvalidCoordinates {
                        code: entity.code.clone(),
                        point: point.id.clone(),
                    });
                }
            }
        }

        for region in &self.regions {
            for code in &region.countries {
                if !codes.contains(code.as_str()) {
                    issues.push(ContentIssue::UnknownMember {
                        region: region.id.clone(),
                        code: code.clone(),
                    });
                }
            }
        }

        issues
    }
}
