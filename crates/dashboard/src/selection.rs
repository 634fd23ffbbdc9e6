//! Detail panel for the open data point under the active lens.

use formats::content::{CompareDataset, DataPointContent, Dataset};
use serde::Serialize;

use crate::catalog::{Catalog, EntityRecord};
use crate::state::{Lens, ViewState};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Positive,
    Negative,
    Neutral,
}

/// `+...` is positive, `-...` or `−...` negative, anything else neutral.
pub fn trend_direction(trend: &str) -> TrendDirection {
    let trend = trend.trim_start();
    if trend.starts_with('+') {
        TrendDirection::Positive
    } else if trend.starts_with('-') || trend.starts_with('−') {
        TrendDirection::Negative
    } else {
        TrendDirection::Neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LensChoice {
    pub label: String,
    pub selected: bool,
    /// A non-empty dataset exists for this lens.
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricView {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub label: String,
    /// Clamped to `0..=100`.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRowView {
    pub label: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PanelBody {
    ComingSoon {
        message: String,
    },
    NoData {
        message: String,
    },
    Dataset {
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
        metrics: Vec<MetricView>,
        progress: Vec<ProgressView>,
    },
    Compare {
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
        left_label: String,
        right_label: String,
        rows: Vec<CompareRowView>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPanel {
    pub point_id: String,
    pub title: String,
    /// `"{entity} · {category}"`.
    pub subtitle: String,
    pub description: String,
    pub coming_soon: bool,
    /// Hidden (`None`) for coming-soon points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lenses: Option<Vec<LensChoice>>,
    pub body: PanelBody,
}

/// Panel for the open point, or `None` when nothing is open.
pub fn detail_panel(state: &ViewState, catalog: &Catalog) -> Option<DetailPanel> {
    let entity = catalog.entity(state.entity()?)?;
    let point = entity.point(state.point()?)?;
    Some(build_panel(entity, point, &state.lens, catalog))
}

fn build_panel(
    entity: &EntityRecord,
    point: &DataPointContent,
    lens: &Lens,
    catalog: &Catalog,
) -> DetailPanel {
    let labels = catalog.labels();
    let category = catalog
        .category(&point.category)
        .map(|c| c.label.as_str())
        .unwrap_or(point.category.as_str());

    let (lenses, body) = if point.coming_soon {
        (
            None,
            PanelBody::ComingSoon {
                message: labels.coming_soon.clone(),
            },
        )
    } else {
        let choices = catalog
            .lenses()
            .iter()
            .map(|o| LensChoice {
                label: o.label.clone(),
                selected: &o.lens == lens,
                available: has_data(point, &o.lens),
            })
            .collect();
        (Some(choices), panel_body(point, lens, catalog))
    };

    DetailPanel {
        point_id: point.id.clone(),
        title: point.title.clone(),
        subtitle: format!("{} · {category}", entity.name),
        description: point
            .description
            .clone()
            .unwrap_or_else(|| labels.no_description.clone()),
        coming_soon: point.coming_soon,
        lenses,
        body,
    }
}

fn has_data(point: &DataPointContent, lens: &Lens) -> bool {
    match lens {
        Lens::Unit(unit) => point.data.unit(unit).is_some_and(|d| !d.is_empty()),
        Lens::Compare => point.data.compare.as_ref().is_some_and(|c| !c.is_empty()),
    }
}

/// Body for `lens`; a missing dataset yields the "no data" placeholder.
pub fn panel_body(point: &DataPointContent, lens: &Lens, catalog: &Catalog) -> PanelBody {
    let labels = catalog.labels();
    let no_data = || PanelBody::NoData {
        message: labels.no_data.clone(),
    };
    match lens {
        Lens::Unit(unit) => point.data.unit(unit).map_or_else(no_data, dataset_body),
        Lens::Compare => point
            .data
            .compare
            .as_ref()
            .map_or_else(no_data, |c| compare_body(c, catalog)),
    }
}

fn dataset_body(dataset: &Dataset) -> PanelBody {
    PanelBody::Dataset {
        summary: dataset.summary.clone().filter(|s| !s.is_empty()),
        metrics: dataset
            .metrics
            .iter()
            .map(|m| MetricView {
                label: m.label.clone(),
                value: m.value.clone(),
                direction: m
                    .trend
                    .as_deref()
                    .map_or(TrendDirection::Neutral, trend_direction),
                trend: m.trend.clone().filter(|t| !t.is_empty()),
            })
            .collect(),
        progress: dataset
            .progress
            .iter()
            .map(|p| ProgressView {
                label: p.label.clone(),
                percent: p
                    .value
                    .filter(|v| v.is_finite())
                    .unwrap_or(0.0)
                    .clamp(0.0, 100.0),
            })
            .collect(),
    }
}

fn compare_body(compare: &CompareDataset, catalog: &Catalog) -> PanelBody {
    let missing = &catalog.labels().missing_value;
    let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| missing.clone());
    // Without explicit labels the columns are named after the two units
    // following the default lens.
    let fallback = |i: usize| {
        catalog
            .lenses()
            .get(i)
            .map(|o| o.label.clone())
            .unwrap_or_default()
    };
    PanelBody::Compare {
        summary: compare.summary.clone().filter(|s| !s.is_empty()),
        left_label: compare.left_label.clone().unwrap_or_else(|| fallback(1)),
        right_label: compare.right_label.clone().unwrap_or_else(|| fallback(2)),
        rows: compare
            .metrics
            .iter()
            .map(|row| CompareRowView {
                label: row.label.clone(),
                left: cell(&row.left),
                right: cell(&row.right),
            })
            .collect(),
    }
}
