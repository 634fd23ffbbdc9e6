//! Derives the complete view from `ViewState`; nothing here mutates state.

use scene::projector::GeoProjector;
use serde::Serialize;
use viewport::transform::ZoomTransform;

use crate::catalog::Catalog;
use crate::event::NavEvent;
use crate::selection::{DetailPanel, detail_panel};
use crate::state::{Level, ViewState};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub level: &'static str,
    pub state: ViewState,
    pub width: f64,
    pub height: f64,
    pub transform: ZoomTransform,
    /// `transform` as an SVG attribute for the map layer.
    pub svg_transform: String,
    pub stroke_width: f64,
    pub entities: Vec<EntityView>,
    pub markers: Vec<MarkerView>,
    pub breadcrumb: Vec<Crumb>,
    pub summary: SummaryView,
    pub country_list: CountryList,
    pub chips: Vec<RegionChip>,
    pub legend: Legend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<DetailPanel>,
}

/// One drawn feature and its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub path: String,
    pub active: bool,
    pub highlighted: bool,
    pub dimmed: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Screen position after the zoom transform.
    pub x: f64,
    pub y: f64,
    pub selected: bool,
    pub coming_soon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub label: String,
    /// Event to dispatch on click; `None` renders plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NavEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub title: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryList {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub items: Vec<CountryItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryItem {
    pub code: String,
    pub name: String,
    pub status: String,
    pub disabled: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionChip {
    pub region: String,
    pub label: String,
    pub active_count: usize,
    /// `"{n} Standorte"`.
    pub count_label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub title: String,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    pub id: String,
    pub label: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub text: String,
    pub clickable: bool,
}

const DEFAULT_MARKER_COLOR: &str = "#ffffff";

pub fn render(
    state: &ViewState,
    catalog: &Catalog,
    projector: &GeoProjector,
    transform: ZoomTransform,
    stroke_width: f64,
) -> RenderFrame {
    let [width, height] = projector.size();
    RenderFrame {
        level: state.level.name(),
        state: state.clone(),
        width,
        height,
        transform,
        svg_transform: transform.to_svg(),
        stroke_width,
        entities: entity_views(state, catalog, projector),
        markers: markers(state, catalog, projector, transform),
        breadcrumb: breadcrumb(state, catalog),
        summary: summary(state, catalog),
        country_list: country_list(state, catalog),
        chips: chips(state, catalog),
        legend: legend(catalog),
        panel: detail_panel(state, catalog),
    }
}

/// Highlight follows the focused entity, else the active members of the
/// current region. Everything else is dimmed once a region is focused.
pub fn entity_views(state: &ViewState, catalog: &Catalog, projector: &GeoProjector) -> Vec<EntityView> {
    projector
        .features()
        .iter()
        .map(|feature| {
            let code = feature.code.as_deref();
            let record = code.and_then(|c| catalog.entity(c));
            let active = record.is_some_and(|e| e.active);
            let focused = code.is_some() && code == state.entity();
            let highlighted = match (&state.level, record) {
                (Level::World, _) => false,
                (Level::Entity { .. }, _) => focused,
                (Level::Region { region, .. }, Some(e)) => e.active && e.region == *region,
                (Level::Region { .. }, None) => false,
            };
            EntityView {
                code: feature.code.clone(),
                path: feature.path.clone(),
                active,
                highlighted,
                dimmed: !matches!(state.level, Level::World) && !highlighted,
                focused,
            }
        })
        .collect()
}

/// Screen positions of the focused entity's points. Points with invalid
/// coordinates are skipped.
pub fn markers(
    state: &ViewState,
    catalog: &Catalog,
    projector: &GeoProjector,
    transform: ZoomTransform,
) -> Vec<MarkerView> {
    let Some(entity) = state.entity().and_then(|c| catalog.entity(c)) else {
        return Vec::new();
    };
    entity
        .points
        .iter()
        .filter_map(|point| {
            let projected = projector.project(point.lon_lat()?)?;
            let [x, y] = transform.apply(projected);
            let category = catalog.category(&point.category);
            Some(MarkerView {
                id: point.id.clone(),
                title: point.title.clone(),
                category: point.category.clone(),
                color: category
                    .and_then(|c| c.color.clone())
                    .unwrap_or_else(|| DEFAULT_MARKER_COLOR.to_string()),
                icon: category.and_then(|c| c.icon.clone()),
                x,
                y,
                selected: state.point() == Some(point.id.as_str()),
                coming_soon: point.coming_soon,
            })
        })
        .collect()
}

pub fn breadcrumb(state: &ViewState, catalog: &Catalog) -> Vec<Crumb> {
    let labels = catalog.labels();
    let mut crumbs = vec![Crumb {
        label: labels.world.clone(),
        target: match state.level {
            Level::World => None,
            _ => Some(NavEvent::BreadcrumbWorld),
        },
    }];
    if let Some(region) = state.region() {
        crumbs.push(Crumb {
            label: catalog
                .region(region)
                .map_or_else(|| region.to_string(), |r| r.name.clone()),
            target: match state.level {
                Level::Entity { .. } => Some(NavEvent::BreadcrumbRegion),
                _ => None,
            },
        });
    }
    if let Some(code) = state.entity() {
        crumbs.push(Crumb {
            label: catalog
                .entity(code)
                .map_or_else(|| code.to_string(), |e| e.name.clone()),
            target: None,
        });
    }
    crumbs
}

pub fn summary(state: &ViewState, catalog: &Catalog) -> SummaryView {
    let labels = catalog.labels();
    match &state.level {
        Level::World => SummaryView {
            title: labels.intro_title.clone(),
            paragraphs: vec![labels.intro_steps.clone()],
        },
        Level::Region { region, .. } => {
            let record = catalog.region(region);
            SummaryView {
                title: record.map_or_else(|| region.clone(), |r| r.name.clone()),
                paragraphs: vec![
                    record
                        .and_then(|r| r.description.clone())
                        .unwrap_or_else(|| labels.no_description.clone()),
                ],
            }
        }
        Level::Entity { entity, .. } => {
            let record = catalog.entity(entity);
            SummaryView {
                title: record.map_or_else(|| entity.clone(), |e| e.name.clone()),
                paragraphs: vec![
                    record
                        .and_then(|e| e.overview.clone())
                        .unwrap_or_else(|| labels.no_overview.clone()),
                ],
            }
        }
    }
}

pub fn country_list(state: &ViewState, catalog: &Catalog) -> CountryList {
    let labels = catalog.labels();
    let Some(region) = state.region().and_then(|r| catalog.region(r)) else {
        return CountryList {
            title: labels.regions_title.clone(),
            hint: Some(labels.regions_hint.clone()),
            items: Vec::new(),
        };
    };
    let marked = state.marked_entity();
    CountryList {
        title: format!("{} · {}", region.name, labels.countries_suffix),
        hint: None,
        items: catalog
            .members(region)
            .map(|e| CountryItem {
                code: e.code.clone(),
                name: e.name.clone(),
                status: if e.active {
                    labels.status_active.clone()
                } else {
                    labels.status_pending.clone()
                },
                disabled: !e.active,
                active: marked == Some(e.code.as_str()),
            })
            .collect(),
    }
}

pub fn chips(state: &ViewState, catalog: &Catalog) -> Vec<RegionChip> {
    let suffix = &catalog.labels().sites_suffix;
    catalog
        .regions()
        .iter()
        .map(|region| {
            let active_count = catalog.active_count(region);
            RegionChip {
                region: region.id.clone(),
                label: region.name.clone(),
                active_count,
                count_label: format!("{active_count} {suffix}"),
                active: state.region() == Some(region.id.as_str()),
            }
        })
        .collect()
}

pub fn legend(catalog: &Catalog) -> Legend {
    Legend {
        title: catalog.labels().legend_title.clone(),
        items: catalog
            .categories()
            .iter()
            .map(|c| LegendItem {
                id: c.id.clone(),
                label: c.label.clone(),
                color: c
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MARKER_COLOR.to_string()),
                description: c.description.clone(),
            })
            .collect(),
    }
}

/// Hover text for a feature: configured entities show their status, other
/// features their geographic name.
pub fn tooltip(catalog: &Catalog, code: Option<&str>, feature_name: Option<&str>) -> Option<Tooltip> {
    let labels = catalog.labels();
    match code.and_then(|c| catalog.entity(c)) {
        Some(e) if !e.placeholder => {
            let status = if e.active {
                &labels.tooltip_active
            } else {
                &labels.tooltip_pending
            };
            Some(Tooltip {
                text: format!("{} · {status}", e.name),
                clickable: e.active,
            })
        }
        _ => feature_name.or(code).map(|text| Tooltip {
            text: text.to_string(),
            clickable: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{breadcrumb, chips, country_list, summary, tooltip};
    use crate::event::NavEvent;
    use crate::state::{Lens, Level, ViewState};
    use crate::testing;
    use pretty_assertions::assert_eq;

    fn group() -> Lens {
        Lens::Unit("Group".to_string())
    }

    fn region(hint: Option<&str>) -> ViewState {
        ViewState {
            level: Level::Region {
                region: "Europa".to_string(),
                hint: hint.map(str::to_string),
            },
            lens: group(),
        }
    }

    fn entity() -> ViewState {
        ViewState {
            level: Level::Entity {
                region: "Europa".to_string(),
                entity: "DEU".to_string(),
                point: None,
            },
            lens: group(),
        }
    }

    #[test]
    fn breadcrumb_targets_follow_level() {
        let catalog = testing::catalog();
        let world = breadcrumb(&ViewState::world(group()), &catalog);
        assert_eq!(world.len(), 1);
        assert_eq!(world[0].target, None);

        let crumbs = breadcrumb(&entity(), &catalog);
        let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Welt", "Europa", "Deutschland"]);
        assert_eq!(crumbs[0].target, Some(NavEvent::BreadcrumbWorld));
        assert_eq!(crumbs[1].target, Some(NavEvent::BreadcrumbRegion));
        assert_eq!(crumbs[2].target, None);

        let crumbs = breadcrumb(&region(None), &catalog);
        assert_eq!(crumbs[1].target, None);
    }

    #[test]
    fn summary_falls_back_per_level() {
        let catalog = testing::catalog();
        assert_eq!(summary(&ViewState::world(group()), &catalog).title, "So funktioniert es");
        let asia = ViewState {
            level: Level::Region {
                region: "Asien".to_string(),
                hint: None,
            },
            lens: group(),
        };
        assert_eq!(
            summary(&asia, &catalog).paragraphs,
            vec!["Keine Beschreibung verfügbar.".to_string()]
        );
        assert_eq!(
            summary(&entity(), &catalog).paragraphs,
            vec!["Hauptsitz und größter Markt.".to_string()]
        );
    }

    #[test]
    fn country_list_marks_status_and_hint() {
        let catalog = testing::catalog();
        let world = country_list(&ViewState::world(group()), &catalog);
        assert_eq!(world.title, "Kontinente");
        assert!(world.items.is_empty());

        let list = country_list(&region(Some("DEU")), &catalog);
        assert_eq!(list.title, "Europa · Länder");
        let rows: Vec<(&str, &str, bool, bool)> = list
            .items
            .iter()
            .map(|i| (i.code.as_str(), i.status.as_str(), i.disabled, i.active))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("DEU", "Aktiv", false, true),
                ("FRA", "In Vorbereitung", true, false),
                ("AUT", "Aktiv", false, false),
                ("POL", "In Vorbereitung", true, false),
            ]
        );
    }

    #[test]
    fn chips_count_active_members() {
        let catalog = testing::catalog();
        let chips = chips(&region(None), &catalog);
        let rows: Vec<(&str, &str, bool)> = chips
            .iter()
            .map(|c| (c.region.as_str(), c.count_label.as_str(), c.active))
            .collect();
        assert_eq!(
            rows,
            vec![("Europa", "2 Standorte", true), ("Asien", "1 Standorte", false)]
        );
    }

    #[test]
    fn tooltip_text_depends_on_configuration() {
        let catalog = testing::catalog();
        let deu = tooltip(&catalog, Some("DEU"), Some("Germany")).expect("tooltip");
        assert_eq!(deu.text, "Deutschland · aktiv");
        assert!(deu.clickable);
        let pol = tooltip(&catalog, Some("POL"), Some("Poland")).expect("tooltip");
        assert_eq!(pol.text, "Polen · in Vorbereitung");
        assert!(!pol.clickable);
        let fra = tooltip(&catalog, Some("FRA"), Some("France")).expect("tooltip");
        assert_eq!(fra.text, "France");
        assert_eq!(tooltip(&catalog, None, None), None);
    }
}
