//! Offline checks for a dashboard asset directory.

use std::path::Path;

use dashboard::{Dashboard, NavEvent, RenderFrame};
use formats::bootstrap::{AssetPaths, Assets, load_assets};
use formats::site::{ConfigSource, load_site_config};
use foundation::time::Time;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,
    pub config_source: ConfigSource,
    pub regions: usize,
    pub entities: usize,
    pub active_entities: usize,
    pub points: usize,
    pub features: usize,
    /// Configured codes without a drawable shape.
    pub missing_shapes: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn load_dir(dir: &Path) -> Result<Assets, String> {
    let paths = AssetPaths::from_dir(dir).map_err(|e| e.to_string())?;
    tracing::debug!(
        content = %paths.content.display(),
        geography = %paths.geography.display(),
        "loading assets"
    );
    load_assets(&paths).map_err(|e| e.to_string())
}

pub fn validate_dir(dir: &Path) -> Result<ValidationReport, String> {
    let (site, config_source) = load_site_config(dir);
    let assets = load_dir(dir)?;
    let warnings: Vec<String> = assets.warnings.iter().map(ToString::to_string).collect();
    let dash = Dashboard::new(assets, 800.0, 600.0).map_err(|e| e.to_string())?;

    let catalog = dash.catalog();
    let missing_shapes = catalog
        .codes()
        .filter(|code| dash.projector().feature(code).is_none())
        .map(str::to_string)
        .collect();
    Ok(ValidationReport {
        document_title: site.document_title(),
        config_source,
        regions: catalog.regions().len(),
        entities: catalog.entities().filter(|e| !e.placeholder).count(),
        active_entities: catalog.entities().filter(|e| e.active).count(),
        points: catalog.entities().map(|e| e.points.len()).sum(),
        features: dash.projector().features().len(),
        missing_shapes,
        warnings,
    })
}

/// Parses one event per line. Blank lines and `#` comments are skipped.
pub fn parse_events(input: &str) -> Result<Vec<NavEvent>, String> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(n, line)| serde_json::from_str(line).map_err(|e| format!("line {n}: {e}")))
        .collect()
}

/// Feeds `events` through the dashboard, letting each viewport animation
/// finish before rendering. Returns the initial frame followed by one frame
/// per event.
pub fn replay(dash: &mut Dashboard, events: &[NavEvent]) -> Vec<RenderFrame> {
    let step_ms = dash.catalog().zoom().duration_ms.max(0.0) + 1.0;
    let mut now = Time::default();
    let mut frames = Vec::with_capacity(events.len() + 1);
    frames.push(dash.render());
    for event in events {
        dash.handle(event);
        dash.tick(now);
        now = now.after(step_ms);
        dash.tick(now);
        frames.push(dash.render());
    }
    frames
}
