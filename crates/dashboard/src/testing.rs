//! Shared fixtures for unit tests.

use formats::bootstrap::{Assets, assets_from_strings};
use formats::content::DashboardContent;
use formats::geojson::FeatureCollection;

use crate::catalog::Catalog;
use crate::controller::Dashboard;

pub const CONTENT_JSON: &str = include_str!("../tests/fixtures/content.json");
pub const WORLD_GEOJSON: &str = include_str!("../tests/fixtures/world.geojson");

pub fn assets() -> Assets {
    assets_from_strings(CONTENT_JSON, WORLD_GEOJSON).expect("fixture assets")
}

pub fn content() -> DashboardContent {
    assets().content
}

pub fn features() -> FeatureCollection {
    assets().features
}

pub fn catalog() -> Catalog {
    let features = features();
    Catalog::from_content(&content(), |code| {
        features
            .features
            .iter()
            .find(|f| f.code() == Some(code))
            .and_then(|f| f.name())
            .map(str::to_string)
    })
    .expect("fixture catalog")
}

pub fn dashboard() -> Dashboard {
    Dashboard::new(assets(), 800.0, 600.0).expect("fixture dashboard")
}
