//! Site branding loaded from `config.json`, falling back to
//! `config.example.json`, then to built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const PRIMARY_CONFIG: &str = "config.json";
pub const FALLBACK_CONFIG: &str = "config.example.json";

const TITLE_SUFFIX: &str = "Interaktive Konzern-Weltkarte";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub company_name: Option<String>,
    pub document_title: Option<String>,
    pub site_title: Option<String>,
    pub subtitle: Option<String>,
    pub logo: Option<String>,
    pub favicon: Option<String>,
}

impl SiteConfig {
    /// Explicit title, else `"{companyName} · Interaktive Konzern-Weltkarte"`.
    pub fn document_title(&self) -> Option<String> {
        if let Some(title) = self.document_title.as_deref().filter(|t| !t.is_empty()) {
            return Some(title.to_string());
        }
        self.company_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|name| format!("{name} · {TITLE_SUFFIX}"))
    }
}

/// Which source a `SiteConfig` came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigSource {
    Primary,
    Fallback,
    Defaults,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigSource::Primary => PRIMARY_CONFIG,
            ConfigSource::Fallback => FALLBACK_CONFIG,
            ConfigSource::Defaults => "none",
        }
    }
}

/// Picks the first payload that parses to an object. Anything else is
/// skipped.
pub fn resolve_site_config(
    primary: Option<&str>,
    fallback: Option<&str>,
) -> (SiteConfig, ConfigSource) {
    let candidates = [
        (primary, ConfigSource::Primary),
        (fallback, ConfigSource::Fallback),
    ];
    for (payload, source) in candidates {
        let Some(payload) = payload else { continue };
        match parse_site_config(payload) {
            Ok(config) => {
                tracing::info!(source = source.as_str(), "loaded site config");
                return (config, source);
            }
            Err(err) => {
                tracing::warn!(source = source.as_str(), error = %err, "skipping site config");
            }
        }
    }
    tracing::info!("no site config found, using defaults");
    (SiteConfig::default(), ConfigSource::Defaults)
}

/// Only a JSON object counts as a config; other documents are rejected.
fn parse_site_config(payload: &str) -> Result<SiteConfig, String> {
    let value: serde_json::Value =
        crate::json::from_str_lenient(payload).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// Reads `config.json` / `config.example.json` from `dir`.
pub fn load_site_config(dir: &Path) -> (SiteConfig, ConfigSource) {
    let primary = std::fs::read_to_string(dir.join(PRIMARY_CONFIG)).ok();
    let fallback = std::fs::read_to_string(dir.join(FALLBACK_CONFIG)).ok();
    resolve_site_config(primary.as_deref(), fallback.as_deref())
}
