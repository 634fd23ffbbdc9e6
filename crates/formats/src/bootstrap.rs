use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::content::{ContentError, ContentIssue, DashboardContent};
use crate::geojson::{FeatureCollection, GeoJsonError};

pub const MANIFEST_FILE: &str = "worldmap.manifest.json";
pub const MANIFEST_VERSION: &str = "1.0";

const DEFAULT_CONTENT_FILE: &str = "content.json";
const DEFAULT_GEOGRAPHY_FILE: &str = "world.geojson";

/// Optional manifest naming the asset files relative to its directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifest {
    pub version: String,
    pub content: String,
    pub geography: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub content: PathBuf,
    pub geography: PathBuf,
}

impl AssetPaths {
    /// `content.json` and `world.geojson` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            content: dir.join(DEFAULT_CONTENT_FILE),
            geography: dir.join(DEFAULT_GEOGRAPHY_FILE),
        }
    }

    /// Uses `worldmap.manifest.json` when present, else the default names.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, BootstrapError> {
        let dir = dir.as_ref();
        if dir.join(MANIFEST_FILE).is_file() {
            Self::from_manifest(dir)
        } else {
            Ok(Self::in_dir(dir))
        }
    }

    pub fn from_manifest(dir: impl AsRef<Path>) -> Result<Self, BootstrapError> {
        let dir = dir.as_ref();
        let path = dir.join(MANIFEST_FILE);
        let bytes = fs::read(&path).map_err(|source| BootstrapError::Io {
            path: path.clone(),
            source,
        })?;
        let manifest: AssetManifest =
            serde_json::from_slice(&bytes).map_err(BootstrapError::Manifest)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(BootstrapError::UnsupportedManifestVersion(manifest.version));
        }
        Ok(Self {
            content: dir.join(manifest.content),
            geography: dir.join(manifest.geography),
        })
    }
}

/// Parsed, validated startup inputs.
#[derive(Debug, Clone)]
pub struct Assets {
    pub content: DashboardContent,
    pub features: FeatureCollection,
    /// Non-fatal content issues, already logged.
    pub warnings: Vec<ContentIssue>,
}

#[derive(Debug)]
pub enum BootstrapError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Manifest(serde_json::Error),
    UnsupportedManifestVersion(String),
    Content(ContentError),
    Geography(GeoJsonError),
    InvalidContent(Vec<ContentIssue>),
}

impl BootstrapError {
    /// Message shown in place of the map.
    pub fn user_message(&self) -> String {
        match self {
            BootstrapError::InvalidContent(_) | BootstrapError::Content(_) => {
                "Die Inhaltsdaten der Karte sind fehlerhaft.".to_string()
            }
            _ => "Die Kartendaten konnten nicht geladen werden.".to_string(),
        }
    }
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            BootstrapError::Manifest(e) => write!(f, "invalid asset manifest: {e}"),
            BootstrapError::UnsupportedManifestVersion(v) => {
                write!(f, "unsupported manifest version: {v}")
            }
            BootstrapError::Content(e) => write!(f, "{e}"),
            BootstrapError::Geography(e) => write!(f, "geography: {e}"),
            BootstrapError::InvalidContent(issues) => {
                write!(f, "content has {} fatal issue(s)", issues.len())?;
                for issue in issues {
                    write!(f, "; {issue}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Io { source, .. } => Some(source),
            BootstrapError::Manifest(e) => Some(e),
            BootstrapError::Content(e) => Some(e),
            BootstrapError::Geography(e) => Some(e),
            _ => None,
        }
    }
}

pub fn load_assets(paths: &AssetPaths) -> Result<Assets, BootstrapError> {
    let read = |path: &PathBuf| {
        fs::read_to_string(path).map_err(|source| BootstrapError::Io {
            path: path.clone(),
            source,
        })
    };
    let content = read(&paths.content)?;
    let geography = read(&paths.geography)?;
    assets_from_strings(&content, &geography)
}

/// Parses and validates both payloads; fatal content issues abort.
pub fn assets_from_strings(content: &str, geography: &str) -> Result<Assets, BootstrapError> {
    let content = DashboardContent::from_json_str(content).map_err(BootstrapError::Content)?;
    let features =
        FeatureCollection::from_geojson_str(geography).map_err(BootstrapError::Geography)?;

    let (fatal, warnings): (Vec<_>, Vec<_>) =
        content.validate().into_iter().partition(|i| i.is_fatal());
    for issue in &warnings {
        tracing::warn!(%issue, "content issue");
    }
    if !fatal.is_empty() {
        return Err(BootstrapError::InvalidContent(fatal));
    }

    tracing::info!(
        regions = content.regions.len(),
        countries = content.countries.len(),
        features = features.features.len(),
        "loaded dashboard assets"
    );
    Ok(Assets {
        content,
        features,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::{AssetPaths, BootstrapError, MANIFEST_FILE, assets_from_strings, load_assets};
    use std::fs;

    const GEO: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    #[test]
    fn fatal_content_issues_abort_bootstrap() {
        let content = r#"{"regions": [], "countries": [
            {"code": "DEU", "name": "Deutschland", "region": "Nowhere"}
        ]}"#;
        let err = assets_from_strings(content, GEO).expect_err("fatal");
        assert!(matches!(err, BootstrapError::InvalidContent(ref v) if v.len() == 1));
        assert_eq!(
            err.user_message(),
            "Die Inhaltsdaten der Karte sind fehlerhaft."
        );
    }

    #[test]
    fn malformed_geography_is_reported() {
        let err = assets_from_strings("{}", "[1, 2]").expect_err("not geojson");
        assert!(matches!(err, BootstrapError::Geography(_)));
        assert_eq!(
            err.user_message(),
            "Die Kartendaten konnten nicht geladen werden."
        );
    }

    #[test]
    fn loads_from_manifest_dir() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let dir = tmp.path();
        fs::write(
            dir.join(MANIFEST_FILE),
            r#"{"version": "1.0", "content": "c.json", "geography": "g.geojson"}"#,
        )
        .expect("write manifest");
        fs::write(dir.join("c.json"), "{}").expect("write content");
        fs::write(dir.join("g.geojson"), GEO).expect("write geo");

        let paths = AssetPaths::from_dir(dir).expect("paths");
        assert_eq!(paths.content, dir.join("c.json"));
        let assets = load_assets(&paths).expect("assets");
        assert!(assets.content.countries.is_empty());
        assert!(assets.warnings.is_empty());
    }

    #[test]
    fn missing_files_surface_io_errors() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let paths = AssetPaths::from_dir(tmp.path()).expect("default paths");
        assert_eq!(paths, AssetPaths::in_dir(tmp.path()));
        let err = load_assets(&paths).expect_err("missing");
        assert!(matches!(err, BootstrapError::Io { .. }));
    }
}
