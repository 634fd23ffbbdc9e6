//! Read-only lookup tables built once from the dashboard content.

use std::collections::BTreeMap;

use formats::content::{Category, DashboardContent, DataPointContent, Labels, ZoomSettings};
use foundation::math::ProjectionKind;

use crate::state::Lens;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub code: String,
    pub name: String,
    pub region: String,
    pub active: bool,
    pub overview: Option<String>,
    pub points: Vec<DataPointContent>,
    /// Listed by a region but absent from the entity table.
    pub placeholder: bool,
}

impl EntityRecord {
    pub fn point(&self, id: &str) -> Option<&DataPointContent> {
        self.points.iter().find(|p| p.id == id)
    }
}

/// One entry of the lens selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensOption {
    pub label: String,
    pub lens: Lens,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NoLenses,
    DuplicateRegion(String),
    DuplicateEntity(String),
    UnknownRegion { code: String, region: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NoLenses => write!(f, "no organizational-unit options configured"),
            CatalogError::DuplicateRegion(id) => write!(f, "duplicate region {id}"),
            CatalogError::DuplicateEntity(code) => write!(f, "duplicate entity {code}"),
            CatalogError::UnknownRegion { code, region } => {
                write!(f, "entity {code} belongs to unknown region {region}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone)]
pub struct Catalog {
    regions: Vec<RegionRecord>,
    region_index: BTreeMap<String, usize>,
    entities: BTreeMap<String, EntityRecord>,
    categories: Vec<Category>,
    lenses: Vec<LensOption>,
    labels: Labels,
    zoom: ZoomSettings,
    projection: ProjectionKind,
    excluded_features: Vec<String>,
}

impl Catalog {
    /// Builds the tables. `feature_name` supplies names for placeholder
    /// entities that only exist as region members.
    pub fn from_content<F>(content: &DashboardContent, feature_name: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if content.org_options.is_empty() {
            return Err(CatalogError::NoLenses);
        }

        let mut regions = Vec::with_capacity(content.regions.len());
        let mut region_index = BTreeMap::new();
        for region in &content.regions {
            if region_index.insert(region.id.clone(), regions.len()).is_some() {
                return Err(CatalogError::DuplicateRegion(region.id.clone()));
            }
            regions.push(RegionRecord {
                id: region.id.clone(),
                name: region.display_name().to_string(),
                description: region.description.clone(),
                members: region.countries.clone(),
            });
        }

        let mut entities = BTreeMap::new();
        for entity in &content.countries {
            if !region_index.contains_key(&entity.region) {
                return Err(CatalogError::UnknownRegion {
                    code: entity.code.clone(),
                    region: entity.region.clone(),
                });
            }
            let record = EntityRecord {
                code: entity.code.clone(),
                name: entity.name.clone(),
                region: entity.region.clone(),
                active: entity.active,
                overview: entity.overview.clone(),
                points: entity.points.clone(),
                placeholder: false,
            };
            if entities.insert(entity.code.clone(), record).is_some() {
                return Err(CatalogError::DuplicateEntity(entity.code.clone()));
            }
        }

        let mut placeholders = 0usize;
        for region in &regions {
            for code in &region.members {
                if entities.contains_key(code) {
                    continue;
                }
                let name = feature_name(code).unwrap_or_else(|| code.clone());
                entities.insert(
                    code.clone(),
                    EntityRecord {
                        code: code.clone(),
                        name,
                        region: region.id.clone(),
                        active: false,
                        overview: None,
                        points: Vec::new(),
                        placeholder: true,
                    },
                );
                placeholders += 1;
            }
        }

        let lenses = content
            .org_options
            .iter()
            .map(|label| LensOption {
                label: label.clone(),
                lens: if content.compare_option.as_ref() == Some(label) {
                    Lens::Compare
                } else {
                    Lens::Unit(label.clone())
                },
            })
            .collect();

        tracing::debug!(
            regions = regions.len(),
            entities = entities.len(),
            placeholders,
            "built catalog"
        );
        Ok(Self {
            regions,
            region_index,
            entities,
            categories: content.categories.clone(),
            lenses,
            labels: content.labels.clone(),
            zoom: content.zoom.clone(),
            projection: content.projection,
            excluded_features: content.excluded_features.clone(),
        })
    }

    /// Regions in content order.
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    pub fn region(&self, id: &str) -> Option<&RegionRecord> {
        self.region_index.get(id).map(|&i| &self.regions[i])
    }

    pub fn entity(&self, code: &str) -> Option<&EntityRecord> {
        self.entities.get(code)
    }

    /// Entities sorted by code.
    pub fn entities(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.values()
    }

    pub fn is_active(&self, code: &str) -> bool {
        self.entity(code).is_some_and(|e| e.active)
    }

    /// Member records of `region`, in member order.
    pub fn members<'a>(&'a self, region: &'a RegionRecord) -> impl Iterator<Item = &'a EntityRecord> + 'a {
        region.members.iter().filter_map(|code| self.entity(code))
    }

    pub fn active_count(&self, region: &RegionRecord) -> usize {
        self.members(region).filter(|e| e.active).count()
    }

    pub fn point(&self, entity: &str, point: &str) -> Option<&DataPointContent> {
        self.entity(entity).and_then(|e| e.point(point))
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn lenses(&self) -> &[LensOption] {
        &self.lenses
    }

    /// First configured option.
    pub fn default_lens(&self) -> Lens {
        self.lenses
            .first()
            .map(|o| o.lens.clone())
            .unwrap_or(Lens::Compare)
    }

    pub fn lens_by_label(&self, label: &str) -> Option<&Lens> {
        self.lenses.iter().find(|o| o.label == label).map(|o| &o.lens)
    }

    pub fn lens_label(&self, lens: &Lens) -> Option<&str> {
        self.lenses
            .iter()
            .find(|o| &o.lens == lens)
            .map(|o| o.label.as_str())
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn zoom(&self) -> &ZoomSettings {
        &self.zoom
    }

    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    pub fn excluded_features(&self) -> &[String] {
        &self.excluded_features
    }

    /// Every code the map should know about: configured entities and
    /// placeholders.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError};
    use crate::state::Lens;
    use crate::testing;
    use formats::content::DashboardContent;
    use pretty_assertions::assert_eq;

    #[test]
    fn placeholders_fill_region_members() {
        let catalog = testing::catalog();
        let fra = catalog.entity("FRA").expect("placeholder");
        assert!(fra.placeholder);
        assert!(!fra.active);
        assert_eq!(fra.region, "Europa");
        assert_eq!(fra.name, "France");

        let europa = catalog.region("Europa").expect("Europa");
        let codes: Vec<&str> = catalog.members(europa).map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["DEU", "FRA", "AUT", "POL"]);
        assert_eq!(catalog.active_count(europa), 2);
    }

    #[test]
    fn placeholder_name_falls_back_to_code() {
        let catalog = testing::catalog();
        assert_eq!(catalog.entity("JPN").map(|e| e.name.as_str()), Some("JPN"));
    }

    #[test]
    fn lenses_follow_org_options() {
        let catalog = testing::catalog();
        assert_eq!(catalog.default_lens(), Lens::Unit("Group".to_string()));
        assert_eq!(catalog.lens_by_label("CVS vs RVS"), Some(&Lens::Compare));
        assert_eq!(catalog.lens_label(&Lens::Compare), Some("CVS vs RVS"));
        assert_eq!(catalog.lens_by_label("Nope"), None);
    }

    #[test]
    fn unknown_region_is_rejected() {
        let mut content = testing::content();
        content.countries[0].region = "Atlantis".to_string();
        let err = Catalog::from_content(&content, |_| None).expect_err("invalid");
        assert_eq!(
            err,
            CatalogError::UnknownRegion {
                code: "DEU".to_string(),
                region: "Atlantis".to_string()
            }
        );
    }

    #[test]
    fn empty_org_options_are_rejected() {
        let content = DashboardContent {
            org_options: Vec::new(),
            ..testing::content()
        };
        assert_eq!(
            Catalog::from_content(&content, |_| None).expect_err("invalid"),
            CatalogError::NoLenses
        );
    }
}
