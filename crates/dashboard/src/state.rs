use serde::{Deserialize, Serialize};

/// Organizational-unit lens applied to an open data point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "unit")]
pub enum Lens {
    /// Reads `data[unit]`.
    Unit(String),
    /// Reads the `compare` structure.
    Compare,
}

/// Drill level. The open data point lives inside `Entity`, so a point can
/// only be open while an entity is focused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "level")]
pub enum Level {
    World,
    Region {
        region: String,
        /// Entity clicked to enter the region, marked in the country list.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    Entity {
        region: String,
        entity: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        point: Option<String>,
    },
}

impl Level {
    pub fn name(&self) -> &'static str {
        match self {
            Level::World => "world",
            Level::Region { .. } => "region",
            Level::Entity { .. } => "entity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub level: Level,
    pub lens: Lens,
}

impl ViewState {
    pub fn world(lens: Lens) -> Self {
        Self {
            level: Level::World,
            lens,
        }
    }

    pub fn region(&self) -> Option<&str> {
        match &self.level {
            Level::World => None,
            Level::Region { region, .. } | Level::Entity { region, .. } => Some(region),
        }
    }

    pub fn entity(&self) -> Option<&str> {
        match &self.level {
            Level::Entity { entity, .. } => Some(entity),
            _ => None,
        }
    }

    pub fn point(&self) -> Option<&str> {
        match &self.level {
            Level::Entity { point, .. } => point.as_deref(),
            _ => None,
        }
    }

    /// The clicked entity at `Region` level, the focused one at `Entity`.
    pub fn marked_entity(&self) -> Option<&str> {
        match &self.level {
            Level::World => None,
            Level::Region { hint, .. } => hint.as_deref(),
            Level::Entity { entity, .. } => Some(entity),
        }
    }

    /// Same state with the open point replaced.
    pub fn with_point(&self, point: Option<String>) -> Option<Self> {
        match &self.level {
            Level::Entity { region, entity, .. } => Some(Self {
                level: Level::Entity {
                    region: region.clone(),
                    entity: entity.clone(),
                    point,
                },
                lens: self.lens.clone(),
            }),
            _ => None,
        }
    }

    /// Short form for traces, e.g. `entity(Europa/DEU#deu-finance)`.
    pub fn describe(&self) -> String {
        match &self.level {
            Level::World => "world".to_string(),
            Level::Region { region, .. } => format!("region({region})"),
            Level::Entity {
                region,
                entity,
                point: None,
            } => format!("entity({region}/{entity})"),
            Level::Entity {
                region,
                entity,
                point: Some(point),
            } => format!("entity({region}/{entity}#{point})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Lens, Level, ViewState};
    use pretty_assertions::assert_eq;

    fn entity_state() -> ViewState {
        ViewState {
            level: Level::Entity {
                region: "Europa".to_string(),
                entity: "DEU".to_string(),
                point: Some("deu-finance".to_string()),
            },
            lens: Lens::Unit("Group".to_string()),
        }
    }

    #[test]
    fn accessors_follow_the_level() {
        let world = ViewState::world(Lens::Compare);
        assert_eq!(world.region(), None);
        assert_eq!(world.point(), None);

        let s = entity_state();
        assert_eq!(s.region(), Some("Europa"));
        assert_eq!(s.entity(), Some("DEU"));
        assert_eq!(s.point(), Some("deu-finance"));
        assert_eq!(s.describe(), "entity(Europa/DEU#deu-finance)");
    }

    #[test]
    fn with_point_only_applies_at_entity_level() {
        let closed = entity_state().with_point(None).expect("entity level");
        assert_eq!(closed.point(), None);
        assert_eq!(closed.entity(), Some("DEU"));
        assert!(ViewState::world(Lens::Compare)
            .with_point(Some("x".to_string()))
            .is_none());
    }

    #[test]
    fn serializes_with_tagged_level() {
        let json = serde_json::to_value(entity_state()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "level": {"level": "entity", "region": "Europa", "entity": "DEU", "point": "deu-finance"},
                "lens": {"kind": "unit", "unit": "Group"}
            })
        );
    }
}
