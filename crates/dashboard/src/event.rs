use serde::{Deserialize, Serialize};

/// User intent, already resolved from pointer/keyboard input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum NavEvent {
    /// Click on an entity's shape on the map.
    ClickEntity { code: String },
    /// Region chip.
    SelectRegion { region: String },
    /// Country-list button.
    SelectEntity { code: String },
    ClickMarker { point: String },
    /// Lens selector button, by its label.
    SelectLens { option: String },
    ClosePanel,
    /// Click that hit neither the panel nor a marker nor an entity.
    ClickOutside,
    Escape,
    BreadcrumbWorld,
    BreadcrumbRegion,
    /// Reset control or map double-click.
    Reset,
}

impl NavEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NavEvent::ClickEntity { .. } => "clickEntity",
            NavEvent::SelectRegion { .. } => "selectRegion",
            NavEvent::SelectEntity { .. } => "selectEntity",
            NavEvent::ClickMarker { .. } => "clickMarker",
            NavEvent::SelectLens { .. } => "selectLens",
            NavEvent::ClosePanel => "closePanel",
            NavEvent::ClickOutside => "clickOutside",
            NavEvent::Escape => "escape",
            NavEvent::BreadcrumbWorld => "breadcrumbWorld",
            NavEvent::BreadcrumbRegion => "breadcrumbRegion",
            NavEvent::Reset => "reset",
        }
    }
}
