use foundation::time::Time;
use formats::bootstrap::Assets;
use runtime::event_bus::{Event, EventBus};
use scene::feature_index::FeatureIndex;
use scene::picking::{PointTarget, pick_feature, pick_point};
use scene::projector::GeoProjector;
use viewport::controller::{Motion, ZoomController};
use viewport::transform::ZoomTransform;

use crate::catalog::{Catalog, CatalogError};
use crate::event::NavEvent;
use crate::render::{RenderFrame, Tooltip, markers, render, tooltip};
use crate::state::{Level, ViewState};
use crate::transition::{Step, transition};

/// Screen-space hit radius of a point marker.
pub const MARKER_HIT_RADIUS: f64 = 20.0;

/// The dashboard session: navigation state, geography and viewport.
///
/// Ordering contract: `handle` applies the state change synchronously; the
/// viewport animation it requests starts on the next `tick`.
#[derive(Debug)]
pub struct Dashboard {
    catalog: Catalog,
    index: FeatureIndex,
    projector: GeoProjector,
    zoom: ZoomController,
    state: ViewState,
    bus: EventBus,
    now: Time,
}

impl Dashboard {
    pub fn new(assets: Assets, width: f64, height: f64) -> Result<Self, CatalogError> {
        let Assets {
            content,
            features,
            warnings,
        } = assets;

        let catalog = Catalog::from_content(&content, |code| {
            features
                .features
                .iter()
                .find(|f| f.code() == Some(code))
                .and_then(|f| f.name())
                .map(str::to_string)
        })?;
        let index = FeatureIndex::build(features, catalog.codes(), catalog.excluded_features());
        let projector = GeoProjector::new(
            catalog.projection(),
            &index,
            width,
            height,
            catalog.zoom().viewport_margin,
        );
        let zoom = ZoomController::new(catalog.zoom().clone(), projector.size(), projector.world_bounds());
        let state = ViewState::world(catalog.default_lens());

        let mut bus = EventBus::new();
        for warning in &warnings {
            bus.emit("content", warning.to_string());
        }
        for code in index.missing_codes() {
            bus.emit("geography", format!("no shape for {code}"));
        }
        tracing::info!(
            features = index.len(),
            regions = catalog.regions().len(),
            "dashboard ready"
        );

        Ok(Self {
            catalog,
            index,
            projector,
            zoom,
            state,
            bus,
            now: Time::default(),
        })
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn projector(&self) -> &GeoProjector {
        &self.projector
    }

    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    pub fn is_animating(&self) -> bool {
        self.zoom.is_animating()
    }

    /// Applies one event. Navigation steps animate the viewport to the new
    /// focus; panel steps leave it alone.
    pub fn handle(&mut self, event: &NavEvent) -> Step {
        let step = transition(&self.state, event, &self.catalog);
        match &step {
            Step::Unchanged => {
                tracing::trace!(event = event.name(), "ignored");
            }
            Step::Panel(next) | Step::Navigate(next) => {
                tracing::debug!(
                    event = event.name(),
                    from = %self.state.describe(),
                    to = %next.describe(),
                    "transition"
                );
                self.bus.emit_at(
                    self.now,
                    event.name(),
                    format!("{} -> {}", self.state.describe(), next.describe()),
                );
                self.state = next.clone();
            }
        }
        if let Step::Navigate(_) = step {
            let target = self.fit_target(&self.state);
            self.zoom.zoom_to(target, Motion::Animated);
        }
        step
    }

    /// Zoom transform that frames `state`'s focus.
    pub fn fit_target(&self, state: &ViewState) -> ZoomTransform {
        let settings = self.zoom.settings();
        match &state.level {
            Level::World => ZoomTransform::IDENTITY,
            Level::Region { region, .. } => {
                let Some(record) = self.catalog.region(region) else {
                    return ZoomTransform::IDENTITY;
                };
                let bounds = self
                    .projector
                    .bounds_of(record.members.iter().map(String::as_str));
                self.zoom.fit(bounds, settings.region_padding)
            }
            Level::Entity { entity, .. } => {
                let bounds = self.projector.bounds_of([entity.as_str()]);
                self.zoom.fit(bounds, settings.entity_padding)
            }
        }
    }

    /// Refits the map to a new viewport and snaps to the current focus.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.projector.resize(&self.index, width, height);
        self.zoom
            .set_viewport(self.projector.size(), self.projector.world_bounds());
        let target = self.fit_target(&self.state);
        self.zoom.zoom_to(target, Motion::Immediate);
        self.bus.emit_at(
            self.now,
            "resize",
            format!("{}x{}", self.projector.size()[0], self.projector.size()[1]),
        );
    }

    pub fn pan(&mut self, dx: f64, dy: f64) -> ZoomTransform {
        self.zoom.pan_by(dx, dy)
    }

    pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) -> ZoomTransform {
        self.zoom.zoom_at([x, y], factor)
    }

    pub fn double_click(&mut self) -> Step {
        self.handle(&NavEvent::Reset)
    }

    /// Resolves a click in screen space: markers first, then entity shapes.
    /// Anything else counts as a click outside.
    pub fn click_at(&mut self, x: f64, y: f64) -> Step {
        let event = self.resolve_click([x, y]);
        self.handle(&event)
    }

    fn resolve_click(&self, p: [f64; 2]) -> NavEvent {
        let visible = markers(&self.state, &self.catalog, &self.projector, self.zoom.transform());
        let targets: Vec<PointTarget<'_>> = visible
            .iter()
            .map(|m| PointTarget {
                id: &m.id,
                position: [m.x, m.y],
            })
            .collect();
        if let Some(point) = pick_point(&targets, p, MARKER_HIT_RADIUS) {
            return NavEvent::ClickMarker {
                point: point.to_string(),
            };
        }

        let local = self.zoom.transform().invert(p);
        match pick_feature(self.projector.features(), local)
            .and_then(|f| f.code.as_deref())
            .filter(|code| self.catalog.entity(code).is_some())
        {
            Some(code) => NavEvent::ClickEntity {
                code: code.to_string(),
            },
            None => NavEvent::ClickOutside,
        }
    }

    /// Tooltip for the feature under the pointer.
    pub fn hover(&self, x: f64, y: f64) -> Option<Tooltip> {
        let local = self.zoom.transform().invert([x, y]);
        let feature = pick_feature(self.projector.features(), local)?;
        tooltip(&self.catalog, feature.code.as_deref(), feature.name.as_deref())
    }

    /// Advances the viewport animation. Returns whether the map moved.
    pub fn tick(&mut self, now: Time) -> bool {
        self.now = now;
        self.zoom.tick(now)
    }

    pub fn render(&self) -> RenderFrame {
        render(
            &self.state,
            &self.catalog,
            &self.projector,
            self.zoom.transform(),
            self.zoom.stroke_width(),
        )
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.render())
    }

    /// Takes the recorded transition trace.
    pub fn drain_trace(&mut self) -> Vec<Event> {
        self.bus.drain()
    }
}
