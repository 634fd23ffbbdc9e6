//! The navigation state machine: `(state, event) -> step`, no side effects.

use crate::catalog::Catalog;
use crate::event::NavEvent;
use crate::state::{Level, ViewState};

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Unchanged,
    /// Only the detail panel changed; the viewport stays where it is.
    Panel(ViewState),
    /// Level or focus changed; the viewport re-fits.
    Navigate(ViewState),
}

impl Step {
    pub fn state(&self) -> Option<&ViewState> {
        match self {
            Step::Unchanged => None,
            Step::Panel(s) | Step::Navigate(s) => Some(s),
        }
    }
}

pub fn transition(state: &ViewState, event: &NavEvent, catalog: &Catalog) -> Step {
    match event {
        NavEvent::ClickEntity { code } => click_entity(state, code, catalog),
        NavEvent::SelectRegion { region } => match catalog.region(region) {
            Some(r) => Step::Navigate(region_state(&r.id, None, catalog)),
            None => Step::Unchanged,
        },
        NavEvent::SelectEntity { code } => match catalog.entity(code) {
            Some(e) if e.active => Step::Navigate(entity_state(&e.region, &e.code, catalog)),
            _ => Step::Unchanged,
        },
        NavEvent::ClickMarker { point } => open_point(state, point, catalog),
        NavEvent::SelectLens { option } => select_lens(state, option, catalog),
        NavEvent::ClosePanel | NavEvent::ClickOutside => close_point(state),
        NavEvent::Escape => escape(state, catalog),
        NavEvent::BreadcrumbWorld => match state.level {
            Level::World => Step::Unchanged,
            _ => Step::Navigate(ViewState::world(catalog.default_lens())),
        },
        NavEvent::BreadcrumbRegion => match &state.level {
            Level::Entity { region, .. } => Step::Navigate(region_state(region, None, catalog)),
            _ => Step::Unchanged,
        },
        NavEvent::Reset => Step::Navigate(ViewState::world(catalog.default_lens())),
    }
}

fn region_state(region: &str, hint: Option<&str>, catalog: &Catalog) -> ViewState {
    ViewState {
        level: Level::Region {
            region: region.to_string(),
            hint: hint.map(str::to_string),
        },
        lens: catalog.default_lens(),
    }
}

fn entity_state(region: &str, entity: &str, catalog: &Catalog) -> ViewState {
    ViewState {
        level: Level::Entity {
            region: region.to_string(),
            entity: entity.to_string(),
            point: None,
        },
        lens: catalog.default_lens(),
    }
}

fn click_entity(state: &ViewState, code: &str, catalog: &Catalog) -> Step {
    let Some(entity) = catalog.entity(code).filter(|e| e.active) else {
        return Step::Unchanged;
    };

    match &state.level {
        Level::World => Step::Navigate(region_state(&entity.region, Some(code), catalog)),
        Level::Region { region, .. } if *region == entity.region => {
            Step::Navigate(entity_state(region, code, catalog))
        }
        Level::Entity {
            entity: current, ..
        } if current == code => close_point(state),
        Level::Entity { region, .. } if *region == entity.region => {
            Step::Navigate(entity_state(region, code, catalog))
        }
        Level::Region { .. } | Level::Entity { .. } => {
            Step::Navigate(region_state(&entity.region, Some(code), catalog))
        }
    }
}

fn open_point(state: &ViewState, point: &str, catalog: &Catalog) -> Step {
    let Level::Entity { entity, .. } = &state.level else {
        return Step::Unchanged;
    };
    if catalog.point(entity, point).is_none() {
        return Step::Unchanged;
    }
    match state.with_point(Some(point.to_string())) {
        Some(mut next) => {
            next.lens = catalog.default_lens();
            Step::Panel(next)
        }
        None => Step::Unchanged,
    }
}

fn select_lens(state: &ViewState, option: &str, catalog: &Catalog) -> Step {
    let (Some(entity), Some(point)) = (state.entity(), state.point()) else {
        return Step::Unchanged;
    };
    if catalog.point(entity, point).is_none_or(|p| p.coming_soon) {
        return Step::Unchanged;
    }
    match catalog.lens_by_label(option) {
        Some(lens) if *lens != state.lens => Step::Panel(ViewState {
            level: state.level.clone(),
            lens: lens.clone(),
        }),
        _ => Step::Unchanged,
    }
}

fn close_point(state: &ViewState) -> Step {
    if state.point().is_none() {
        return Step::Unchanged;
    }
    state
        .with_point(None)
        .map(Step::Panel)
        .unwrap_or(Step::Unchanged)
}

fn escape(state: &ViewState, catalog: &Catalog) -> Step {
    match &state.level {
        Level::Entity { point: Some(_), .. } => close_point(state),
        Level::Entity { region, .. } => Step::Navigate(region_state(region, None, catalog)),
        Level::Region { .. } => Step::Navigate(ViewState::world(catalog.default_lens())),
        Level::World => Step::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::{Step, transition};
    use crate::catalog::Catalog;
    use crate::event::NavEvent;
    use crate::state::{Lens, Level, ViewState};
    use crate::testing;
    use pretty_assertions::assert_eq;

    fn click(code: &str) -> NavEvent {
        NavEvent::ClickEntity {
            code: code.to_string(),
        }
    }

    fn marker(point: &str) -> NavEvent {
        NavEvent::ClickMarker {
            point: point.to_string(),
        }
    }

    fn lens(option: &str) -> NavEvent {
        NavEvent::SelectLens {
            option: option.to_string(),
        }
    }

    /// Applies events, keeping the state on `Unchanged`.
    fn run(catalog: &Catalog, events: &[NavEvent]) -> ViewState {
        let mut state = ViewState::world(catalog.default_lens());
        for event in events {
            if let Some(next) = transition(&state, event, catalog).state() {
                state = next.clone();
            }
        }
        state
    }

    fn group() -> Lens {
        Lens::Unit("Group".to_string())
    }

    #[test]
    fn world_click_enters_region_with_hint() {
        let catalog = testing::catalog();
        let step = transition(&ViewState::world(group()), &click("DEU"), &catalog);
        assert_eq!(
            step,
            Step::Navigate(ViewState {
                level: Level::Region {
                    region: "Europa".to_string(),
                    hint: Some("DEU".to_string())
                },
                lens: group(),
            })
        );
    }

    #[test]
    fn inactive_and_unknown_entities_are_ignored() {
        let catalog = testing::catalog();
        let states = [
            run(&catalog, &[]),
            run(&catalog, &[click("DEU")]),
            run(&catalog, &[click("DEU"), click("DEU")]),
            run(&catalog, &[click("DEU"), click("DEU"), marker("deu-finance")]),
        ];
        for state in &states {
            for code in ["POL", "FRA", "JPN", "BRA", "XXX"] {
                assert_eq!(transition(state, &click(code), &catalog), Step::Unchanged);
                let select = NavEvent::SelectEntity {
                    code: code.to_string(),
                };
                assert_eq!(transition(state, &select, &catalog), Step::Unchanged);
            }
        }
    }

    #[test]
    fn entity_level_keeps_region_linkage() {
        let catalog = testing::catalog();
        let state = run(&catalog, &[click("DEU"), click("AUT")]);
        assert_eq!(state.region(), Some("Europa"));
        assert_eq!(state.entity(), Some("AUT"));
        let parent = catalog.entity("AUT").map(|e| e.region.as_str());
        assert_eq!(state.region(), parent);
    }

    #[test]
    fn clicking_another_region_refocuses_the_region() {
        let catalog = testing::catalog();
        let from_region = run(&catalog, &[click("DEU"), click("CHN")]);
        assert_eq!(
            from_region.level,
            Level::Region {
                region: "Asien".to_string(),
                hint: Some("CHN".to_string())
            }
        );
        let from_entity = run(&catalog, &[click("DEU"), click("DEU"), click("CHN")]);
        assert_eq!(from_entity, from_region);
    }

    #[test]
    fn same_entity_click_only_closes_the_point() {
        let catalog = testing::catalog();
        let focused = run(&catalog, &[click("DEU"), click("DEU")]);
        assert_eq!(transition(&focused, &click("DEU"), &catalog), Step::Unchanged);

        let open = run(&catalog, &[click("DEU"), click("DEU"), marker("deu-finance")]);
        assert_eq!(
            transition(&open, &click("DEU"), &catalog),
            Step::Panel(focused)
        );
    }

    #[test]
    fn markers_open_only_at_entity_level_and_reset_the_lens() {
        let catalog = testing::catalog();
        let region = run(&catalog, &[click("DEU")]);
        assert_eq!(transition(&region, &marker("deu-finance"), &catalog), Step::Unchanged);

        let entity = run(&catalog, &[click("DEU"), click("DEU")]);
        assert_eq!(transition(&entity, &marker("aut-finance"), &catalog), Step::Unchanged);

        let switched = run(
            &catalog,
            &[click("DEU"), click("DEU"), marker("deu-finance"), lens("RVS")],
        );
        assert_eq!(switched.lens, Lens::Unit("RVS".to_string()));
        let Step::Panel(reopened) = transition(&switched, &marker("deu-finance"), &catalog) else {
            panic!("expected panel step");
        };
        assert_eq!(reopened.lens, group());
        assert_eq!(reopened.point(), Some("deu-finance"));
    }

    #[test]
    fn lens_switch_never_moves_focus() {
        let catalog = testing::catalog();
        let open = run(&catalog, &[click("DEU"), click("DEU"), marker("deu-finance")]);
        for option in ["CVS", "RVS", "CVS vs RVS", "Group"] {
            let next = run(
                &catalog,
                &[click("DEU"), click("DEU"), marker("deu-finance"), lens(option)],
            );
            assert_eq!(next.level, open.level);
        }
        let compare = run(
            &catalog,
            &[click("DEU"), click("DEU"), marker("deu-finance"), lens("CVS vs RVS")],
        );
        assert_eq!(compare.lens, Lens::Compare);
        assert_eq!(transition(&open, &lens("Group"), &catalog), Step::Unchanged);
        assert_eq!(transition(&open, &lens("Unknown"), &catalog), Step::Unchanged);
    }

    #[test]
    fn coming_soon_points_ignore_lens_switches() {
        let catalog = testing::catalog();
        let open = run(&catalog, &[click("DEU"), click("DEU"), marker("deu-people")]);
        assert_eq!(open.point(), Some("deu-people"));
        assert_eq!(transition(&open, &lens("CVS"), &catalog), Step::Unchanged);
    }

    #[test]
    fn escape_moves_exactly_one_level_up() {
        let catalog = testing::catalog();
        let world = run(&catalog, &[]);
        assert_eq!(transition(&world, &NavEvent::Escape, &catalog), Step::Unchanged);

        let open = run(&catalog, &[click("DEU"), click("DEU"), marker("deu-finance")]);
        let Step::Panel(closed) = transition(&open, &NavEvent::Escape, &catalog) else {
            panic!("expected panel step");
        };
        assert_eq!(closed.entity(), Some("DEU"));
        assert_eq!(closed.point(), None);

        let Step::Navigate(region) = transition(&closed, &NavEvent::Escape, &catalog) else {
            panic!("expected navigate step");
        };
        assert_eq!(
            region.level,
            Level::Region {
                region: "Europa".to_string(),
                hint: None
            }
        );

        let Step::Navigate(top) = transition(&region, &NavEvent::Escape, &catalog) else {
            panic!("expected navigate step");
        };
        assert_eq!(top, world);
    }

    #[test]
    fn breadcrumbs_and_reset() {
        let catalog = testing::catalog();
        let world = run(&catalog, &[]);
        let entity = run(&catalog, &[click("DEU"), click("DEU")]);
        let region = run(&catalog, &[click("DEU")]);

        assert_eq!(
            transition(&world, &NavEvent::BreadcrumbWorld, &catalog),
            Step::Unchanged
        );
        assert_eq!(
            transition(&region, &NavEvent::BreadcrumbRegion, &catalog),
            Step::Unchanged
        );
        let Step::Navigate(up) = transition(&entity, &NavEvent::BreadcrumbRegion, &catalog) else {
            panic!("expected navigate step");
        };
        assert_eq!(up.region(), Some("Europa"));
        assert_eq!(up.entity(), None);

        assert_eq!(
            transition(&entity, &NavEvent::Reset, &catalog),
            Step::Navigate(world.clone())
        );
        assert_eq!(
            transition(&world, &NavEvent::Reset, &catalog),
            Step::Navigate(world)
        );
    }

    #[test]
    fn chips_and_country_list_navigate_directly() {
        let catalog = testing::catalog();
        let world = run(&catalog, &[]);
        let step = transition(
            &world,
            &NavEvent::SelectRegion {
                region: "Asien".to_string(),
            },
            &catalog,
        );
        assert_eq!(step.state().and_then(|s| s.region()), Some("Asien"));

        let step = transition(
            &world,
            &NavEvent::SelectEntity {
                code: "AUT".to_string(),
            },
            &catalog,
        );
        assert_eq!(step.state().and_then(|s| s.entity()), Some("AUT"));
        assert_eq!(
            transition(
                &world,
                &NavEvent::SelectRegion {
                    region: "Atlantis".to_string()
                },
                &catalog
            ),
            Step::Unchanged
        );
    }

    #[test]
    fn click_outside_closes_only_an_open_point() {
        let catalog = testing::catalog();
        let region = run(&catalog, &[click("DEU")]);
        assert_eq!(
            transition(&region, &NavEvent::ClickOutside, &catalog),
            Step::Unchanged
        );
        let open = run(&catalog, &[click("DEU"), click("DEU"), marker("deu-finance")]);
        let step = transition(&open, &NavEvent::ClosePanel, &catalog);
        assert_eq!(step.state().and_then(|s| s.point()), None);
        assert!(matches!(step, Step::Panel(_)));
    }
}
