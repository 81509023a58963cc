use std::time::Duration;

use narrative_viz::animation::render_ranking_tile;
use narrative_viz::api::{Presentation, PresentationConfig, PresentationEvent, Redraw};
use narrative_viz::core::Year;
use narrative_viz::data::{DatasetBundle, HappinessRow};
use narrative_viz::render::{NullRenderer, RenderFrame, TileSlot};
use narrative_viz::scenes::story::{CHANGE_OVER_TIME, CONCLUSION, HAPPINESS_AND_WEALTH};
use narrative_viz::scenes::{
    DrawTarget, ManualTimerService, SceneDescriptor, SceneRegistry, TileEnv, TileLayout,
    TileOutput, TileSize, TileSpec,
};
use narrative_viz::{VizError, VizResult};

fn bundle() -> DatasetBundle {
    let countries = ["Finland", "Denmark", "Norway", "Togo", "Burundi", "Chad"];
    let mut bundle = DatasetBundle::default();
    for (offset, year) in Year::ALL.into_iter().enumerate() {
        let rows = countries
            .iter()
            .enumerate()
            .map(|(i, country)| {
                HappinessRow::new(*country, format!("{:.3}", 7.6 - i as f64 - offset as f64 * 0.01))
            })
            .collect();
        bundle = bundle
            .with_happiness(year, rows)
            .with_population(year, countries.map(|country| (country, "5000000")))
            .with_gdp(year, countries.map(|country| (country, "20000")));
    }
    bundle
}

fn presentation() -> Presentation<NullRenderer, ManualTimerService> {
    Presentation::new(
        NullRenderer::default(),
        ManualTimerService::new(),
        bundle(),
        PresentationConfig::default(),
    )
    .expect("presentation")
}

fn go_to(presentation: &mut Presentation<NullRenderer, ManualTimerService>, title: &str) {
    let target = presentation
        .navigation()
        .registry()
        .position(title)
        .expect("scene exists");
    while presentation.navigation().current_index() < target {
        assert!(presentation.next().expect("next"));
    }
}

#[test]
fn previous_on_first_scene_is_a_no_op() {
    let mut presentation = presentation();
    presentation.start().expect("start");
    let clears = presentation.renderer().clear_count;

    assert_eq!(
        presentation.handle_event(PresentationEvent::Previous).expect("event"),
        Redraw::Nothing
    );
    assert_eq!(presentation.navigation().current_index(), 0);
    assert_eq!(presentation.renderer().clear_count, clears);
}

#[test]
fn next_on_last_scene_is_a_no_op() {
    let mut presentation = presentation();
    presentation.start().expect("start");
    go_to(&mut presentation, CONCLUSION);

    assert!(!presentation.next().expect("next"));
    assert_eq!(
        presentation.navigation().current_index(),
        presentation.navigation().registry().len() - 1
    );
    let header = presentation.renderer().header.as_ref().expect("header");
    assert_eq!(header.navigation.next, None);
    assert_eq!(header.navigation.previous.as_deref(), Some(HAPPINESS_AND_WEALTH));
}

#[test]
fn animated_scene_owns_exactly_one_timer() {
    let mut presentation = presentation();
    presentation.start().expect("start");
    assert_eq!(presentation.timers().active_count(), 0);

    go_to(&mut presentation, CHANGE_OVER_TIME);
    assert_eq!(presentation.timers().active_count(), 1);
    let timer = presentation.navigation().active_timer().expect("timer");
    assert_eq!(timer.slot(), TileSlot::TopChart);

    // Re-entering the scene replaces the timer instead of adding one.
    presentation.previous().expect("previous");
    presentation.next().expect("next");
    assert_eq!(presentation.timers().active_count(), 1);
}

#[test]
fn leaving_the_animated_scene_stops_every_tick() {
    let mut presentation = presentation();
    presentation.start().expect("start");
    go_to(&mut presentation, CHANGE_OVER_TIME);

    let delivered = presentation
        .advance_clock(Duration::from_millis(4_000))
        .expect("ticks");
    assert_eq!(delivered, 2);
    let stale = presentation.navigation().active_timer().expect("timer").id();
    let ticks = presentation.navigation().total_ticks();

    presentation.next().expect("next");
    assert!(presentation.navigation().active_timer().is_none());
    assert_eq!(presentation.timers().active_count(), 0);

    let delivered = presentation
        .advance_clock(Duration::from_secs(60))
        .expect("ticks");
    assert_eq!(delivered, 0);
    assert!(!presentation.on_timer(stale).expect("stale firing"));
    assert_eq!(presentation.navigation().total_ticks(), ticks);
}

#[test]
fn shutdown_releases_the_timer() {
    let mut presentation = presentation();
    presentation.start().expect("start");
    go_to(&mut presentation, CHANGE_OVER_TIME);

    presentation.shutdown().expect("shutdown");
    presentation.shutdown().expect("second shutdown");
    assert_eq!(presentation.timers().active_count(), 0);
    assert!(presentation.renderer().surfaces.is_empty());
}

#[test]
fn every_transition_rebuilds_the_scene_from_scratch() {
    let mut presentation = presentation();
    presentation.start().expect("start");
    let scenes = presentation.navigation().registry().len();

    for _ in 1..scenes {
        presentation.next().expect("next");
        let renderer = presentation.renderer();
        let expected = presentation
            .navigation()
            .current_scene()
            .expect("scene")
            .tiles
            .len();
        assert_eq!(renderer.surfaces.len(), expected);
        assert!(
            renderer
                .surfaces
                .values()
                .all(|surface| surface.render_count == 1)
        );
    }
    assert_eq!(presentation.renderer().clear_count, scenes);
}

fn blank_tile(_env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    Ok(TileOutput::frame(RenderFrame::new(target.viewport)))
}

fn failing_tile(_env: &TileEnv<'_>, _target: &DrawTarget) -> VizResult<TileOutput> {
    Err(VizError::Render("tile backend unavailable".to_owned()))
}

#[test]
fn failed_scene_entry_keeps_the_previous_index_and_no_timer() {
    let registry = SceneRegistry::new(vec![
        SceneDescriptor::new(
            "Start",
            TileLayout::empty().with(TileSlot::TopChart, TileSpec::new(TileSize::Text, blank_tile)),
        ),
        SceneDescriptor::new(
            "Broken",
            TileLayout::empty()
                .with(TileSlot::TopChart, TileSpec::new(TileSize::Ranking, render_ranking_tile))
                .with(TileSlot::BottomChart, TileSpec::new(TileSize::BarChart, failing_tile)),
        ),
    ])
    .expect("registry");
    let mut presentation = Presentation::with_registry(
        NullRenderer::default(),
        ManualTimerService::new(),
        bundle(),
        PresentationConfig::default(),
        registry,
    )
    .expect("presentation");
    presentation.start().expect("start");

    assert!(presentation.next().is_err());
    assert_eq!(presentation.navigation().current_index(), 0);
    assert!(presentation.navigation().active_timer().is_none());
    assert_eq!(presentation.timers().active_count(), 0);
    assert!(presentation.navigation().mounted_slots().is_empty());
    assert!(presentation.renderer().surfaces.is_empty());
    assert_eq!(
        presentation.advance_clock(Duration::from_secs(10)).expect("ticks"),
        0
    );

    presentation.start().expect("restore");
    assert_eq!(presentation.renderer().surfaces.len(), 1);
    let header = presentation.renderer().header.as_ref().expect("header");
    assert_eq!(header.title, "Start");
}
