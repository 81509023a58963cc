use narrative_viz::api::{Presentation, PresentationConfig, PresentationEvent};
use narrative_viz::core::Year;
use narrative_viz::data::{CountryNameMap, Dataset, DatasetBundle, HappinessRow};
use narrative_viz::render::NullRenderer;
use narrative_viz::scatter::{AnnotationMode, ScatterViewModel};
use narrative_viz::scenes::ManualTimerService;
use proptest::prelude::*;

fn dataset_from(gdp_values: &[f64]) -> Dataset {
    let rows = (0..gdp_values.len())
        .map(|i| HappinessRow::new(format!("C{i}"), format!("{}", 9.0 - i as f64 * 0.01)))
        .collect();
    let population: Vec<(String, String)> = (0..gdp_values.len())
        .map(|i| (format!("C{i}"), format!("{}", 1_000 + i)))
        .collect();
    let gdp: Vec<(String, String)> = gdp_values
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("C{i}"), format!("{value}")))
        .collect();
    let bundle = DatasetBundle::default()
        .with_happiness(Year::Y2018, rows)
        .with_population(Year::Y2018, population)
        .with_gdp(Year::Y2018, gdp);
    Dataset::from_bundle(bundle, CountryNameMap::default())
}

#[derive(Debug, Clone)]
enum Step {
    Next,
    Previous,
}

proptest! {
    #[test]
    fn visibility_always_matches_the_active_breakpoint(
        gdp_values in prop::collection::vec(1.0f64..150_000.0, 0..60),
        indices in prop::collection::vec(0usize..14, 1..12),
        mode in prop::sample::select(AnnotationMode::ALL.to_vec()),
    ) {
        let dataset = dataset_from(&gdp_values);
        let mut model = ScatterViewModel::new(&dataset, Year::Y2018, AnnotationMode::MostHappy, 5);
        for index in indices {
            model.set_gdp_percentile_index(index);
            prop_assert!(model.gdp_percentile_index() <= 10);
            let threshold = model.breakpoints()[model.gdp_percentile_index()];
            for record in model.records() {
                prop_assert_eq!(record.visible, record.gdp > threshold);
            }

            let visible_before: Vec<bool> = model.records().iter().map(|r| r.visible).collect();
            model.set_annotation_mode(mode);
            let visible_after: Vec<bool> = model.records().iter().map(|r| r.visible).collect();
            prop_assert_eq!(visible_before, visible_after);
            let expected = if mode == AnnotationMode::None { 0 } else { model.records().len().min(5) };
            prop_assert_eq!(model.annotations().len(), expected);
        }
    }

    #[test]
    fn navigation_never_leaves_the_registry(
        steps in prop::collection::vec(prop_oneof![Just(Step::Next), Just(Step::Previous)], 0..40)
    ) {
        let mut presentation = Presentation::new(
            NullRenderer::default(),
            ManualTimerService::new(),
            DatasetBundle::default(),
            PresentationConfig::default(),
        )
        .expect("presentation");
        presentation.start().expect("start");
        let len = presentation.navigation().registry().len();

        for step in steps {
            let before = presentation.navigation().current_index();
            let event = match step {
                Step::Next => PresentationEvent::Next,
                Step::Previous => PresentationEvent::Previous,
            };
            presentation.handle_event(event).expect("navigate");
            let after = presentation.navigation().current_index();
            prop_assert!(after < len);
            match step {
                Step::Next => prop_assert_eq!(after, (before + 1).min(len - 1)),
                Step::Previous => prop_assert_eq!(after, before.saturating_sub(1)),
            }
            prop_assert!(presentation.timers().active_count() <= 1);
        }
    }
}
