use narrative_viz::core::Year;
use narrative_viz::data::{CountryNameMap, Dataset, DatasetBundle, HappinessRow};
use narrative_viz::scatter::{
    AnnotationMode, ScatterChange, ScatterViewModel, gdp_percentile_index_from_slider,
};

/// Twelve countries, best first; GDP falls with rank and population is shuffled.
fn dataset(years: &[Year]) -> Dataset {
    let mut bundle = DatasetBundle::default();
    for (offset, year) in years.iter().enumerate() {
        let rows: Vec<HappinessRow> = (0..12)
            .map(|i| {
                HappinessRow::new(
                    format!("Country {i}"),
                    format!("{:.3}", 7.8 - 0.3 * f64::from(i) - 0.01 * offset as f64),
                )
            })
            .collect();
        let population: Vec<(String, String)> = (0..12)
            .map(|i| (format!("Country {i}"), ((i * 7 % 12 + 1) * 1_000_000).to_string()))
            .collect();
        let gdp: Vec<(String, String)> = (0..12)
            .map(|i| (format!("Country {i}"), (60_000 - i * 4_500).to_string()))
            .collect();
        bundle = bundle
            .with_happiness(*year, rows)
            .with_population(*year, population.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .with_gdp(*year, gdp.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Dataset::from_bundle(bundle, CountryNameMap::default())
}

#[test]
fn initial_state_shows_every_positive_gdp_record() {
    let dataset = dataset(&[Year::Y2019]);
    let model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);

    assert_eq!(model.records().len(), 12);
    assert_eq!(model.gdp_percentile_index(), 0);
    assert_eq!(model.gdp_threshold(), 0.0);
    assert_eq!(model.visible_records().count(), 12);
    assert!(model.selection().is_none());
}

#[test]
fn index_zero_keeps_the_poorest_of_two_countries() {
    let bundle = DatasetBundle::default()
        .with_happiness(
            Year::Y2015,
            vec![HappinessRow::new("A", "7.5"), HappinessRow::new("B", "5.0")],
        )
        .with_population(Year::Y2015, [("A", "10"), ("B", "20")])
        .with_gdp(Year::Y2015, [("A", "50000"), ("B", "1000")]);
    let dataset = Dataset::from_bundle(bundle, CountryNameMap::default());
    let mut model = ScatterViewModel::new(&dataset, Year::Y2015, AnnotationMode::None, 5);

    model.set_gdp_percentile_index(10);
    assert_eq!(model.visible_records().count(), 0);
    assert_eq!(model.set_gdp_percentile_index(0), ScatterChange::Filter);
    let hidden: Vec<_> = model
        .records()
        .iter()
        .filter(|record| record.gdp > 0.0 && !record.visible)
        .map(|record| record.country.as_str())
        .collect();
    assert!(hidden.is_empty(), "hidden at index 0: {hidden:?}");
}

#[test]
fn breakpoints_span_zero_to_max() {
    let dataset = dataset(&[Year::Y2019]);
    let model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);
    let breakpoints = model.breakpoints();

    assert_eq!(breakpoints[0], 0.0);
    assert!(breakpoints[1] > 10_500.0);
    assert_eq!(breakpoints[10], 60_000.0);
    assert!(breakpoints.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn filter_sets_visibility_strictly_above_the_breakpoint() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);

    assert_eq!(model.set_gdp_percentile_index(5), ScatterChange::Filter);
    let threshold = model.breakpoints()[5];
    for record in model.records() {
        assert_eq!(record.visible, record.gdp > threshold, "{}", record.country);
    }
    assert_eq!(model.set_gdp_percentile_index(5), ScatterChange::Unchanged);

    model.set_gdp_percentile_index(99);
    assert_eq!(model.gdp_percentile_index(), 10);
    assert_eq!(model.visible_records().count(), 0);
}

#[test]
fn slider_values_snap_to_the_nearest_decade() {
    assert_eq!(gdp_percentile_index_from_slider(7), 1);
    assert_eq!(gdp_percentile_index_from_slider(4), 0);
    assert_eq!(gdp_percentile_index_from_slider(45), 5);
    assert_eq!(gdp_percentile_index_from_slider(100), 10);
    assert_eq!(gdp_percentile_index_from_slider(-30), 0);
    assert_eq!(gdp_percentile_index_from_slider(400), 10);

    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);
    model.set_gdp_percentile(7);
    assert_eq!(model.gdp_percentile_index(), 1);
}

#[test]
fn most_happy_annotations_are_the_top_of_the_ranking_by_population() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);
    model.set_gdp_percentile_index(10);

    assert_eq!(
        model.set_annotation_mode(AnnotationMode::MostHappy),
        ScatterChange::Annotations
    );
    let annotations = model.annotations();
    assert_eq!(annotations.len(), 5);
    let mut members: Vec<usize> = annotations.iter().map(|record| record.rank).collect();
    members.sort_unstable();
    assert_eq!(members, [1, 2, 3, 4, 5]);
    assert!(
        annotations
            .windows(2)
            .all(|pair| pair[0].population >= pair[1].population)
    );
}

#[test]
fn least_happy_annotations_are_the_bottom_of_the_ranking() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::LeastHappy, 5);

    let mut members: Vec<usize> = model.annotations().iter().map(|record| record.rank).collect();
    members.sort_unstable();
    assert_eq!(members, [8, 9, 10, 11, 12]);

    assert_eq!(model.set_annotation_mode(AnnotationMode::LeastHappy), ScatterChange::Unchanged);
}

#[test]
fn none_mode_clears_annotations_and_leaves_visibility_alone() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::MostHappy, 5);
    model.set_gdp_percentile_index(3);
    let before: Vec<bool> = model.records().iter().map(|record| record.visible).collect();

    model.set_annotation_mode(AnnotationMode::None);
    assert!(model.annotations().is_empty());
    let after: Vec<bool> = model.records().iter().map(|record| record.visible).collect();
    assert_eq!(before, after);
}

#[test]
fn annotation_count_is_capped_by_available_records() {
    let bundle = DatasetBundle::default()
        .with_happiness(
            Year::Y2015,
            vec![HappinessRow::new("A", "7"), HappinessRow::new("B", "6")],
        )
        .with_population(Year::Y2015, [("A", "5"), ("B", "9")])
        .with_gdp(Year::Y2015, [("A", "100"), ("B", "200")]);
    let dataset = Dataset::from_bundle(bundle, CountryNameMap::default());
    let model = ScatterViewModel::new(&dataset, Year::Y2015, AnnotationMode::MostHappy, 5);

    let countries: Vec<&str> = model
        .annotations()
        .iter()
        .map(|record| record.country.as_str())
        .collect();
    assert_eq!(countries, ["B", "A"]);
}

#[test]
fn year_change_keeps_filter_index_and_rebinds_selection() {
    let dataset = dataset(&[Year::Y2018, Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::MostHappy, 5);
    model.set_gdp_percentile_index(4);
    assert_eq!(model.select_country("Country 3"), ScatterChange::Selection);

    assert_eq!(model.set_year(&dataset, Year::Y2018), ScatterChange::Year);
    assert_eq!(model.year(), Year::Y2018);
    assert_eq!(model.gdp_percentile_index(), 4);
    let selection = model.selection().expect("selection survives");
    assert_eq!(selection.country, "Country 3");
    assert_eq!(selection.year, Year::Y2018);
    assert_eq!(model.set_year(&dataset, Year::Y2018), ScatterChange::Unchanged);
}

#[test]
fn selection_is_cleared_when_the_new_year_lacks_the_country() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);
    model.select_country("Country 0");

    model.set_year(&dataset, Year::Y2015);
    assert!(model.records().is_empty());
    assert!(model.selection().is_none());
    assert_eq!(model.breakpoints(), &[0.0; 11]);
}

#[test]
fn unknown_country_click_changes_nothing() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);
    assert_eq!(model.select_country("Atlantis"), ScatterChange::Unchanged);
    assert_eq!(model.set_selection(None), ScatterChange::Unchanged);
}

#[test]
fn filter_updates_the_selected_record_copy() {
    let dataset = dataset(&[Year::Y2019]);
    let mut model = ScatterViewModel::new(&dataset, Year::Y2019, AnnotationMode::None, 5);
    model.select_country("Country 0");
    assert!(model.selection().expect("selection").visible);
    model.set_gdp_percentile_index(10);
    assert!(!model.selection().expect("selection").visible);
}
