use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{BREAKPOINT_COUNT, Year, decile_breakpoints};
use crate::data::{CountryYearRecord, Dataset};

/// Highest GDP percentile index; index `i` filters at the `i * 10`th percentile.
pub const MAX_GDP_PERCENTILE_INDEX: usize = BREAKPOINT_COUNT - 1;

/// Which end of the ranking gets callout labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationMode {
    MostHappy,
    LeastHappy,
    None,
}

impl AnnotationMode {
    pub const ALL: [AnnotationMode; 3] = [
        AnnotationMode::MostHappy,
        AnnotationMode::LeastHappy,
        AnnotationMode::None,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MostHappy => "most-happy",
            Self::LeastHappy => "least-happy",
            Self::None => "none",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MostHappy => "Most Happy",
            Self::LeastHappy => "Least Happy",
            Self::None => "None",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.key() == key)
    }
}

/// What a scatter mutation changed; anything but `Unchanged` needs a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterChange {
    Unchanged,
    Year,
    Filter,
    Annotations,
    Selection,
}

impl ScatterChange {
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        self != Self::Unchanged
    }
}

/// Maps a raw slider value (percent) onto a percentile index.
///
/// Values snap to the nearest multiple of ten, ties rounding up, and clamp to
/// `[0, 100]`: `7` selects index 1, `-20` index 0, `250` index 10.
#[must_use]
pub fn gdp_percentile_index_from_slider(percent: i32) -> usize {
    let clamped = percent.clamp(0, 100);
    ((clamped + 5) / 10) as usize
}

pub type Annotations = SmallVec<[CountryYearRecord; 5]>;

/// Interactive state of the wealth/happiness scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterState {
    year: Year,
    annotation_mode: AnnotationMode,
    gdp_percentile_index: usize,
    selection: Option<CountryYearRecord>,
    breakpoints: [f64; BREAKPOINT_COUNT],
    data: Vec<CountryYearRecord>,
    annotations: Annotations,
}

/// Owns [`ScatterState`] and keeps every derived field consistent.
///
/// Each mutator re-derives what depends on it and reports a [`ScatterChange`]
/// so the caller can redraw the scatter tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterViewModel {
    state: ScatterState,
    annotation_count: usize,
}

impl ScatterViewModel {
    #[must_use]
    pub fn new(
        dataset: &Dataset,
        year: Year,
        annotation_mode: AnnotationMode,
        annotation_count: usize,
    ) -> Self {
        let mut model = Self {
            state: ScatterState {
                year,
                annotation_mode,
                gdp_percentile_index: 0,
                selection: None,
                breakpoints: [0.0; BREAKPOINT_COUNT],
                data: Vec::new(),
                annotations: Annotations::new(),
            },
            annotation_count,
        };
        model.load_year(dataset, year);
        model
    }

    #[must_use]
    pub fn state(&self) -> &ScatterState {
        &self.state
    }

    #[must_use]
    pub fn year(&self) -> Year {
        self.state.year
    }

    #[must_use]
    pub fn annotation_mode(&self) -> AnnotationMode {
        self.state.annotation_mode
    }

    #[must_use]
    pub fn gdp_percentile_index(&self) -> usize {
        self.state.gdp_percentile_index
    }

    /// GDP value a record must exceed to stay visible.
    #[must_use]
    pub fn gdp_threshold(&self) -> f64 {
        self.state.breakpoints[self.state.gdp_percentile_index]
    }

    #[must_use]
    pub fn breakpoints(&self) -> &[f64; BREAKPOINT_COUNT] {
        &self.state.breakpoints
    }

    /// Every merged record of the year, in ranking order.
    #[must_use]
    pub fn records(&self) -> &[CountryYearRecord] {
        &self.state.data
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &CountryYearRecord> {
        self.state.data.iter().filter(|record| record.visible)
    }

    /// Annotation targets, largest population first.
    #[must_use]
    pub fn annotations(&self) -> &[CountryYearRecord] {
        &self.state.annotations
    }

    #[must_use]
    pub fn selection(&self) -> Option<&CountryYearRecord> {
        self.state.selection.as_ref()
    }

    pub fn set_year(&mut self, dataset: &Dataset, year: Year) -> ScatterChange {
        if year == self.state.year && !self.state.data.is_empty() {
            return ScatterChange::Unchanged;
        }
        self.load_year(dataset, year);
        ScatterChange::Year
    }

    /// Applies the GDP filter at `index`, clamped to `[0, 10]`.
    pub fn set_gdp_percentile_index(&mut self, index: usize) -> ScatterChange {
        let index = index.min(MAX_GDP_PERCENTILE_INDEX);
        if index == self.state.gdp_percentile_index {
            return ScatterChange::Unchanged;
        }
        self.state.gdp_percentile_index = index;
        self.apply_filter();
        ScatterChange::Filter
    }

    /// Slider entry point; see [`gdp_percentile_index_from_slider`].
    pub fn set_gdp_percentile(&mut self, percent: i32) -> ScatterChange {
        self.set_gdp_percentile_index(gdp_percentile_index_from_slider(percent))
    }

    pub fn set_annotation_mode(&mut self, mode: AnnotationMode) -> ScatterChange {
        if mode == self.state.annotation_mode {
            return ScatterChange::Unchanged;
        }
        self.state.annotation_mode = mode;
        self.derive_annotations();
        ScatterChange::Annotations
    }

    pub fn set_selection(&mut self, selection: Option<CountryYearRecord>) -> ScatterChange {
        if selection == self.state.selection {
            return ScatterChange::Unchanged;
        }
        trace!(
            country = selection.as_ref().map(|record| record.country.as_str()),
            "scatter selection"
        );
        self.state.selection = selection;
        ScatterChange::Selection
    }

    /// Selects the current year's record of `country`.
    ///
    /// Unknown countries leave the selection untouched.
    pub fn select_country(&mut self, country: &str) -> ScatterChange {
        let Some(record) = self
            .state
            .data
            .iter()
            .find(|record| record.country == country)
            .cloned()
        else {
            warn!(country, year = %self.state.year, "click on a country without merged data");
            return ScatterChange::Unchanged;
        };
        self.set_selection(Some(record))
    }

    fn load_year(&mut self, dataset: &Dataset, year: Year) {
        self.state.year = year;
        self.state.data = dataset.merge_year(year);
        self.state.breakpoints =
            decile_breakpoints(self.state.data.iter().map(|record| record.gdp));
        self.apply_filter();
        self.derive_annotations();
        // Keep the selected country across years when it has data.
        if let Some(selected) = self.state.selection.take() {
            self.state.selection = self
                .state
                .data
                .iter()
                .find(|record| record.country == selected.country)
                .cloned();
        }
        trace!(
            %year,
            records = self.state.data.len(),
            threshold = self.gdp_threshold(),
            "scatter year loaded"
        );
    }

    fn apply_filter(&mut self) {
        let threshold = self.gdp_threshold();
        let copies = self.state.selection.iter_mut().chain(&mut self.state.annotations);
        for record in self.state.data.iter_mut().chain(copies) {
            record.visible = record.gdp > threshold;
        }
    }

    /// Targets come from the unfiltered ranking order, so the GDP filter never
    /// removes a country from the callouts.
    fn derive_annotations(&mut self) {
        let data = &self.state.data;
        let count = self.annotation_count.min(data.len());
        let targets = match self.state.annotation_mode {
            AnnotationMode::MostHappy => &data[..count],
            AnnotationMode::LeastHappy => &data[data.len() - count..],
            AnnotationMode::None => &data[..0],
        };
        let mut annotations: Annotations = targets.iter().cloned().collect();
        annotations.sort_by_key(|record| Reverse(record.population));
        self.state.annotations = annotations;
    }
}
