use std::time::Duration;

use tracing::{debug, info, trace};

use crate::data::{CountryNameMap, Dataset, DatasetBundle, country_key};
use crate::error::VizResult;
use crate::render::Renderer;
use crate::scatter::ScatterViewModel;
use crate::scatter::tiles::CIRCLE_ID_PREFIX;
use crate::scenes::{
    ManualTimerService, NavigationController, SceneRegistry, TileEnv, TileRefresh, TimerId,
    TimerService,
};

use super::{PresentationConfig, PresentationEvent, Redraw};

/// Main facade consumed by host applications.
///
/// Owns every piece of application state: the merged dataset, the scatter
/// view model and the navigation controller with its timer. The host feeds
/// it user input and timer firings; drawing goes through `R`.
pub struct Presentation<R: Renderer, T: TimerService> {
    renderer: R,
    timers: T,
    config: PresentationConfig,
    dataset: Dataset,
    scatter: ScatterViewModel,
    navigation: NavigationController,
}

impl<R: Renderer, T: TimerService> Presentation<R, T> {
    /// Builds the standard story over `bundle`. Nothing is drawn until [`start`](Self::start).
    pub fn new(
        renderer: R,
        timers: T,
        bundle: DatasetBundle,
        config: PresentationConfig,
    ) -> VizResult<Self> {
        Self::with_registry(renderer, timers, bundle, config, SceneRegistry::standard()?)
    }

    pub fn with_registry(
        renderer: R,
        timers: T,
        bundle: DatasetBundle,
        config: PresentationConfig,
        registry: SceneRegistry,
    ) -> VizResult<Self> {
        config.validate()?;
        let names = CountryNameMap::default().extend_from(
            config
                .extra_country_aliases
                .iter()
                .map(|(foreign, canonical)| (foreign.clone(), canonical.clone())),
        )?;
        let dataset = Dataset::from_bundle(bundle, names);
        let scatter = ScatterViewModel::new(
            &dataset,
            config.initial_scatter_year,
            config.initial_annotation_mode,
            config.annotation_count,
        );
        info!(
            years = dataset.years().count(),
            scenes = registry.len(),
            "presentation ready"
        );
        Ok(Self {
            renderer,
            timers,
            config,
            dataset,
            scatter,
            navigation: NavigationController::new(registry),
        })
    }

    /// Renders the current scene (the first one on a fresh presentation).
    pub fn start(&mut self) -> VizResult<()> {
        let env = TileEnv {
            dataset: &self.dataset,
            scatter: &self.scatter,
            config: &self.config,
        };
        self.navigation
            .render_current(&mut self.renderer, &mut self.timers, &env)
    }

    pub fn next(&mut self) -> VizResult<bool> {
        let env = TileEnv {
            dataset: &self.dataset,
            scatter: &self.scatter,
            config: &self.config,
        };
        self.navigation
            .next(&mut self.renderer, &mut self.timers, &env)
    }

    pub fn previous(&mut self) -> VizResult<bool> {
        let env = TileEnv {
            dataset: &self.dataset,
            scatter: &self.scatter,
            config: &self.config,
        };
        self.navigation
            .previous(&mut self.renderer, &mut self.timers, &env)
    }

    pub fn handle_event(&mut self, event: PresentationEvent) -> VizResult<Redraw> {
        trace!(?event, "presentation event");
        let change = match event {
            PresentationEvent::Next => return Ok(scene_redraw(self.next()?)),
            PresentationEvent::Previous => return Ok(scene_redraw(self.previous()?)),
            PresentationEvent::YearSelected(year) => self.scatter.set_year(&self.dataset, year),
            PresentationEvent::AnnotationModeSelected(mode) => {
                self.scatter.set_annotation_mode(mode)
            }
            PresentationEvent::GdpSliderInput(percent) => self.scatter.set_gdp_percentile(percent),
            PresentationEvent::CountryClicked(country) => self.scatter.select_country(&country),
            PresentationEvent::ElementClicked(id) => {
                let Some(country) = self.clicked_country(id.as_str()) else {
                    trace!(%id, "click outside any country circle");
                    return Ok(Redraw::Nothing);
                };
                self.scatter.select_country(&country)
            }
            PresentationEvent::SelectionCleared => self.scatter.set_selection(None),
        };
        if !change.needs_redraw() {
            return Ok(Redraw::Nothing);
        }

        let env = TileEnv {
            dataset: &self.dataset,
            scatter: &self.scatter,
            config: &self.config,
        };
        let tiles =
            self.navigation
                .refresh(TileRefresh::OnScatterChange, &mut self.renderer, &env)?;
        debug!(?change, tiles, "scatter redraw");
        Ok(Redraw::Scatter { tiles })
    }

    /// Delivers one firing of `id`. Returns `false` for timers already released.
    pub fn on_timer(&mut self, id: TimerId) -> VizResult<bool> {
        let env = TileEnv {
            dataset: &self.dataset,
            scatter: &self.scatter,
            config: &self.config,
        };
        self.navigation.on_timer(id, &mut self.renderer, &env)
    }

    /// Stops the active timer and clears the drawn scene.
    pub fn shutdown(&mut self) -> VizResult<()> {
        self.navigation.release_timer(&mut self.timers);
        self.renderer.clear_scene()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    #[must_use]
    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn scatter(&self) -> &ScatterViewModel {
        &self.scatter
    }

    #[must_use]
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn clicked_country(&self, element_id: &str) -> Option<String> {
        let key = element_id.strip_prefix(CIRCLE_ID_PREFIX)?;
        self.scatter
            .records()
            .iter()
            .find(|record| country_key(&record.country) == key)
            .map(|record| record.country.clone())
    }
}

impl<R: Renderer> Presentation<R, ManualTimerService> {
    /// Moves the virtual clock and delivers every firing it produced.
    ///
    /// Returns how many firings reached a live timer.
    pub fn advance_clock(&mut self, by: Duration) -> VizResult<usize> {
        let mut delivered = 0;
        for id in self.timers.advance(by) {
            if self.on_timer(id)? {
                delivered += 1;
            }
        }
        Ok(delivered)
    }
}

fn scene_redraw(moved: bool) -> Redraw {
    if moved { Redraw::Scene } else { Redraw::Nothing }
}
