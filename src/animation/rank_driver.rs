use std::time::Duration;

use tracing::{debug, trace};

use crate::api::PresentationConfig;
use crate::core::{Viewport, Year};
use crate::data::{Dataset, RankingEntry};
use crate::error::{VizError, VizResult};
use crate::render::{ElementOp, RenderFrame, TextHAlign, TextPrimitive, Transition};
use crate::scenes::{DrawTarget, PeriodicTask, TileEnv, TileOutput};

use super::reconcile::{BarLayout, BarReconciler};

pub const YEAR_CAPTION_ID: &str = "rank-year";

/// Cycles a ranking bar chart through the survey years.
///
/// Wraps from the last year back to the first. Every step diffs the new
/// year's top-N against the drawn bars and returns keyed ops animated over
/// the transition duration.
#[derive(Debug, Clone)]
pub struct RankAnimationDriver {
    years: Vec<Year>,
    cursor: usize,
    top_n: usize,
    period: Duration,
    transition: Duration,
    viewport: Viewport,
    layout: BarLayout,
    reconciler: BarReconciler,
}

impl RankAnimationDriver {
    pub fn new(
        years: Vec<Year>,
        top_n: usize,
        period: Duration,
        transition: Duration,
        viewport: Viewport,
    ) -> VizResult<Self> {
        if years.is_empty() {
            return Err(VizError::InvalidConfig(
                "rank animation needs at least one year".to_owned(),
            ));
        }
        if period.is_zero() {
            return Err(VizError::InvalidConfig(
                "rank animation period must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            years,
            cursor: 0,
            top_n,
            period,
            transition,
            viewport,
            layout: BarLayout::for_viewport(viewport)?,
            reconciler: BarReconciler::default(),
        })
    }

    pub fn from_config(config: &PresentationConfig, viewport: Viewport) -> VizResult<Self> {
        Self::new(
            config.animation_years.clone(),
            config.ranking_top_n,
            config.animation_period(),
            config.transition_duration(),
            viewport,
        )
    }

    #[must_use]
    pub fn current_year(&self) -> Year {
        self.years[self.cursor]
    }

    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        self.transition
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.reconciler.len()
    }

    /// Full frame for the first year; resets any previously drawn bars.
    pub fn start(&mut self, dataset: &Dataset) -> RenderFrame {
        self.cursor = 0;
        self.reconciler.clear();
        let mut frame = RenderFrame::new(self.viewport).with(self.caption());
        let ops = self.reconcile_current(dataset);
        frame.apply(&ops);
        debug!(year = %self.current_year(), bars = self.bar_count(), "rank animation started");
        frame
    }

    /// Moves to the next year and returns the keyed update.
    pub fn advance(&mut self, dataset: &Dataset) -> Transition {
        self.cursor = (self.cursor + 1) % self.years.len();
        let mut ops = vec![ElementOp::Update(self.caption().into())];
        ops.extend(self.reconcile_current(dataset));
        trace!(year = %self.current_year(), ops = ops.len(), "rank animation step");
        Transition::new(self.transition, ops)
    }

    fn reconcile_current(&mut self, dataset: &Dataset) -> Vec<ElementOp> {
        let entries: &[RankingEntry] = dataset
            .ranking(self.current_year())
            .map(|ranking| ranking.top(self.top_n))
            .unwrap_or_default();
        self.reconciler.reconcile(entries, &self.layout)
    }

    fn caption(&self) -> TextPrimitive {
        TextPrimitive::new(
            YEAR_CAPTION_ID,
            self.current_year().to_string(),
            f64::from(self.viewport.width) - 12.0,
            24.0,
            20.0,
            TextHAlign::Right,
        )
    }
}

impl PeriodicTask for RankAnimationDriver {
    fn period(&self) -> Duration {
        self.period
    }

    fn tick(&mut self, env: &TileEnv<'_>) -> VizResult<Option<Transition>> {
        Ok(Some(self.advance(env.dataset)))
    }
}

/// Tile render function of the change-over-time scene.
pub fn render_ranking_tile(env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    let mut driver = RankAnimationDriver::from_config(env.config, target.viewport)?;
    let frame = driver.start(env.dataset);
    Ok(TileOutput::with_task(frame, Box::new(driver)))
}
