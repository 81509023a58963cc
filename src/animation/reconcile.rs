use indexmap::IndexMap;
use tracing::warn;

use crate::core::{LinearScale, Viewport, format_score};
use crate::data::{RankingEntry, country_key};
use crate::error::VizResult;
use crate::render::{
    Element, ElementId, ElementOp, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, palette,
};

/// Geometry of a horizontal ranking bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    /// Country names are right-aligned here.
    pub label_x: f64,
    /// Bars start here.
    pub bar_x: f64,
    pub top: f64,
    pub row_step: f64,
    pub bar_height: f64,
    pub score: LinearScale,
}

impl BarLayout {
    pub const SCORE_DOMAIN: (f64, f64) = (0.0, 10.0);

    /// Dense rows for the animated top-N ranking, below a year caption.
    pub fn for_viewport(viewport: Viewport) -> VizResult<Self> {
        Self::with_rows(viewport, 36.0, 20.0, 16.0)
    }

    /// Roomy rows for the five-country overview charts.
    pub fn overview(viewport: Viewport) -> VizResult<Self> {
        Self::with_rows(viewport, 0.0, 35.0, 28.0)
    }

    pub fn with_rows(
        viewport: Viewport,
        top: f64,
        row_step: f64,
        bar_height: f64,
    ) -> VizResult<Self> {
        let bar_x = 185.0;
        let right_margin = 60.0;
        let bar_span = (f64::from(viewport.width) - bar_x - right_margin).max(1.0);
        Ok(Self {
            label_x: 180.0,
            bar_x,
            top,
            row_step,
            bar_height,
            score: LinearScale::new(Self::SCORE_DOMAIN, (0.0, bar_span))?,
        })
    }

    /// Static frame of `entries`, one bar per row in ranking order.
    #[must_use]
    pub fn frame(&self, viewport: Viewport, entries: &[RankingEntry]) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport);
        frame.apply(&BarReconciler::default().reconcile(entries, self));
        frame
    }

    #[must_use]
    pub fn row_y(&self, rank_index: usize) -> f64 {
        self.top + rank_index as f64 * self.row_step
    }

    /// Country keys never contain `:`, so the three prefixes stay disjoint.
    fn element_ids(key: &str) -> [ElementId; 3] {
        [
            ElementId::new(format!("bar:rect:{key}")),
            ElementId::new(format!("bar:name:{key}")),
            ElementId::new(format!("bar:score:{key}")),
        ]
    }

    fn elements(&self, key: &str, bar: &BarState) -> [Element; 3] {
        let [rect_id, name_id, score_id] = Self::element_ids(key);
        let y = self.row_y(bar.rank_index);
        let width = self.score.map(bar.score).max(0.0);
        let baseline = y + self.bar_height - 3.0;
        [
            RectPrimitive::new(rect_id, self.bar_x, y, width, self.bar_height, palette::BAR).into(),
            TextPrimitive::new(
                name_id,
                bar.country.clone(),
                self.label_x,
                baseline,
                12.0,
                TextHAlign::Right,
            )
            .into(),
            TextPrimitive::new(
                score_id,
                format_score(bar.score),
                self.bar_x + width + 4.0,
                baseline,
                11.0,
                TextHAlign::Left,
            )
            .with_color(palette::MUTED)
            .into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BarState {
    country: String,
    rank_index: usize,
    score: f64,
}

/// Keeps one bar per country key alive across years.
///
/// Each call diffs the new ranking against the bars currently drawn and
/// emits create/update/remove ops, so a country's bar moves instead of being
/// recreated.
#[derive(Debug, Clone, Default)]
pub struct BarReconciler {
    bars: IndexMap<String, BarState>,
}

impl BarReconciler {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.bars.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.bars.clear();
    }

    pub fn reconcile(&mut self, entries: &[RankingEntry], layout: &BarLayout) -> Vec<ElementOp> {
        let mut next: IndexMap<String, BarState> = IndexMap::with_capacity(entries.len());
        let mut ops = Vec::new();

        for (rank_index, entry) in entries.iter().enumerate() {
            let key = country_key(&entry.country);
            if key.is_empty() || next.contains_key(&key) {
                warn!(country = %entry.country, "skipping ranking entry without a unique key");
                continue;
            }
            let bar = BarState {
                country: entry.country.clone(),
                rank_index,
                score: entry.score,
            };
            match self.bars.get(&key) {
                None => ops.extend(layout.elements(&key, &bar).map(ElementOp::Create)),
                Some(previous) if *previous != bar => {
                    ops.extend(layout.elements(&key, &bar).map(ElementOp::Update));
                }
                Some(_) => {}
            }
            next.insert(key, bar);
        }

        for key in self.bars.keys().filter(|key| !next.contains_key(*key)) {
            ops.extend(BarLayout::element_ids(key).map(ElementOp::Remove));
        }

        self.bars = next;
        ops
    }
}
