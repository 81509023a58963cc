//! The built-in five-scene story about happiness, population and wealth.

use crate::animation::{BarLayout, render_ranking_tile};
use crate::core::Viewport;
use crate::error::VizResult;
use crate::render::{RenderFrame, TextHAlign, TextPrimitive, TileSlot, palette};
use crate::scatter::tiles::{render_chart, render_controls, render_detail};

use super::registry::{SceneDescriptor, SceneRegistry, TileLayout};
use super::tile::{DrawTarget, TileEnv, TileOutput, TileSize, TileSpec};

pub const INTRODUCTION: &str = "Introduction";
pub const OVERVIEW: &str = "Overview";
pub const CHANGE_OVER_TIME: &str = "Change Over Time";
pub const HAPPINESS_AND_WEALTH: &str = "Happiness and Wealth";
pub const CONCLUSION: &str = "Conclusion";

const ABOUT_TEXT: &str = "This visualization shows data about the Happiness Index of various \
     countries. Each year the World Happiness Report asks people in over 150 countries to rate \
     their lives on a scale from 0 to 10. The following scenes look at who is happiest, how \
     the ranking moves over time, and how happiness relates to wealth and population.";

const CONCLUSION_TEXT: &str = "The happiest countries change little from year to year, and \
     most of them are wealthy. Wealth alone does not decide happiness though: raise the GDP \
     filter on the previous scene and several countries with modest incomes remain near the \
     top of the scale.";

const TEXT_FONT_PX: f64 = 15.0;
const TEXT_LINE_PX: f64 = 22.0;
const TEXT_MARGIN_PX: f64 = 12.0;

impl SceneRegistry {
    /// The story shown by a default [`Presentation`](crate::api::Presentation).
    pub fn standard() -> VizResult<Self> {
        Self::new(vec![
            SceneDescriptor::new(
                INTRODUCTION,
                TileLayout::empty().with(
                    TileSlot::TopChart,
                    TileSpec::new(TileSize::Text, render_about)
                        .titled("About this Narrative Visualization"),
                ),
            ),
            SceneDescriptor::new(
                OVERVIEW,
                TileLayout::empty()
                    .with(
                        TileSlot::TopChart,
                        TileSpec::new(TileSize::BarChart, render_happiest)
                            .titled("Happiest Countries"),
                    )
                    .with(
                        TileSlot::BottomChart,
                        TileSpec::new(TileSize::BarChart, render_saddest)
                            .titled("Saddest Countries"),
                    ),
            ),
            SceneDescriptor::new(
                CHANGE_OVER_TIME,
                TileLayout::empty().with(
                    TileSlot::TopChart,
                    TileSpec::new(TileSize::Ranking, render_ranking_tile)
                        .titled("Happiness Ranking by Year"),
                ),
            )
            .described(
                "Every two seconds the ranking moves on to the next survey year. \
                 Bars keep their country while they slide to the new rank.",
            ),
            SceneDescriptor::new(
                HAPPINESS_AND_WEALTH,
                TileLayout::empty()
                    .with(
                        TileSlot::TopControls,
                        TileSpec::new(TileSize::Controls, render_controls).follows_scatter(),
                    )
                    .with(
                        TileSlot::TopChart,
                        TileSpec::new(TileSize::Scatter, render_chart)
                            .titled("Happiness vs. GDP per Capita")
                            .follows_scatter(),
                    )
                    .with(
                        TileSlot::TopDetail,
                        TileSpec::new(TileSize::Detail, render_detail)
                            .titled("Country Details")
                            .follows_scatter(),
                    ),
            )
            .described(
                "Circle area shows population. Use the <b>GDP filter</b> to hide poorer \
                 countries and click a circle for details.",
            ),
            SceneDescriptor::new(
                CONCLUSION,
                TileLayout::empty().with(
                    TileSlot::TopChart,
                    TileSpec::new(TileSize::Text, render_conclusion).titled("What We Saw"),
                ),
            ),
        ])
    }
}

fn render_about(_: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    Ok(TileOutput::frame(paragraph_frame(
        "about",
        ABOUT_TEXT,
        target.viewport,
    )))
}

fn render_conclusion(_: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    Ok(TileOutput::frame(paragraph_frame(
        "conclusion",
        CONCLUSION_TEXT,
        target.viewport,
    )))
}

fn render_happiest(env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    let layout = BarLayout::overview(target.viewport)?;
    let entries = env
        .dataset
        .ranking(env.config.featured_year)
        .map(|ranking| ranking.top(env.config.overview_bar_count))
        .unwrap_or_default();
    Ok(TileOutput::frame(layout.frame(target.viewport, entries)))
}

fn render_saddest(env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    let layout = BarLayout::overview(target.viewport)?;
    let entries = env
        .dataset
        .ranking(env.config.featured_year)
        .map(|ranking| ranking.bottom(env.config.overview_bar_count))
        .unwrap_or_default();
    Ok(TileOutput::frame(layout.frame(target.viewport, entries)))
}

fn paragraph_frame(id_prefix: &str, text: &str, viewport: Viewport) -> RenderFrame {
    // Rough average glyph width of the body font.
    let usable = f64::from(viewport.width) - 2.0 * TEXT_MARGIN_PX;
    let max_chars = ((usable / (TEXT_FONT_PX * 0.5)) as usize).max(16);
    let mut frame = RenderFrame::new(viewport);
    for (row, line) in wrap_words(text, max_chars).into_iter().enumerate() {
        frame.push(
            TextPrimitive::new(
                format!("{id_prefix}-line-{row}"),
                line,
                TEXT_MARGIN_PX,
                TEXT_LINE_PX * (row + 1) as f64,
                TEXT_FONT_PX,
                TextHAlign::Left,
            )
            .with_color(palette::INK),
        );
    }
    frame
}

/// Greedy word wrap; words longer than `max_chars` get a line of their own.
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
