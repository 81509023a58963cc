//! Render functions of the wealth/happiness scene tiles.

use std::cmp::Reverse;

use indexmap::IndexSet;
use tracing::warn;

use crate::core::{
    LinearScale, LogScale, SqrtScale, Viewport, Year, format_dollars, format_gdp_tick,
    format_score, format_thousands,
};
use crate::data::{CountryYearRecord, country_key};
use crate::error::VizResult;
use crate::render::{
    AxisOrientation, AxisPrimitive, AxisTick, CalloutPrimitive, CirclePrimitive, ControlKind,
    ControlOption, ControlPrimitive, RenderFrame, TextHAlign, TextPrimitive, palette,
};
use crate::scenes::{DrawTarget, TileEnv, TileOutput};

use super::view_model::{AnnotationMode, MAX_GDP_PERCENTILE_INDEX, ScatterViewModel};

pub const YEAR_CONTROL_ID: &str = "scatter-year";
pub const ANNOTATION_CONTROL_ID: &str = "scatter-annotation";
pub const GDP_CONTROL_ID: &str = "scatter-gdp";

/// Prefix of clickable country circles; the rest is the country key.
pub const CIRCLE_ID_PREFIX: &str = "country-";

const GDP_DOMAIN: (f64, f64) = (200.0, 200_000.0);
const HAPPINESS_DOMAIN: (f64, f64) = (0.0, 10.0);
const POPULATION_DOMAIN_MAX: f64 = 1.5e9;
const MAX_RADIUS_PX: f64 = 28.0;
const CALLOUT_COLUMN_WIDTH_PX: f64 = 150.0;
const CALLOUT_ROW_PX: f64 = 34.0;

#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl PlotArea {
    fn inside(viewport: Viewport) -> Self {
        Self {
            left: 60.0,
            top: 20.0,
            right: f64::from(viewport.width) - 20.0,
            bottom: f64::from(viewport.height) - 44.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScatterScales {
    plot: PlotArea,
    gdp: LogScale,
    happiness: LinearScale,
    radius: SqrtScale,
}

impl ScatterScales {
    fn new(viewport: Viewport) -> VizResult<Self> {
        let plot = PlotArea::inside(viewport);
        Ok(Self {
            plot,
            gdp: LogScale::new(GDP_DOMAIN, (plot.left, plot.right))?,
            happiness: LinearScale::new(HAPPINESS_DOMAIN, (plot.bottom, plot.top))?,
            radius: SqrtScale::new(POPULATION_DOMAIN_MAX, MAX_RADIUS_PX)?,
        })
    }

    fn position(&self, record: &CountryYearRecord) -> (f64, f64) {
        let gdp = record.gdp.clamp(GDP_DOMAIN.0, GDP_DOMAIN.1);
        (self.gdp.map(gdp), self.happiness.map(record.happiness))
    }
}

/// Circle element id of `country`.
#[must_use]
pub fn circle_id(country: &str) -> String {
    format!("{CIRCLE_ID_PREFIX}{}", country_key(country))
}

pub fn render_controls(env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    let scatter = env.scatter;
    let mut frame = RenderFrame::new(target.viewport);

    frame.push(ControlPrimitive {
        id: YEAR_CONTROL_ID.into(),
        label: "Year".to_owned(),
        kind: ControlKind::Select {
            options: Year::ALL
                .into_iter()
                .map(|year| ControlOption::new(year.to_string(), year.to_string()))
                .collect(),
            selected: scatter.year().to_string(),
        },
    });
    frame.push(ControlPrimitive {
        id: ANNOTATION_CONTROL_ID.into(),
        label: "Annotate".to_owned(),
        kind: ControlKind::Select {
            options: AnnotationMode::ALL
                .into_iter()
                .map(|mode| ControlOption::new(mode.key(), mode.label()))
                .collect(),
            selected: scatter.annotation_mode().key().to_owned(),
        },
    });
    frame.push(ControlPrimitive {
        id: GDP_CONTROL_ID.into(),
        label: "Hide countries below GDP percentile".to_owned(),
        kind: ControlKind::Slider {
            min: 0,
            max: (MAX_GDP_PERCENTILE_INDEX * 10) as i32,
            step: 10,
            value: (scatter.gdp_percentile_index() * 10) as i32,
        },
    });
    frame.push(threshold_caption(scatter, target.viewport));
    Ok(TileOutput::frame(frame))
}

fn threshold_caption(scatter: &ScatterViewModel, viewport: Viewport) -> TextPrimitive {
    let visible = scatter.visible_records().count();
    let total = scatter.records().len();
    let text = if scatter.gdp_percentile_index() == 0 {
        format!("Showing {visible} of {total} countries")
    } else {
        format!(
            "Showing {visible} of {total} countries above {} GDP per capita",
            format_dollars(scatter.gdp_threshold())
        )
    };
    TextPrimitive::new(
        "scatter-gdp-threshold",
        text,
        f64::from(viewport.width) - 8.0,
        f64::from(viewport.height) - 8.0,
        12.0,
        TextHAlign::Right,
    )
    .with_color(palette::MUTED)
}

pub fn render_chart(env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    let scatter = env.scatter;
    let scales = ScatterScales::new(target.viewport)?;
    let plot = scales.plot;
    let mut frame = RenderFrame::new(target.viewport);

    frame.push(AxisPrimitive {
        id: "scatter-axis-gdp".into(),
        orientation: AxisOrientation::Bottom,
        x: plot.left,
        y: plot.bottom,
        length: plot.right - plot.left,
        ticks: scales
            .gdp
            .ticks(8)
            .into_iter()
            .map(|value| AxisTick {
                offset: scales.gdp.map(value) - plot.left,
                label: format_gdp_tick(value),
            })
            .collect(),
        title: Some("GDP per capita (USD, log scale)".to_owned()),
    });
    frame.push(AxisPrimitive {
        id: "scatter-axis-happiness".into(),
        orientation: AxisOrientation::Left,
        x: plot.left,
        y: plot.top,
        length: plot.bottom - plot.top,
        ticks: scales
            .happiness
            .ticks(5)
            .into_iter()
            .map(|value| AxisTick {
                offset: scales.happiness.map(value) - plot.top,
                label: format!("{value}"),
            })
            .collect(),
        title: Some("Happiness score".to_owned()),
    });

    // Largest first so small countries stay clickable on top.
    let mut visible: Vec<&CountryYearRecord> = scatter.visible_records().collect();
    visible.sort_by_key(|record| Reverse(record.population));
    let selected = scatter.selection().map(|record| record.country.as_str());
    let mut drawn = IndexSet::with_capacity(visible.len());
    for record in visible {
        let id = circle_id(&record.country);
        if !drawn.insert(id.clone()) {
            warn!(country = %record.country, "skipping circle with a colliding key");
            continue;
        }
        let (cx, cy) = scales.position(record);
        let mut circle = CirclePrimitive::new(
            id,
            cx,
            cy,
            scales.radius.map(record.population as f64).max(2.0),
            palette::POINT,
        )
        .clickable();
        if selected == Some(record.country.as_str()) {
            circle = circle.with_stroke(palette::HIGHLIGHT);
        }
        frame.push(circle);
    }

    let label_x = plot.right - CALLOUT_COLUMN_WIDTH_PX;
    let mut labelled = IndexSet::with_capacity(scatter.annotations().len());
    let annotations = scatter
        .annotations()
        .iter()
        .filter(|record| labelled.insert(country_key(&record.country)));
    for (slot, record) in annotations.enumerate() {
        let (x, y) = scales.position(record);
        let label_y = plot.top + 12.0 + slot as f64 * CALLOUT_ROW_PX;
        frame.push(CalloutPrimitive {
            id: format!("callout-{}", country_key(&record.country)).into(),
            target_x: x,
            target_y: y,
            dx: label_x - x,
            dy: label_y - y,
            title: record.country.clone(),
            label: format!("rank {}, score {}", record.rank, format_score(record.happiness)),
        });
    }

    Ok(TileOutput::frame(frame))
}

pub fn render_detail(env: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
    let mut frame = RenderFrame::new(target.viewport);
    let Some(record) = env.scatter.selection() else {
        frame.push(
            TextPrimitive::new(
                "detail-prompt",
                "Click a country to see its details",
                12.0,
                24.0,
                13.0,
                TextHAlign::Left,
            )
            .with_color(palette::MUTED),
        );
        return Ok(TileOutput::frame(frame));
    };

    frame.push(TextPrimitive::new(
        "detail-country",
        record.country.clone(),
        12.0,
        26.0,
        18.0,
        TextHAlign::Left,
    ));
    let facts = [
        ("detail-year", format!("Year: {}", record.year)),
        ("detail-rank", format!("Happiness rank: #{}", record.rank)),
        (
            "detail-score",
            format!("Happiness score: {}", format_score(record.happiness)),
        ),
        (
            "detail-population",
            format!("Population: {}", format_thousands(record.population)),
        ),
        (
            "detail-gdp",
            format!("GDP per capita: {}", format_dollars(record.gdp)),
        ),
    ];
    for (row, (id, text)) in facts.into_iter().enumerate() {
        frame.push(TextPrimitive::new(
            id,
            text,
            12.0,
            52.0 + row as f64 * 20.0,
            13.0,
            TextHAlign::Left,
        ));
    }
    if !record.visible {
        frame.push(
            TextPrimitive::new(
                "detail-hidden",
                "Hidden by the GDP filter",
                12.0,
                52.0 + 5.0 * 20.0,
                12.0,
                TextHAlign::Left,
            )
            .with_color(palette::HIGHLIGHT),
        );
    }
    Ok(TileOutput::frame(frame))
}
