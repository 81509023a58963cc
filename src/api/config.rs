use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Viewport, Year};
use crate::error::{VizError, VizResult};
use crate::scatter::AnnotationMode;
use crate::scenes::TileSize;

const MIN_SCATTER_WIDTH: u32 = 240;
const MIN_SCATTER_HEIGHT: u32 = 120;

/// Host-facing presentation setup.
///
/// Serializable so hosts can ship the setup next to the dataset bundle;
/// every field has a default, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    #[serde(default = "default_bar_chart_viewport")]
    pub bar_chart_viewport: Viewport,
    #[serde(default = "default_ranking_viewport")]
    pub ranking_viewport: Viewport,
    #[serde(default = "default_scatter_viewport")]
    pub scatter_viewport: Viewport,
    #[serde(default = "default_detail_viewport")]
    pub detail_viewport: Viewport,
    #[serde(default = "default_controls_viewport")]
    pub controls_viewport: Viewport,
    #[serde(default = "default_text_viewport")]
    pub text_viewport: Viewport,
    #[serde(default = "default_animation_period_ms")]
    pub animation_period_ms: u64,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default = "default_ranking_top_n")]
    pub ranking_top_n: usize,
    #[serde(default = "default_annotation_count")]
    pub annotation_count: usize,
    #[serde(default = "default_overview_bar_count")]
    pub overview_bar_count: usize,
    /// Year of the overview bar charts.
    #[serde(default = "default_featured_year")]
    pub featured_year: Year,
    #[serde(default = "default_featured_year")]
    pub initial_scatter_year: Year,
    #[serde(default = "default_annotation_mode")]
    pub initial_annotation_mode: AnnotationMode,
    /// Years cycled by the change-over-time scene, in order.
    #[serde(default = "default_animation_years")]
    pub animation_years: Vec<Year>,
    /// Foreign spelling -> happiness-report spelling, on top of the built-in table.
    #[serde(default)]
    pub extra_country_aliases: IndexMap<String, String>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            bar_chart_viewport: default_bar_chart_viewport(),
            ranking_viewport: default_ranking_viewport(),
            scatter_viewport: default_scatter_viewport(),
            detail_viewport: default_detail_viewport(),
            controls_viewport: default_controls_viewport(),
            text_viewport: default_text_viewport(),
            animation_period_ms: default_animation_period_ms(),
            transition_ms: default_transition_ms(),
            ranking_top_n: default_ranking_top_n(),
            annotation_count: default_annotation_count(),
            overview_bar_count: default_overview_bar_count(),
            featured_year: default_featured_year(),
            initial_scatter_year: default_featured_year(),
            initial_annotation_mode: default_annotation_mode(),
            animation_years: default_animation_years(),
            extra_country_aliases: IndexMap::new(),
        }
    }
}

impl PresentationConfig {
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| VizError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VizError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Sets the period of the change-over-time animation.
    #[must_use]
    pub fn with_animation_period(mut self, period: Duration) -> Self {
        self.animation_period_ms = period.as_millis() as u64;
        self
    }

    #[must_use]
    pub fn with_animation_years(mut self, years: Vec<Year>) -> Self {
        self.animation_years = years;
        self
    }

    #[must_use]
    pub fn with_initial_scatter_year(mut self, year: Year) -> Self {
        self.initial_scatter_year = year;
        self
    }

    #[must_use]
    pub fn with_country_alias(
        mut self,
        foreign: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.extra_country_aliases
            .insert(foreign.into(), canonical.into());
        self
    }

    #[must_use]
    pub fn tile_viewport(&self, size: TileSize) -> Viewport {
        match size {
            TileSize::Text => self.text_viewport,
            TileSize::BarChart => self.bar_chart_viewport,
            TileSize::Ranking => self.ranking_viewport,
            TileSize::Scatter => self.scatter_viewport,
            TileSize::Detail => self.detail_viewport,
            TileSize::Controls => self.controls_viewport,
        }
    }

    #[must_use]
    pub fn animation_period(&self) -> Duration {
        Duration::from_millis(self.animation_period_ms)
    }

    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn validate(&self) -> VizResult<()> {
        let viewports = [
            self.bar_chart_viewport,
            self.ranking_viewport,
            self.scatter_viewport,
            self.detail_viewport,
            self.controls_viewport,
            self.text_viewport,
        ];
        if let Some(viewport) = viewports.into_iter().find(|viewport| !viewport.is_valid()) {
            return Err(VizError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if self.scatter_viewport.width < MIN_SCATTER_WIDTH
            || self.scatter_viewport.height < MIN_SCATTER_HEIGHT
        {
            return Err(VizError::InvalidConfig(format!(
                "scatter viewport must be at least {MIN_SCATTER_WIDTH}x{MIN_SCATTER_HEIGHT}"
            )));
        }
        if self.animation_period_ms == 0 {
            return Err(VizError::InvalidConfig(
                "animation_period_ms must be > 0".to_owned(),
            ));
        }
        if self.transition_ms > self.animation_period_ms {
            return Err(VizError::InvalidConfig(format!(
                "transition_ms ({}) must not exceed animation_period_ms ({})",
                self.transition_ms, self.animation_period_ms
            )));
        }
        if self.animation_years.is_empty() {
            return Err(VizError::InvalidConfig(
                "animation_years must not be empty".to_owned(),
            ));
        }
        if self.ranking_top_n == 0 || self.overview_bar_count == 0 {
            return Err(VizError::InvalidConfig(
                "ranking_top_n and overview_bar_count must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_bar_chart_viewport() -> Viewport {
    Viewport::new(760, 180)
}

fn default_ranking_viewport() -> Viewport {
    Viewport::new(760, 500)
}

fn default_scatter_viewport() -> Viewport {
    Viewport::new(760, 480)
}

fn default_detail_viewport() -> Viewport {
    Viewport::new(300, 200)
}

fn default_controls_viewport() -> Viewport {
    Viewport::new(760, 60)
}

fn default_text_viewport() -> Viewport {
    Viewport::new(760, 120)
}

fn default_animation_period_ms() -> u64 {
    2_000
}

fn default_transition_ms() -> u64 {
    750
}

fn default_ranking_top_n() -> usize {
    100
}

fn default_annotation_count() -> usize {
    5
}

fn default_overview_bar_count() -> usize {
    5
}

fn default_featured_year() -> Year {
    Year::Y2019
}

fn default_annotation_mode() -> AnnotationMode {
    AnnotationMode::MostHappy
}

fn default_animation_years() -> Vec<Year> {
    Year::ALL.to_vec()
}

#[cfg(test)]
mod tests {
    use super::PresentationConfig;
    use crate::core::{Viewport, Year};
    use crate::scenes::TileSize;
    use std::time::Duration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PresentationConfig::from_json_str("{}").expect("config");
        assert_eq!(config, PresentationConfig::default());
        assert_eq!(config.animation_period(), Duration::from_millis(2000));
        assert_eq!(config.transition_duration(), Duration::from_millis(750));
        assert_eq!(config.tile_viewport(TileSize::BarChart), Viewport::new(760, 180));
        assert_eq!(config.animation_years, Year::ALL);
    }

    #[test]
    fn unknown_year_is_rejected() {
        assert!(PresentationConfig::from_json_str(r#"{"featured_year": 2014}"#).is_err());
    }

    #[test]
    fn transition_longer_than_period_is_rejected() {
        let config = PresentationConfig {
            transition_ms: 3_000,
            ..PresentationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_scatter_viewport_is_rejected() {
        let config = PresentationConfig {
            scatter_viewport: Viewport::new(100, 100),
            ..PresentationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
