use tracing::warn;

use crate::core::Year;
use crate::render::ElementId;
use crate::scatter::AnnotationMode;
use crate::scatter::tiles::{ANNOTATION_CONTROL_ID, GDP_CONTROL_ID, YEAR_CONTROL_ID};

/// User input forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    Next,
    Previous,
    YearSelected(Year),
    AnnotationModeSelected(AnnotationMode),
    /// Raw slider value in percent; snapped to a decade by the scatter model.
    GdpSliderInput(i32),
    CountryClicked(String),
    /// Click on a drawn element; resolved against the scatter circles.
    ElementClicked(ElementId),
    SelectionCleared,
}

impl PresentationEvent {
    /// Translates a change reported on one of the scatter controls.
    ///
    /// Returns `None` for unknown controls and values that do not parse.
    #[must_use]
    pub fn from_control(control_id: &str, value: &str) -> Option<Self> {
        let event = match control_id {
            YEAR_CONTROL_ID => value
                .trim()
                .parse::<u16>()
                .ok()
                .and_then(|raw| Year::try_from(raw).ok())
                .map(Self::YearSelected),
            ANNOTATION_CONTROL_ID => {
                AnnotationMode::from_key(value.trim()).map(Self::AnnotationModeSelected)
            }
            GDP_CONTROL_ID => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|raw| raw.is_finite())
                .map(|raw| Self::GdpSliderInput(raw.round().clamp(-1e6, 1e6) as i32)),
            _ => None,
        };
        if event.is_none() {
            warn!(control_id, value, "ignoring unrecognized control input");
        }
        event
    }
}

/// What a handled event caused to be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    /// Only the scatter-following tiles of the current scene.
    Scatter { tiles: usize },
    /// The whole scene, after a transition.
    Scene,
}
