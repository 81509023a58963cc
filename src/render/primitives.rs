use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> VizResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

pub mod palette {
    use super::Color;

    pub const INK: Color = Color::rgb(0.13, 0.13, 0.16);
    pub const MUTED: Color = Color::rgb(0.45, 0.47, 0.52);
    pub const BAR: Color = Color::rgb(0.27, 0.51, 0.71);
    pub const POINT: Color = Color::rgba(0.95, 0.61, 0.07, 0.75);
    pub const HIGHLIGHT: Color = Color::rgb(0.80, 0.15, 0.20);
}

/// Stable identifier for one drawn element, unique within a surface.
///
/// Renderers use it to update elements in place instead of recreating them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

fn require_finite(values: &[(&str, f64)], what: &str) -> VizResult<()> {
    for (name, value) in values {
        if !value.is_finite() {
            return Err(VizError::InvalidData(format!(
                "{what} `{name}` must be finite"
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(
        id: impl Into<ElementId>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    ) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            fill,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        require_finite(
            &[
                ("x", self.x),
                ("y", self.y),
                ("width", self.width),
                ("height", self.height),
            ],
            "rect",
        )?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(VizError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub id: ElementId,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        id: impl Into<ElementId>,
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            x,
            y,
            font_size_px,
            color: palette::INK,
            h_align,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.text.is_empty() {
            return Err(VizError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        require_finite(&[("x", self.x), ("y", self.y)], "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(VizError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub id: ElementId,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Option<Color>,
    /// Clicking the circle emits a selection event for this country.
    pub clickable: bool,
}

impl CirclePrimitive {
    #[must_use]
    pub fn new(id: impl Into<ElementId>, cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            id: id.into(),
            cx,
            cy,
            radius,
            fill,
            stroke: None,
            clickable: false,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = Some(stroke);
        self
    }

    #[must_use]
    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        require_finite(
            &[("cx", self.cx), ("cy", self.cy), ("radius", self.radius)],
            "circle",
        )?;
        if self.radius < 0.0 {
            return Err(VizError::InvalidData(
                "circle radius must be >= 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        self.stroke.map_or(Ok(()), Color::validate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Offset along the axis from its origin, in pixels.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisPrimitive {
    pub id: ElementId,
    pub orientation: AxisOrientation,
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub ticks: Vec<AxisTick>,
    pub title: Option<String>,
}

impl AxisPrimitive {
    pub fn validate(&self) -> VizResult<()> {
        require_finite(
            &[("x", self.x), ("y", self.y), ("length", self.length)],
            "axis",
        )?;
        if self.length <= 0.0 {
            return Err(VizError::InvalidData(
                "axis length must be > 0".to_owned(),
            ));
        }
        for tick in &self.ticks {
            if !tick.offset.is_finite() || tick.offset < -1e-9 || tick.offset > self.length + 1e-9 {
                return Err(VizError::InvalidData(format!(
                    "axis tick `{}` lies outside the axis",
                    tick.label
                )));
            }
        }
        Ok(())
    }
}

/// Labelled callout pointing at a data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutPrimitive {
    pub id: ElementId,
    pub target_x: f64,
    pub target_y: f64,
    /// Label offset from the target.
    pub dx: f64,
    pub dy: f64,
    pub title: String,
    pub label: String,
}

impl CalloutPrimitive {
    pub fn validate(&self) -> VizResult<()> {
        require_finite(
            &[
                ("target_x", self.target_x),
                ("target_y", self.target_y),
                ("dx", self.dx),
                ("dy", self.dy),
            ],
            "callout",
        )?;
        if self.title.is_empty() {
            return Err(VizError::InvalidData(
                "callout title must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlOption {
    pub value: String,
    pub label: String,
}

impl ControlOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    Select {
        options: Vec<ControlOption>,
        selected: String,
    },
    Slider {
        min: i32,
        max: i32,
        step: i32,
        value: i32,
    },
}

/// Form control; user input comes back to the host as a `PresentationEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlPrimitive {
    pub id: ElementId,
    pub label: String,
    pub kind: ControlKind,
}

impl ControlPrimitive {
    pub fn validate(&self) -> VizResult<()> {
        match &self.kind {
            ControlKind::Select { options, selected } => {
                if !options.iter().any(|option| option.value == *selected) {
                    return Err(VizError::InvalidData(format!(
                        "select `{}` has no option `{selected}`",
                        self.id
                    )));
                }
            }
            ControlKind::Slider {
                min,
                max,
                step,
                value,
            } => {
                if min > max || *step <= 0 || !(min..=max).contains(&value) {
                    return Err(VizError::InvalidData(format!(
                        "slider `{}` has an inconsistent range",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Any drawable element of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Rect(RectPrimitive),
    Text(TextPrimitive),
    Circle(CirclePrimitive),
    Axis(AxisPrimitive),
    Callout(CalloutPrimitive),
    Control(ControlPrimitive),
}

impl Element {
    #[must_use]
    pub fn id(&self) -> &ElementId {
        match self {
            Self::Rect(rect) => &rect.id,
            Self::Text(text) => &text.id,
            Self::Circle(circle) => &circle.id,
            Self::Axis(axis) => &axis.id,
            Self::Callout(callout) => &callout.id,
            Self::Control(control) => &control.id,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Axis(axis) => axis.validate(),
            Self::Callout(callout) => callout.validate(),
            Self::Control(control) => control.validate(),
        }
    }
}

macro_rules! element_from {
    ($($primitive:ident => $variant:ident),* $(,)?) => {
        $(impl From<$primitive> for Element {
            fn from(primitive: $primitive) -> Self {
                Self::$variant(primitive)
            }
        })*
    };
}

element_from!(
    RectPrimitive => Rect,
    TextPrimitive => Text,
    CirclePrimitive => Circle,
    AxisPrimitive => Axis,
    CalloutPrimitive => Callout,
    ControlPrimitive => Control,
);
