//! narrative-viz: scene composition and view-state engine for a narrative
//! visualization of happiness, population and wealth.
//!
//! The crate owns data reconciliation, scene navigation, the interactive
//! scatter state and the ranking animation. Drawing is delegated to a
//! [`render::Renderer`] and periodic work to a [`scenes::TimerService`], both
//! supplied by the host.

pub mod animation;
pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod render;
pub mod scatter;
pub mod scenes;
pub mod telemetry;

pub use api::{Presentation, PresentationConfig, PresentationEvent, Redraw};
pub use error::{VizError, VizResult};
