mod config;
mod events;
mod presentation;

pub use config::PresentationConfig;
pub use events::{PresentationEvent, Redraw};
pub use presentation::Presentation;
