pub mod format;
pub mod quantile;
pub mod scale;
pub mod types;

pub use format::{format_dollars, format_gdp_tick, format_score, format_thousands};
pub use quantile::{BREAKPOINT_COUNT, decile_breakpoints, quantile_sorted};
pub use scale::{LinearScale, LogScale, SqrtScale};
pub use types::{Viewport, Year};
