//! Animated year-by-year happiness ranking.

mod rank_driver;
mod reconcile;

pub use rank_driver::{RankAnimationDriver, YEAR_CAPTION_ID, render_ranking_tile};
pub use reconcile::{BarLayout, BarReconciler};
