//! Interactive wealth/happiness scatter plot: view state and tiles.

pub mod tiles;
mod view_model;

pub use view_model::{
    AnnotationMode, Annotations, MAX_GDP_PERCENTILE_INDEX, ScatterChange, ScatterState,
    ScatterViewModel, gdp_percentile_index_from_slider,
};
