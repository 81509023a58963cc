//! Scene definitions, navigation between them and the timer they own.

mod navigation;
mod registry;
pub mod story;
mod tile;
mod timer;

pub use navigation::{ActiveTimer, NavigationController, NavigationState};
pub use registry::{SceneDescriptor, SceneRegistry, TileLayout};
pub use tile::{
    DrawTarget, PeriodicTask, TileEnv, TileOutput, TileRefresh, TileRenderFn, TileSize, TileSpec,
};
pub use timer::{ManualTimerService, TimerId, TimerService};
