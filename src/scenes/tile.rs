use std::fmt;
use std::time::Duration;

use crate::api::PresentationConfig;
use crate::core::Viewport;
use crate::data::Dataset;
use crate::error::VizResult;
use crate::render::{RenderFrame, SurfaceId, TileSlot, Transition};
use crate::scatter::ScatterViewModel;

/// Read-only application state handed to tile render functions.
#[derive(Debug, Clone, Copy)]
pub struct TileEnv<'a> {
    pub dataset: &'a Dataset,
    pub scatter: &'a ScatterViewModel,
    pub config: &'a PresentationConfig,
}

/// Freshly created surface a tile draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTarget {
    pub surface: SurfaceId,
    pub slot: TileSlot,
    pub viewport: Viewport,
}

/// Work repeated on a fixed period while its scene is active.
///
/// Returned by a tile's render function; the navigation controller owns it
/// from then on and drops it when the scene is left.
pub trait PeriodicTask: fmt::Debug {
    fn period(&self) -> Duration;

    /// Produces the in-place update for one tick, if anything changed.
    fn tick(&mut self, env: &TileEnv<'_>) -> VizResult<Option<Transition>>;
}

#[derive(Debug)]
pub struct TileOutput {
    pub frame: RenderFrame,
    pub task: Option<Box<dyn PeriodicTask>>,
}

impl TileOutput {
    #[must_use]
    pub fn frame(frame: RenderFrame) -> Self {
        Self { frame, task: None }
    }

    #[must_use]
    pub fn with_task(frame: RenderFrame, task: Box<dyn PeriodicTask>) -> Self {
        Self {
            frame,
            task: Some(task),
        }
    }
}

pub type TileRenderFn = fn(&TileEnv<'_>, &DrawTarget) -> VizResult<TileOutput>;

/// Surface size class, resolved through `PresentationConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileSize {
    Text,
    BarChart,
    Ranking,
    Scatter,
    Detail,
    Controls,
}

/// When a mounted tile is drawn again without a scene transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileRefresh {
    OnEnter,
    OnScatterChange,
}

#[derive(Clone, Copy)]
pub struct TileSpec {
    pub title: Option<&'static str>,
    pub size: TileSize,
    pub refresh: TileRefresh,
    pub render: TileRenderFn,
}

impl TileSpec {
    #[must_use]
    pub const fn new(size: TileSize, render: TileRenderFn) -> Self {
        Self {
            title: None,
            size,
            refresh: TileRefresh::OnEnter,
            render,
        }
    }

    #[must_use]
    pub const fn titled(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub const fn follows_scatter(mut self) -> Self {
        self.refresh = TileRefresh::OnScatterChange;
        self
    }
}

impl fmt::Debug for TileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileSpec")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}
