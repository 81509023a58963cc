use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Viewport;

/// Layout position of a tile within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileSlot {
    TopChart,
    TopControls,
    TopDetail,
    BottomChart,
    BottomControls,
    BottomDetail,
}

impl TileSlot {
    /// Slots in layout order.
    pub const ALL: [TileSlot; 6] = [
        TileSlot::TopChart,
        TileSlot::TopControls,
        TileSlot::TopDetail,
        TileSlot::BottomChart,
        TileSlot::BottomControls,
        TileSlot::BottomDetail,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopChart => "topChart",
            Self::TopControls => "topControls",
            Self::TopDetail => "topDetail",
            Self::BottomChart => "bottomChart",
            Self::BottomControls => "bottomControls",
            Self::BottomDetail => "bottomDetail",
        }
    }
}

impl fmt::Display for TileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle of a drawing surface created by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(u64);

impl SurfaceId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Request for a fresh drawing surface in a tile slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub slot: TileSlot,
    pub title: Option<String>,
    pub viewport: Viewport,
}

/// Markup shown verbatim under the scene title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText(String);

impl RichText {
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Previous/next controls; `None` hides the control at a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationBar {
    pub previous: Option<String>,
    pub next: Option<String>,
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneHeader {
    pub title: String,
    pub description: Option<RichText>,
    pub navigation: NavigationBar,
}
