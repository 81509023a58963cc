use crate::error::{VizError, VizResult};
use crate::render::{RichText, TileSlot};

use super::tile::TileSpec;

/// Tiles of one scene, one optional entry per layout slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileLayout {
    pub top_chart: Option<TileSpec>,
    pub top_controls: Option<TileSpec>,
    pub top_detail: Option<TileSpec>,
    pub bottom_chart: Option<TileSpec>,
    pub bottom_controls: Option<TileSpec>,
    pub bottom_detail: Option<TileSpec>,
}

impl TileLayout {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            top_chart: None,
            top_controls: None,
            top_detail: None,
            bottom_chart: None,
            bottom_controls: None,
            bottom_detail: None,
        }
    }

    #[must_use]
    pub const fn with(mut self, slot: TileSlot, spec: TileSpec) -> Self {
        match slot {
            TileSlot::TopChart => self.top_chart = Some(spec),
            TileSlot::TopControls => self.top_controls = Some(spec),
            TileSlot::TopDetail => self.top_detail = Some(spec),
            TileSlot::BottomChart => self.bottom_chart = Some(spec),
            TileSlot::BottomControls => self.bottom_controls = Some(spec),
            TileSlot::BottomDetail => self.bottom_detail = Some(spec),
        }
        self
    }

    #[must_use]
    pub const fn get(&self, slot: TileSlot) -> Option<&TileSpec> {
        match slot {
            TileSlot::TopChart => self.top_chart.as_ref(),
            TileSlot::TopControls => self.top_controls.as_ref(),
            TileSlot::TopDetail => self.top_detail.as_ref(),
            TileSlot::BottomChart => self.bottom_chart.as_ref(),
            TileSlot::BottomControls => self.bottom_controls.as_ref(),
            TileSlot::BottomDetail => self.bottom_detail.as_ref(),
        }
    }

    /// Populated slots in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (TileSlot, &TileSpec)> {
        TileSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|spec| (slot, spec)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct SceneDescriptor {
    pub title: &'static str,
    pub description: Option<&'static str>,
    pub tiles: TileLayout,
}

impl SceneDescriptor {
    #[must_use]
    pub const fn new(title: &'static str, tiles: TileLayout) -> Self {
        Self {
            title,
            description: None,
            tiles,
        }
    }

    #[must_use]
    pub const fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn description_text(&self) -> Option<RichText> {
        self.description.map(RichText::new)
    }
}

/// Ordered, immutable list of scenes.
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
}

impl SceneRegistry {
    pub fn new(scenes: Vec<SceneDescriptor>) -> VizResult<Self> {
        if scenes.is_empty() {
            return Err(VizError::InvalidConfig(
                "scene registry must contain at least one scene".to_owned(),
            ));
        }
        if let Some(scene) = scenes.iter().find(|scene| scene.title.is_empty()) {
            return Err(VizError::InvalidConfig(format!(
                "scene with {} tiles has an empty title",
                scene.tiles.len()
            )));
        }
        Ok(Self { scenes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneDescriptor> {
        self.scenes.iter()
    }

    #[must_use]
    pub fn position(&self, title: &str) -> Option<usize> {
        self.scenes.iter().position(|scene| scene.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::{SceneDescriptor, SceneRegistry, TileLayout};
    use crate::render::{RenderFrame, TileSlot};
    use crate::scenes::{DrawTarget, TileEnv, TileOutput, TileSize, TileSpec};
    use crate::error::VizResult;

    fn blank(_: &TileEnv<'_>, target: &DrawTarget) -> VizResult<TileOutput> {
        Ok(TileOutput::frame(RenderFrame::new(target.viewport)))
    }

    #[test]
    fn layout_iterates_populated_slots_in_layout_order() {
        let layout = TileLayout::empty()
            .with(TileSlot::BottomChart, TileSpec::new(TileSize::BarChart, blank))
            .with(TileSlot::TopChart, TileSpec::new(TileSize::BarChart, blank));
        let slots: Vec<TileSlot> = layout.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, [TileSlot::TopChart, TileSlot::BottomChart]);
        assert!(layout.get(TileSlot::TopDetail).is_none());
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert!(SceneRegistry::new(Vec::new()).is_err());
        let registry = SceneRegistry::new(vec![SceneDescriptor::new("Only", TileLayout::empty())])
            .expect("registry");
        assert_eq!(registry.position("Only"), Some(0));
    }
}
