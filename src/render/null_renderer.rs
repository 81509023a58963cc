use indexmap::IndexMap;

use crate::error::{VizError, VizResult};
use crate::render::{RenderFrame, Renderer, SceneHeader, SurfaceId, SurfaceSpec, Transition};

/// What a headless run drew into one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSurface {
    pub spec: SurfaceSpec,
    pub frame: Option<RenderFrame>,
    pub render_count: usize,
    pub transition_count: usize,
}

/// Headless renderer used by tests and embedding without a display.
///
/// It validates everything it is handed and keeps the resulting surface
/// contents, so tests can assert on geometry without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    next_surface: u64,
    pub header: Option<SceneHeader>,
    pub surfaces: IndexMap<SurfaceId, RecordedSurface>,
    pub clear_count: usize,
    pub last_element_count: usize,
    pub last_transition: Option<Transition>,
}

impl NullRenderer {
    /// Current surface for `title`, if the active scene has one.
    #[must_use]
    pub fn surface_titled(&self, title: &str) -> Option<&RecordedSurface> {
        self.surfaces
            .values()
            .find(|surface| surface.spec.title.as_deref() == Some(title))
    }

    #[must_use]
    pub fn surface_in(&self, slot: crate::render::TileSlot) -> Option<&RecordedSurface> {
        self.surfaces
            .values()
            .find(|surface| surface.spec.slot == slot)
    }

    #[must_use]
    pub fn frame_in(&self, slot: crate::render::TileSlot) -> Option<&RenderFrame> {
        self.surface_in(slot).and_then(|surface| surface.frame.as_ref())
    }

    fn surface_mut(&mut self, surface: SurfaceId) -> VizResult<&mut RecordedSurface> {
        self.surfaces
            .get_mut(&surface)
            .ok_or_else(|| VizError::Render(format!("unknown surface {}", surface.raw())))
    }
}

impl Renderer for NullRenderer {
    fn clear_scene(&mut self) -> VizResult<()> {
        self.header = None;
        self.surfaces.clear();
        self.clear_count += 1;
        Ok(())
    }

    fn render_header(&mut self, header: &SceneHeader) -> VizResult<()> {
        if header.title.is_empty() {
            return Err(VizError::InvalidData(
                "scene title must not be empty".to_owned(),
            ));
        }
        self.header = Some(header.clone());
        Ok(())
    }

    fn create_surface(&mut self, spec: &SurfaceSpec) -> VizResult<SurfaceId> {
        if !spec.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: spec.viewport.width,
                height: spec.viewport.height,
            });
        }
        let id = SurfaceId::new(self.next_surface);
        self.next_surface += 1;
        self.surfaces.insert(
            id,
            RecordedSurface {
                spec: spec.clone(),
                frame: None,
                render_count: 0,
                transition_count: 0,
            },
        );
        Ok(id)
    }

    fn render(&mut self, surface: SurfaceId, frame: &RenderFrame) -> VizResult<()> {
        frame.validate()?;
        self.last_element_count = frame.len();
        let recorded = self.surface_mut(surface)?;
        recorded.frame = Some(frame.clone());
        recorded.render_count += 1;
        Ok(())
    }

    fn apply(&mut self, surface: SurfaceId, transition: &Transition) -> VizResult<()> {
        let recorded = self.surface_mut(surface)?;
        let frame = recorded
            .frame
            .as_mut()
            .ok_or_else(|| VizError::Render("transition on a surface never rendered".to_owned()))?;
        frame.apply(&transition.ops);
        frame.validate()?;
        recorded.transition_count += 1;
        let element_count = frame.len();
        self.last_element_count = element_count;
        self.last_transition = Some(transition.clone());
        Ok(())
    }
}
