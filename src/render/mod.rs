mod frame;
mod null_renderer;
mod ops;
mod primitives;
mod surface;

pub use frame::RenderFrame;
pub use null_renderer::{NullRenderer, RecordedSurface};
pub use ops::{ElementOp, OpKind, Transition};
pub use primitives::{
    AxisOrientation, AxisPrimitive, AxisTick, CalloutPrimitive, CirclePrimitive, Color,
    ControlKind, ControlOption, ControlPrimitive, Element, ElementId, RectPrimitive, TextHAlign,
    TextPrimitive, palette,
};
pub use surface::{NavigationBar, RichText, SceneHeader, SurfaceId, SurfaceSpec, TileSlot};

use crate::error::VizResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive fully materialized frames and keyed ops, so drawing code
/// stays isolated from scene, dataset and interaction logic. User input on
/// drawn elements and controls is reported back to the host, which turns it
/// into a `PresentationEvent`.
pub trait Renderer {
    /// Discards every surface and header of the previous scene.
    fn clear_scene(&mut self) -> VizResult<()>;

    fn render_header(&mut self, header: &SceneHeader) -> VizResult<()>;

    fn create_surface(&mut self, spec: &SurfaceSpec) -> VizResult<SurfaceId>;

    /// Replaces the full content of `surface`.
    fn render(&mut self, surface: SurfaceId, frame: &RenderFrame) -> VizResult<()>;

    /// Updates existing content in place, animating over the transition.
    fn apply(&mut self, surface: SurfaceId, transition: &Transition) -> VizResult<()>;
}
