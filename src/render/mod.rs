mod draw_list;
mod frame;
mod null_renderer;
mod primitives;
mod style;

pub use draw_list::{DrawList, DrawPrimitive, FrameRenderer, StrokeStyle};
pub use frame::{FramePrimitive, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, DASH_PATTERN_PX, LinePrimitive, LineStrokeStyle, PolylinePrimitive, RectPrimitive,
};
pub use style::{LineStyle, PlotStyle};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from viewport and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
