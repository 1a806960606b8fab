mod chart_renderer;
mod crosshair;
mod frame;
mod frame_renderer;
mod null_renderer;
mod options;
mod primitives;
mod selection;

pub use chart_renderer::{ChartRenderer, ChartRequest, DrawHook, DrawReport, HookLines};
pub use crosshair::{CrosshairOverlay, CrosshairStyle, crosshair_lines};
pub use frame::RenderFrame;
pub use frame_renderer::{FrameRenderer, FrameStyle};
pub use null_renderer::NullRenderer;
pub use options::{
    AxesOptions, AxisOptions, AxisPosition, ChartOptions, DEFAULT_VOLUME_AXIS_MAX,
    InteractionOptions, LegendOptions, LegendPosition, TooltipOptions, format_grouped,
};
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use selection::{DatasetKind, SelectionKind, SeriesSelection};

use crate::error::ChartResult;

/// Contract implemented by any pixel backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from panel state and hover resolution.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
