use smallvec::SmallVec;

use crate::core::AxisBounds;
use crate::error::ChartResult;
use crate::interaction::HoverPoint;
use crate::render::{ChartOptions, LinePrimitive, SeriesSelection};

/// Lines contributed by one draw hook for one pass.
pub type HookLines = SmallVec<[LinePrimitive; 2]>;

/// Callback run by a [`ChartRenderer`] after the series of a pass are drawn.
///
/// Hooks receive the hover state resolved for that pass and must derive all
/// output from their arguments.
pub trait DrawHook {
    fn id(&self) -> &str;
    fn after_draw(&self, hover: Option<HoverPoint>, bounds: AxisBounds) -> HookLines;
}

/// Everything a renderer needs for one draw.
#[derive(Clone, Copy)]
pub struct ChartRequest<'a> {
    pub selection: SeriesSelection<'a>,
    pub options: &'a ChartOptions,
    pub draw_hooks: &'a [&'a dyn DrawHook],
}

impl<'a> ChartRequest<'a> {
    #[must_use]
    pub fn new(
        selection: SeriesSelection<'a>,
        options: &'a ChartOptions,
        draw_hooks: &'a [&'a dyn DrawHook],
    ) -> Self {
        Self {
            selection,
            options,
            draw_hooks,
        }
    }
}

/// Result of one draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawReport {
    pub hover: Option<HoverPoint>,
    pub hooks_invoked: usize,
}

/// Chart drawing collaborator of the panel.
///
/// The renderer owns pointer/hover state. Each `draw` resolves the current
/// [`HoverPoint`] first and then invokes every hook exactly once with it.
pub trait ChartRenderer {
    fn draw(&mut self, request: &ChartRequest<'_>) -> ChartResult<DrawReport>;
    fn pointer_move(&mut self, x: f64, y: f64);
    fn pointer_leave(&mut self);
}
