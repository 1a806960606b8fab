use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::AxisBounds;

/// Pixel radius used when hover resolution requires the pointer to intersect
/// the data point.
pub const INTERSECT_RADIUS_PX: f64 = 3.0;

/// How the renderer picks the active point from the pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    /// Nearest category along the X axis, across all datasets.
    #[default]
    Index,
    /// Pointer input never activates a point.
    Disabled,
}

/// Point currently under the pointer, as resolved by the renderer for one draw
/// pass. Never stored outside the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub value_index: usize,
}

/// Raw pointer position tracked by a renderer between draws.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    position: Option<(f64, f64)>,
}

impl PointerState {
    #[must_use]
    pub fn position(self) -> Option<(f64, f64)> {
        self.position
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.position = (x.is_finite() && y.is_finite()).then_some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.position = None;
    }
}

/// Resolves the hovered point in index mode.
///
/// `points` holds the projected pixel position of the first price dataset, one
/// entry per category. Pointers outside `bounds` resolve to nothing. With
/// `intersect` the pointer must lie within [`INTERSECT_RADIUS_PX`] of the point.
#[must_use]
pub fn resolve_index_hover(
    pointer: Option<(f64, f64)>,
    bounds: AxisBounds,
    points: &[(f64, f64)],
    mode: HoverMode,
    intersect: bool,
) -> Option<HoverPoint> {
    if mode == HoverMode::Disabled {
        return None;
    }
    let (x, y) = pointer?;
    if !bounds.contains(x, y) {
        return None;
    }

    let (value_index, &(pixel_x, pixel_y)) = points
        .iter()
        .enumerate()
        .min_by_key(|(_, (px, _))| OrderedFloat((px - x).abs()))?;

    if intersect && (pixel_x - x).hypot(pixel_y - y) > INTERSECT_RADIUS_PX {
        return None;
    }

    Some(HoverPoint {
        pixel_x,
        pixel_y,
        value_index,
    })
}
