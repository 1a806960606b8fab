use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::AxisBounds;
use crate::error::ChartResult;
use crate::interaction::HoverPoint;
use crate::render::{Color, DrawHook, HookLines, LinePrimitive, LineStrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub dash_px: f64,
    pub gap_px: f64,
}

impl Default for CrosshairStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba(0.0, 0.0, 0.0, 0.2),
            stroke_width: 1.0,
            dash_px: 5.0,
            gap_px: 5.0,
        }
    }
}

impl CrosshairStyle {
    pub fn validate(self) -> ChartResult<Self> {
        self.color.validate()?;
        LinePrimitive::new(0.0, 0.0, 1.0, 1.0, self.stroke_width, self.color)
            .with_stroke_style(self.stroke_style())
            .validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn stroke_style(self) -> LineStrokeStyle {
        LineStrokeStyle::Dashed {
            dash_px: self.dash_px,
            gap_px: self.gap_px,
        }
    }
}

/// Guide lines for the hovered point.
///
/// With a hover: a vertical line at `pixel_x` across the value axis
/// (`top..bottom`) followed by a horizontal line at `pixel_y` across the
/// category axis (`left..right`). Without a hover: nothing.
#[must_use]
pub fn crosshair_lines(
    hover: Option<HoverPoint>,
    bounds: AxisBounds,
    style: CrosshairStyle,
) -> SmallVec<[LinePrimitive; 2]> {
    let Some(hover) = hover else {
        return SmallVec::new();
    };

    let stroke_style = style.stroke_style();
    let vertical = LinePrimitive::new(
        hover.pixel_x,
        bounds.top,
        hover.pixel_x,
        bounds.bottom,
        style.stroke_width,
        style.color,
    )
    .with_stroke_style(stroke_style);
    let horizontal = LinePrimitive::new(
        bounds.left,
        hover.pixel_y,
        bounds.right,
        hover.pixel_y,
        style.stroke_width,
        style.color,
    )
    .with_stroke_style(stroke_style);

    SmallVec::from_buf([vertical, horizontal])
}

/// Draw hook painting the crosshair after each draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrosshairOverlay {
    style: CrosshairStyle,
}

impl CrosshairOverlay {
    pub fn new(style: CrosshairStyle) -> ChartResult<Self> {
        Ok(Self {
            style: style.validate()?,
        })
    }

    #[must_use]
    pub fn style(&self) -> CrosshairStyle {
        self.style
    }
}

impl DrawHook for CrosshairOverlay {
    fn id(&self) -> &str {
        "crosshair"
    }

    fn after_draw(&self, hover: Option<HoverPoint>, bounds: AxisBounds) -> HookLines {
        crosshair_lines(hover, bounds, self.style)
    }
}
