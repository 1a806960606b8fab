use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of the chart drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Pixel bounds of the plot area.
///
/// `top`/`bottom` are the extent of the value axis, `left`/`right` the extent of
/// the category axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl AxisBounds {
    #[must_use]
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Bounds inset from the viewport edges by the given pixel margins.
    pub fn inset(
        viewport: Viewport,
        horizontal_margin_px: f64,
        vertical_margin_px: f64,
    ) -> ChartResult<Self> {
        let viewport = viewport.validate()?;
        let bounds = Self::new(
            horizontal_margin_px,
            f64::from(viewport.width) - horizontal_margin_px,
            vertical_margin_px,
            f64::from(viewport.height) - vertical_margin_px,
        );
        bounds.validate()
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn validate(self) -> ChartResult<Self> {
        let finite = [self.left, self.right, self.top, self.bottom]
            .iter()
            .all(|value| value.is_finite());
        if !finite || self.right <= self.left || self.bottom <= self.top {
            return Err(ChartError::InvalidData(
                "axis bounds must be finite with right > left and bottom > top".to_owned(),
            ));
        }
        Ok(self)
    }
}
