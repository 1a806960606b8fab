use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_CURRENT_PRICE;
use crate::core::{
    DEFAULT_COMPARISON_FACTOR, DEFAULT_POINT_COUNT, GeneratorConfig, SampleRange, TimeRange,
    Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{CrosshairStyle, DEFAULT_VOLUME_AXIS_MAX};

/// Container padding in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub vertical_px: f64,
    pub horizontal_px: f64,
}

impl Padding {
    pub const ZERO: Padding = Padding::new(0.0, 0.0);

    #[must_use]
    pub const fn new(vertical_px: f64, horizontal_px: f64) -> Self {
        Self {
            vertical_px,
            horizontal_px,
        }
    }

    /// CSS shorthand form, e.g. `60px 20px` or `0px`.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.vertical_px == self.horizontal_px {
            format!("{}px", self.vertical_px)
        } else {
            format!("{}px {}px", self.vertical_px, self.horizontal_px)
        }
    }
}

/// Tunables of a chart panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub point_count: usize,
    pub generator: GeneratorConfig,
    pub comparison_factor: SampleRange,
    pub initial_price: f64,
    pub default_time_range: TimeRange,
    pub container: Viewport,
    pub fullscreen_padding: Padding,
    pub volume_axis_max: f64,
    pub crosshair: CrosshairStyle,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            generator: GeneratorConfig::default(),
            comparison_factor: DEFAULT_COMPARISON_FACTOR,
            initial_price: DEFAULT_CURRENT_PRICE,
            default_time_range: TimeRange::default(),
            container: Viewport::new(840, 400),
            fullscreen_padding: Padding::new(60.0, 20.0),
            volume_axis_max: DEFAULT_VOLUME_AXIS_MAX,
            crosshair: CrosshairStyle::default(),
        }
    }
}

impl PanelConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidData(format!("invalid panel config: {err}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize panel config: {err}")))
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.point_count == 0 {
            return Err(ChartError::InvalidData(
                "point_count must be greater than zero".to_owned(),
            ));
        }
        self.generator.validate()?;
        self.comparison_factor.validate("comparison factor")?;
        if self.comparison_factor.min <= 0.0 {
            return Err(ChartError::InvalidData(
                "comparison factor must be > 0".to_owned(),
            ));
        }
        if !self.initial_price.is_finite() {
            return Err(ChartError::InvalidData(
                "initial_price must be finite".to_owned(),
            ));
        }
        self.container.validate()?;
        let padding = self.fullscreen_padding;
        if !(padding.vertical_px.is_finite() && padding.vertical_px >= 0.0)
            || !(padding.horizontal_px.is_finite() && padding.horizontal_px >= 0.0)
        {
            return Err(ChartError::InvalidData(
                "fullscreen padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.volume_axis_max.is_finite() || self.volume_axis_max <= 0.0 {
            return Err(ChartError::InvalidData(
                "volume_axis_max must be finite and > 0".to_owned(),
            ));
        }
        self.crosshair.validate()?;
        Ok(self)
    }
}
