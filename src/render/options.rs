use serde::{Deserialize, Serialize};

use crate::interaction::HoverMode;
use crate::render::DatasetKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    Left,
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub display: bool,
    pub position: AxisPosition,
    pub show_grid: bool,
    pub show_ticks: bool,
    pub show_border: bool,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl AxisOptions {
    #[must_use]
    pub const fn hidden_ticks(position: AxisPosition) -> Self {
        Self {
            display: true,
            position,
            show_grid: false,
            show_ticks: false,
            show_border: true,
            min: None,
            max: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesOptions {
    pub category: AxisOptions,
    pub price: AxisOptions,
    pub volume: AxisOptions,
}

impl Default for AxesOptions {
    fn default() -> Self {
        Self {
            category: AxisOptions {
                show_grid: true,
                ..AxisOptions::hidden_ticks(AxisPosition::Bottom)
            },
            price: AxisOptions::hidden_ticks(AxisPosition::Left),
            volume: AxisOptions {
                min: Some(0.0),
                max: Some(DEFAULT_VOLUME_AXIS_MAX),
                ..AxisOptions::hidden_ticks(AxisPosition::Right)
            },
        }
    }
}

/// Upper bound of the volume axis; keeps bars in the lower part of the plot.
pub const DEFAULT_VOLUME_AXIS_MAX: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    pub mode: HoverMode,
    pub intersect: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipOptions {
    pub enabled: bool,
    pub price_decimals: usize,
}

/// Options handed to the renderer with every draw request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub interaction: InteractionOptions,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
    pub axes: AxesOptions,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            interaction: InteractionOptions {
                mode: HoverMode::Index,
                intersect: false,
            },
            legend: LegendOptions {
                display: false,
                position: LegendPosition::Top,
            },
            tooltip: TooltipOptions {
                enabled: true,
                price_decimals: 2,
            },
            axes: AxesOptions::default(),
        }
    }
}

impl ChartOptions {
    /// Options for the current comparison visibility: the legend is only shown
    /// while the comparison overlay is.
    #[must_use]
    pub fn for_comparison(mut self, show_comparison: bool) -> Self {
        self.legend.display = show_comparison;
        self
    }

    #[must_use]
    pub fn with_volume_axis_max(mut self, max: f64) -> Self {
        self.axes.volume.max = Some(max);
        self
    }

    /// Tooltip line for one dataset value.
    #[must_use]
    pub fn tooltip_label(&self, kind: DatasetKind, value: f64) -> String {
        match kind {
            DatasetKind::Volume => format!("Volume: {}", format_grouped(value)),
            DatasetKind::Price | DatasetKind::ComparisonPrice => format!(
                "{}: ${:.*}",
                kind.label(),
                self.tooltip.price_decimals,
                value
            ),
        }
    }
}

/// Formats with `,` thousands separators and at most three fraction digits,
/// trailing zeros trimmed.
#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 1);
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (integer.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (integer != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}
