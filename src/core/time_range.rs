use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Selectable chart time range.
///
/// The range is the regeneration key for the panel dataset; it does not filter
/// existing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[default]
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "max")]
    Max,
}

impl TimeRange {
    /// All ranges in control-bar order.
    pub const ALL: [TimeRange; 7] = [
        TimeRange::OneDay,
        TimeRange::ThreeDays,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::Max,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::ThreeDays => "3d",
            TimeRange::OneWeek => "1w",
            TimeRange::OneMonth => "1m",
            TimeRange::SixMonths => "6m",
            TimeRange::OneYear => "1y",
            TimeRange::Max => "max",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|range| range.label() == input)
            .ok_or_else(|| ChartError::InvalidInput(format!("unknown time range `{input}`")))
    }
}
