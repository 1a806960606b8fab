use serde::{Deserialize, Serialize};

use crate::api::{ChartViewState, LoadPhase};
use crate::core::TimeRange;
use crate::error::{ChartError, ChartResult};
use crate::render::SelectionKind;

pub const PANEL_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serializable view of a panel's state for diagnostics and fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub schema_version: u32,
    pub time_range: TimeRange,
    pub target_time_range: TimeRange,
    pub phase: LoadPhase,
    pub is_fullscreen: bool,
    pub show_comparison: bool,
    pub current_price: f64,
    pub point_count: Option<usize>,
    pub rendered: Option<SelectionKind>,
    pub applied_loads: u64,
    pub last_error: Option<String>,
}

impl PanelSnapshot {
    #[must_use]
    pub fn capture(state: &ChartViewState) -> Self {
        Self {
            schema_version: PANEL_SNAPSHOT_SCHEMA_VERSION,
            time_range: state.time_range(),
            target_time_range: state.target_time_range(),
            phase: state.phase(),
            is_fullscreen: state.is_fullscreen(),
            show_comparison: state.show_comparison(),
            current_price: state.current_price(),
            point_count: state.dataset().map(|dataset| dataset.base.len()),
            rendered: state.rendered_selection().map(|selection| selection.kind()),
            applied_loads: state.applied_loads(),
            last_error: state.last_error().map(ToString::to_string),
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            ChartError::InvalidData(format!("failed to serialize panel snapshot: {err}"))
        })
    }
}
