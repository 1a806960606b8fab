//! Panel-level API: view state machine, fullscreen controller, configuration
//! and the `ChartPanel` composition root.

mod fullscreen;
mod panel;
mod panel_config;
mod snapshot;
mod view_state;

pub use fullscreen::{FullscreenController, SubscriptionId};
pub use panel::{
    ChartBody, ChartPanel, CompareButton, ControlBar, FullscreenButton, FullscreenIcon,
    NO_DATA_MESSAGE, PanelView, RangeButton,
};
pub use panel_config::{Padding, PanelConfig};
pub use snapshot::{PANEL_SNAPSHOT_SCHEMA_VERSION, PanelSnapshot};
pub use view_state::{ChartViewState, DEFAULT_CURRENT_PRICE, LoadOutcome, LoadPhase, LoadTicket};
