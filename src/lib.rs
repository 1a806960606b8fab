//! chart-panel: interactive price-chart panel core.
//!
//! The crate keeps a strict split between panel state (`api`), synthetic data
//! and geometry (`core`), pointer handling (`interaction`), drawing (`render`)
//! and host fullscreen integration (`platform`, `platform_gtk`).

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod platform;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartPanel, ChartViewState, FullscreenController, PanelConfig, PanelView};
pub use error::{ChartError, ChartResult};
