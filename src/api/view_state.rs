use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::core::{Dataset, DatasetPipeline, SeriesSource, TimeRange};
use crate::error::{ChartError, ChartResult};
use crate::render::SeriesSelection;

/// Price shown by the indicator before any tick arrives.
pub const DEFAULT_CURRENT_PRICE: f64 = 63_179.71;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Loading,
    Ready,
}

/// Identifies one started load. Only the most recent ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// How a completed load was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    /// The load failed; the state is `Ready` with no dataset.
    Failed(ChartError),
    /// A newer load superseded this ticket; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    ticket: LoadTicket,
    range: TimeRange,
}

/// State machine behind the chart panel.
///
/// `Loading` always resolves to `Ready`, with or without a dataset. While a
/// comparison is shown the dataset carries a comparison series of the same
/// length as the base.
#[derive(Debug, Clone)]
pub struct ChartViewState {
    time_range: TimeRange,
    phase: LoadPhase,
    is_fullscreen: bool,
    show_comparison: bool,
    dataset: Option<Arc<Dataset>>,
    current_price: f64,
    pending: Option<PendingLoad>,
    next_ticket: u64,
    applied_loads: u64,
    last_error: Option<ChartError>,
}

impl Default for ChartViewState {
    fn default() -> Self {
        Self {
            time_range: TimeRange::default(),
            phase: LoadPhase::Loading,
            is_fullscreen: false,
            show_comparison: false,
            dataset: None,
            current_price: DEFAULT_CURRENT_PRICE,
            pending: None,
            next_ticket: 0,
            applied_loads: 0,
            last_error: None,
        }
    }
}

impl ChartViewState {
    /// Fresh `Loading` state; nothing is generated until the first load.
    pub fn new(time_range: TimeRange, current_price: f64) -> ChartResult<Self> {
        ensure_finite_price(current_price)?;
        Ok(Self {
            time_range,
            current_price,
            ..Self::default()
        })
    }

    /// Last committed range.
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Range of the in-flight load, or the committed range when idle.
    #[must_use]
    pub fn target_time_range(&self) -> TimeRange {
        self.pending.map_or(self.time_range, |pending| pending.range)
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub fn show_comparison(&self) -> bool {
        self.show_comparison
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&ChartError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<LoadTicket> {
        self.pending.map(|pending| pending.ticket)
    }

    /// Number of loads whose result was applied.
    #[must_use]
    pub fn applied_loads(&self) -> u64 {
        self.applied_loads
    }

    /// Selection handed to the renderer, `None` while loading or without data.
    #[must_use]
    pub fn rendered_selection(&self) -> Option<SeriesSelection<'_>> {
        if self.is_loading() {
            return None;
        }
        let dataset = self.dataset.as_deref()?;
        if self.show_comparison {
            SeriesSelection::comparison(dataset).ok()
        } else {
            Some(SeriesSelection::base(dataset))
        }
    }

    /// Switches range and regenerates synchronously through `pipeline`.
    ///
    /// Returns `Ok(false)` when `range` is already the target range. A failed
    /// generation is recovered into `Ready` without data and returned as
    /// `GenerationFailure`.
    pub fn set_time_range<S: SeriesSource, R: Rng>(
        &mut self,
        range: TimeRange,
        pipeline: &mut DatasetPipeline<S, R>,
    ) -> ChartResult<bool> {
        if range == self.target_time_range() && !self.is_first_load() {
            trace!(%range, "time range unchanged");
            return Ok(false);
        }
        self.load(range, pipeline).map(|()| true)
    }

    /// Regenerates the target range unconditionally. Used for the first load.
    pub fn reload<S: SeriesSource, R: Rng>(
        &mut self,
        pipeline: &mut DatasetPipeline<S, R>,
    ) -> ChartResult<()> {
        self.load(self.target_time_range(), pipeline)
    }

    fn load<S: SeriesSource, R: Rng>(
        &mut self,
        range: TimeRange,
        pipeline: &mut DatasetPipeline<S, R>,
    ) -> ChartResult<()> {
        let ticket = self.begin_load(range);
        let result = pipeline.produce(range);
        match self.complete_load(ticket, result) {
            LoadOutcome::Applied | LoadOutcome::Stale => Ok(()),
            LoadOutcome::Failed(err) => Err(err),
        }
    }

    /// Starts a load for `range` and supersedes any pending one.
    pub fn begin_load(&mut self, range: TimeRange) -> LoadTicket {
        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        if let Some(previous) = self.pending.replace(PendingLoad { ticket, range }) {
            debug!(
                superseded = previous.ticket.sequence(),
                ticket = ticket.sequence(),
                "pending load superseded"
            );
        }
        self.phase = LoadPhase::Loading;
        debug!(%range, ticket = ticket.sequence(), "load started");
        ticket
    }

    /// Resolves `ticket` with `result`. Results for superseded tickets are
    /// discarded.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: ChartResult<Dataset>) -> LoadOutcome {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket => pending,
            _ => {
                debug!(ticket = ticket.sequence(), "discarding stale load result");
                return LoadOutcome::Stale;
            }
        };
        self.pending = None;
        self.phase = LoadPhase::Ready;
        self.time_range = pending.range;

        match result.and_then(validate_dataset) {
            Ok(dataset) => {
                debug!(
                    range = %pending.range,
                    points = dataset.base.len(),
                    "load applied"
                );
                if !dataset.has_comparison() {
                    self.show_comparison = false;
                }
                self.dataset = Some(Arc::new(dataset));
                self.last_error = None;
                self.applied_loads += 1;
                LoadOutcome::Applied
            }
            Err(err) => {
                let err = err.into_generation_failure();
                error!(range = %pending.range, error = %err, "load failed");
                self.dataset = None;
                self.show_comparison = false;
                self.last_error = Some(err.clone());
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Flips comparison visibility and returns the new value.
    pub fn toggle_comparison(&mut self) -> ChartResult<bool> {
        let available = !self.is_loading()
            && self
                .dataset
                .as_ref()
                .is_some_and(|dataset| dataset.has_comparison());
        if !available {
            let err = ChartError::PreconditionFailed(
                "comparison requires a loaded dataset with a comparison series".to_owned(),
            );
            warn!(loading = self.is_loading(), error = %err, "toggle comparison rejected");
            self.last_error = Some(err.clone());
            return Err(err);
        }
        self.show_comparison = !self.show_comparison;
        self.last_error = None;
        debug!(show_comparison = self.show_comparison, "comparison toggled");
        Ok(self.show_comparison)
    }

    /// Updates the price indicator.
    pub fn tick(&mut self, price: f64) -> ChartResult<()> {
        ensure_finite_price(price)?;
        self.current_price = price;
        trace!(price, "price tick");
        Ok(())
    }

    /// Fullscreen status as confirmed by the controller.
    pub(crate) fn apply_fullscreen_change(&mut self, is_fullscreen: bool) {
        if self.is_fullscreen != is_fullscreen {
            debug!(is_fullscreen, "view fullscreen status updated");
        }
        self.is_fullscreen = is_fullscreen;
    }

    fn is_first_load(&self) -> bool {
        self.next_ticket == 0
    }
}

fn validate_dataset(dataset: Dataset) -> ChartResult<Dataset> {
    if dataset.base.is_empty() {
        return Err(ChartError::InvalidData("dataset base series is empty".to_owned()));
    }
    if let Some(comparison) = &dataset.comparison {
        if comparison.len() != dataset.base.len() {
            return Err(ChartError::InvalidData(format!(
                "comparison length {} does not match base length {}",
                comparison.len(),
                dataset.base.len()
            )));
        }
    }
    Ok(dataset)
}

fn ensure_finite_price(price: f64) -> ChartResult<()> {
    if !price.is_finite() {
        return Err(ChartError::InvalidInput(format!(
            "price must be finite, got {price}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ChartViewState, LoadPhase};

    #[test]
    fn initial_state_is_loading_without_data() {
        let state = ChartViewState::default();
        assert_eq!(state.phase(), LoadPhase::Loading);
        assert!(state.dataset().is_none());
        assert!(!state.show_comparison());
        assert!(state.rendered_selection().is_none());
    }

    #[test]
    fn non_finite_initial_price_is_rejected() {
        assert!(ChartViewState::new(Default::default(), f64::NAN).is_err());
    }
}
