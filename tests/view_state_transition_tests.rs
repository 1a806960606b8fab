use std::sync::Arc;

use chart_panel::api::{ChartViewState, DEFAULT_CURRENT_PRICE, LoadOutcome, LoadPhase};
use chart_panel::core::{
    ComparisonDeriver, DEFAULT_COMPARISON_FACTOR, Dataset, DatasetPipeline, GeneratorConfig, Series,
    SeriesGenerator, SeriesSource, TimeRange,
};
use chart_panel::error::{ChartError, ChartResult};
use chart_panel::render::SelectionKind;

struct FlakySource {
    inner: SeriesGenerator,
    fail: bool,
}

impl SeriesSource for FlakySource {
    fn generate(&mut self, range: TimeRange, point_count: usize) -> ChartResult<Series> {
        if self.fail {
            return Err(ChartError::InvalidData("feed offline".to_owned()));
        }
        self.inner.generate(range, point_count)
    }
}

fn pipeline(seed: u64) -> DatasetPipeline<FlakySource> {
    let source = FlakySource {
        inner: SeriesGenerator::seeded(GeneratorConfig::default(), seed).expect("generator"),
        fail: false,
    };
    let deriver = ComparisonDeriver::seeded(DEFAULT_COMPARISON_FACTOR, seed + 1).expect("deriver");
    DatasetPipeline::new(source, deriver, 50)
}

fn loaded_state(pipeline: &mut DatasetPipeline<FlakySource>) -> ChartViewState {
    let mut state = ChartViewState::default();
    state.reload(pipeline).expect("initial load");
    state
}

#[test]
fn initial_load_reaches_ready_with_paired_series() {
    let mut pipeline = pipeline(1);
    let mut state = ChartViewState::default();
    assert_eq!(state.phase(), LoadPhase::Loading);
    assert_eq!(state.current_price(), DEFAULT_CURRENT_PRICE);

    state.reload(&mut pipeline).expect("initial load");

    assert_eq!(state.phase(), LoadPhase::Ready);
    assert_eq!(state.time_range(), TimeRange::OneWeek);
    let dataset = state.dataset().expect("dataset");
    assert_eq!(dataset.base.len(), 50);
    assert_eq!(dataset.comparison.as_ref().map(|series| series.len()), Some(50));
    assert!(state.last_error().is_none());
}

#[test]
fn every_range_switch_regenerates_both_series() {
    let mut pipeline = pipeline(2);
    let mut state = loaded_state(&mut pipeline);

    for range in TimeRange::ALL {
        if range == state.time_range() {
            continue;
        }
        let previous = Arc::clone(state.dataset().expect("dataset"));
        assert!(state.set_time_range(range, &mut pipeline).expect("switch"));
        assert_eq!(state.time_range(), range);
        assert_eq!(state.phase(), LoadPhase::Ready);

        let dataset = state.dataset().expect("dataset");
        assert!(!Arc::ptr_eq(&previous, dataset));
        assert_eq!(dataset.base.len(), 50);
        assert_eq!(dataset.comparison.as_ref().map(|series| series.len()), Some(50));
    }
}

#[test]
fn selecting_the_current_range_is_a_no_op() {
    let mut pipeline = pipeline(3);
    let mut state = loaded_state(&mut pipeline);
    let before = Arc::clone(state.dataset().expect("dataset"));
    let loads = state.applied_loads();

    assert!(!state.set_time_range(TimeRange::OneWeek, &mut pipeline).expect("no-op"));

    assert!(Arc::ptr_eq(&before, state.dataset().expect("dataset")));
    assert_eq!(state.applied_loads(), loads);
    assert_eq!(state.phase(), LoadPhase::Ready);
}

#[test]
fn toggle_without_dataset_is_rejected_and_recorded() {
    let mut state = ChartViewState::default();
    let err = state.toggle_comparison().expect_err("no dataset");

    assert!(matches!(err, ChartError::PreconditionFailed(_)));
    assert!(!state.show_comparison());
    assert_eq!(state.last_error(), Some(&err));
}

#[test]
fn toggle_while_loading_is_rejected() {
    let mut pipeline = pipeline(4);
    let mut state = loaded_state(&mut pipeline);
    state.begin_load(TimeRange::OneYear);

    assert!(matches!(
        state.toggle_comparison(),
        Err(ChartError::PreconditionFailed(_))
    ));
    assert!(!state.show_comparison());
}

#[test]
fn two_toggles_restore_visibility_and_switch_the_selection() {
    let mut pipeline = pipeline(5);
    let mut state = loaded_state(&mut pipeline);

    assert!(state.toggle_comparison().expect("show"));
    assert_eq!(
        state.rendered_selection().map(|selection| selection.kind()),
        Some(SelectionKind::Comparison)
    );

    assert!(!state.toggle_comparison().expect("hide"));
    assert_eq!(
        state.rendered_selection().map(|selection| selection.kind()),
        Some(SelectionKind::Base)
    );
}

#[test]
fn base_only_load_turns_the_comparison_off() {
    let mut pipeline = pipeline(12);
    let mut state = loaded_state(&mut pipeline);
    assert!(state.toggle_comparison().expect("show"));

    let base = pipeline
        .source_mut()
        .generate(TimeRange::OneDay, 50)
        .expect("base");
    let ticket = state.begin_load(TimeRange::OneDay);
    let outcome = state.complete_load(ticket, Ok(Dataset::new(base, None)));

    assert!(matches!(outcome, LoadOutcome::Applied));
    assert!(!state.show_comparison());
    assert_eq!(
        state.rendered_selection().map(|selection| selection.kind()),
        Some(SelectionKind::Base)
    );
    assert!(matches!(
        state.toggle_comparison(),
        Err(ChartError::PreconditionFailed(_))
    ));
}

#[test]
fn successful_toggle_clears_an_earlier_rejection() {
    let mut pipeline = pipeline(13);
    let mut state = loaded_state(&mut pipeline);
    let ticket = state.begin_load(TimeRange::SixMonths);
    assert!(state.toggle_comparison().is_err());
    assert!(matches!(
        state.last_error(),
        Some(ChartError::PreconditionFailed(_))
    ));

    let dataset = pipeline.produce(TimeRange::SixMonths).expect("dataset");
    state.complete_load(ticket, Ok(dataset));
    assert!(state.toggle_comparison().expect("show"));
    assert!(state.last_error().is_none());
}

#[test]
fn comparison_visibility_survives_a_range_switch() {
    let mut pipeline = pipeline(6);
    let mut state = loaded_state(&mut pipeline);
    state.toggle_comparison().expect("show");

    state.set_time_range(TimeRange::ThreeDays, &mut pipeline).expect("switch");

    assert!(state.show_comparison());
    assert_eq!(
        state.rendered_selection().map(|selection| selection.kind()),
        Some(SelectionKind::Comparison)
    );
}

#[test]
fn generation_failure_resolves_to_ready_without_data() {
    let mut pipeline = pipeline(7);
    let mut state = loaded_state(&mut pipeline);
    state.toggle_comparison().expect("show");
    pipeline.source_mut().fail = true;

    let err = state
        .set_time_range(TimeRange::OneDay, &mut pipeline)
        .expect_err("generation fails");

    assert!(matches!(err, ChartError::GenerationFailure(_)));
    assert_eq!(state.phase(), LoadPhase::Ready);
    assert_eq!(state.time_range(), TimeRange::OneDay);
    assert!(state.dataset().is_none());
    assert!(!state.show_comparison());
    assert_eq!(state.last_error(), Some(&err));
    assert!(state.rendered_selection().is_none());
}

#[test]
fn a_later_successful_load_clears_the_error() {
    let mut pipeline = pipeline(8);
    let mut state = loaded_state(&mut pipeline);
    pipeline.source_mut().fail = true;
    let _ = state.set_time_range(TimeRange::OneDay, &mut pipeline);
    pipeline.source_mut().fail = false;

    assert!(state.set_time_range(TimeRange::OneMonth, &mut pipeline).expect("recovered"));
    assert!(state.last_error().is_none());
    assert!(state.dataset().is_some());
}

#[test]
fn tick_updates_price_and_rejects_non_finite_values() {
    let mut state = ChartViewState::default();
    state.tick(64_000.5).expect("tick");
    assert_eq!(state.current_price(), 64_000.5);

    assert!(matches!(state.tick(f64::NAN), Err(ChartError::InvalidInput(_))));
    assert!(matches!(state.tick(f64::INFINITY), Err(ChartError::InvalidInput(_))));
    assert_eq!(state.current_price(), 64_000.5);
}
