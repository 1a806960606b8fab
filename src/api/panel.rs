use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{
    ChartViewState, FullscreenController, Padding, PanelConfig, PanelSnapshot, SubscriptionId,
};
use crate::core::{
    ComparisonDeriver, DatasetPipeline, SeriesGenerator, SeriesSource, TimeRange,
};
use crate::error::ChartResult;
use crate::platform::{FullscreenPlatform, HeadlessFullscreenPlatform};
use crate::render::{
    ChartOptions, ChartRenderer, ChartRequest, CrosshairOverlay, DrawHook, DrawReport,
    FrameRenderer, NullRenderer, SelectionKind,
};

pub const NO_DATA_MESSAGE: &str = "No data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FullscreenIcon {
    Expand,
    Compress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FullscreenButton {
    pub label: &'static str,
    pub icon: FullscreenIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompareButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeButton {
    pub range: TimeRange,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlBar {
    pub fullscreen: FullscreenButton,
    pub compare: CompareButton,
    pub ranges: Vec<RangeButton>,
}

impl ControlBar {
    #[must_use]
    pub fn active_range(&self) -> Option<TimeRange> {
        self.ranges
            .iter()
            .find(|button| button.active)
            .map(|button| button.range)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartBody {
    Loading,
    NoData { message: &'static str },
    Chart { selection: SelectionKind, points: usize },
}

/// Host-facing description of what the panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    pub controls: ControlBar,
    pub body: ChartBody,
    /// `$63179.71`-style label, hidden while loading.
    pub price_indicator: Option<String>,
    pub padding: Padding,
}

/// Composition root: view state, dataset pipeline, renderer and fullscreen
/// controller for one mounted chart panel.
///
/// Fullscreen listeners live as long as the panel; dropping it unsubscribes
/// them.
pub struct ChartPanel<C, P, S, R = StdRng>
where
    C: ChartRenderer,
    P: FullscreenPlatform,
    S: SeriesSource,
    R: Rng,
{
    config: PanelConfig,
    state: Rc<RefCell<ChartViewState>>,
    controller: FullscreenController<P>,
    subscription: Option<SubscriptionId>,
    pipeline: DatasetPipeline<S, R>,
    renderer: C,
    overlay: CrosshairOverlay,
    options: ChartOptions,
}

impl ChartPanel<FrameRenderer<NullRenderer>, HeadlessFullscreenPlatform, SeriesGenerator, StdRng> {
    /// Deterministic panel without a drawing surface or window.
    pub fn headless(config: PanelConfig, seed: u64) -> ChartResult<Self> {
        let config = config.validate()?;
        let renderer = FrameRenderer::new(NullRenderer::default(), config.container)?;
        let generator = SeriesGenerator::seeded(config.generator, seed)?;
        let deriver = ComparisonDeriver::seeded(config.comparison_factor, seed.wrapping_add(1))?;
        let pipeline = DatasetPipeline::new(generator, deriver, config.point_count);
        Self::mount(config, renderer, HeadlessFullscreenPlatform::new(), pipeline)
    }
}

impl<C, P, S> ChartPanel<C, P, S, StdRng>
where
    C: ChartRenderer,
    P: FullscreenPlatform,
    S: SeriesSource,
{
    /// Mounts with an entropy-seeded comparison deriver.
    pub fn mount_with_source(
        config: PanelConfig,
        renderer: C,
        platform: P,
        source: S,
    ) -> ChartResult<Self> {
        let deriver = ComparisonDeriver::new(config.comparison_factor)?;
        let pipeline = DatasetPipeline::new(source, deriver, config.point_count);
        Self::mount(config, renderer, platform, pipeline)
    }
}

impl<C, P, S, R> ChartPanel<C, P, S, R>
where
    C: ChartRenderer,
    P: FullscreenPlatform,
    S: SeriesSource,
    R: Rng,
{
    /// Subscribes to fullscreen changes and runs the first load.
    ///
    /// A failed first load does not fail the mount; the panel shows the
    /// no-data body and records the error.
    pub fn mount(
        config: PanelConfig,
        renderer: C,
        platform: P,
        pipeline: DatasetPipeline<S, R>,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let overlay = CrosshairOverlay::new(config.crosshair)?;
        let options = ChartOptions::default().with_volume_axis_max(config.volume_axis_max);
        let state = Rc::new(RefCell::new(ChartViewState::new(
            config.default_time_range,
            config.initial_price,
        )?));

        let mut controller = FullscreenController::new(platform);
        controller.attach();
        let weak_state = Rc::downgrade(&state);
        let subscription = controller.on_change(move |is_fullscreen| {
            if let Some(state) = weak_state.upgrade() {
                state.borrow_mut().apply_fullscreen_change(is_fullscreen);
            }
        });
        state
            .borrow_mut()
            .apply_fullscreen_change(controller.is_fullscreen());

        let mut panel = Self {
            config,
            state,
            controller,
            subscription: Some(subscription),
            pipeline,
            renderer,
            overlay,
            options,
        };

        let initial = panel.state.borrow_mut().reload(&mut panel.pipeline);
        if let Err(err) = initial {
            warn!(error = %err, "initial load failed; panel mounted without data");
        }
        debug!(range = %panel.state().time_range(), "chart panel mounted");
        Ok(panel)
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> Ref<'_, ChartViewState> {
        self.state.borrow()
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn renderer(&self) -> &C {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut C {
        &mut self.renderer
    }

    #[must_use]
    pub fn controller(&self) -> &FullscreenController<P> {
        &self.controller
    }

    /// Platform access for hosts that pump platform events.
    pub fn platform_mut(&mut self) -> &mut P {
        self.controller.platform_mut()
    }

    pub fn pipeline_mut(&mut self) -> &mut DatasetPipeline<S, R> {
        &mut self.pipeline
    }

    pub fn set_time_range(&mut self, range: TimeRange) -> ChartResult<bool> {
        self.state
            .borrow_mut()
            .set_time_range(range, &mut self.pipeline)
    }

    pub fn toggle_comparison(&mut self) -> ChartResult<bool> {
        self.state.borrow_mut().toggle_comparison()
    }

    pub fn tick(&mut self, price: f64) -> ChartResult<()> {
        self.state.borrow_mut().tick(price)
    }

    pub fn request_fullscreen(&mut self) -> ChartResult<()> {
        self.controller.enter()
    }

    pub fn exit_fullscreen(&mut self) -> ChartResult<()> {
        self.controller.exit()
    }

    pub fn toggle_fullscreen(&mut self) -> ChartResult<()> {
        self.controller.toggle()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.renderer.pointer_move(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.renderer.pointer_leave();
    }

    /// Draws the rendered selection. Returns `Ok(None)` when there is nothing
    /// to draw (loading or no data).
    pub fn draw(&mut self) -> ChartResult<Option<DrawReport>> {
        let state = self.state.borrow();
        let Some(selection) = state.rendered_selection() else {
            return Ok(None);
        };
        let options = self.options.for_comparison(state.show_comparison());
        let hooks: [&dyn DrawHook; 1] = [&self.overlay];
        let request = ChartRequest::new(selection, &options, &hooks);
        self.renderer.draw(&request).map(Some)
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        let state = self.state.borrow();
        let is_fullscreen = state.is_fullscreen();
        let target = state.target_time_range();

        let controls = ControlBar {
            fullscreen: FullscreenButton {
                label: "Fullscreen",
                icon: if is_fullscreen {
                    FullscreenIcon::Compress
                } else {
                    FullscreenIcon::Expand
                },
            },
            compare: CompareButton {
                label: if state.show_comparison() {
                    "Hide Comparison"
                } else {
                    "Compare"
                },
                enabled: !state.is_loading()
                    && state.dataset().is_some_and(|dataset| dataset.has_comparison()),
            },
            ranges: TimeRange::ALL
                .into_iter()
                .map(|range| RangeButton {
                    range,
                    label: range.label(),
                    active: range == target,
                })
                .collect(),
        };

        let body = if state.is_loading() {
            ChartBody::Loading
        } else {
            match state.rendered_selection() {
                Some(selection) => ChartBody::Chart {
                    selection: selection.kind(),
                    points: selection.category_count(),
                },
                None => ChartBody::NoData {
                    message: NO_DATA_MESSAGE,
                },
            }
        };

        PanelView {
            controls,
            body,
            price_indicator: (!state.is_loading())
                .then(|| format!("${:.2}", state.current_price())),
            padding: if is_fullscreen {
                self.config.fullscreen_padding
            } else {
                Padding::ZERO
            },
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PanelSnapshot {
        PanelSnapshot::capture(&self.state.borrow())
    }

    /// Explicit unmount; equivalent to dropping the panel.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<C, P, S, R> Drop for ChartPanel<C, P, S, R>
where
    C: ChartRenderer,
    P: FullscreenPlatform,
    S: SeriesSource,
    R: Rng,
{
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.controller.unsubscribe(id);
        }
        self.controller.detach();
        debug!("chart panel unmounted");
    }
}
