use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisBounds, LinearScale, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverPoint, PointerState, resolve_index_hover};
use crate::render::{
    ChartOptions, ChartRenderer, ChartRequest, Color, DatasetKind, DrawReport, LinePrimitive,
    RectPrimitive, RenderFrame, Renderer, SeriesSelection, TextHAlign, TextPrimitive,
};

/// Colors and sizes used when turning a request into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub price_color: Color,
    pub comparison_color: Color,
    pub volume_color: Color,
    pub border_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub series_line_width: f64,
    pub volume_bar_thickness_px: f64,
    pub plot_margin_px: f64,
    pub font_size_px: f64,
    /// Fraction of the price span added above and below the data.
    pub price_padding_ratio: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            price_color: Color::rgba8(0x4B, 0x40, 0xEE, 1.0),
            comparison_color: Color::rgba8(0x34, 0xA8, 0x53, 1.0),
            volume_color: Color::rgba8(0xE6, 0xE8, 0xEB, 1.0),
            border_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            grid_color: Color::rgba(0.0, 0.0, 0.0, 0.05),
            text_color: Color::rgba8(0x6F, 0x71, 0x77, 1.0),
            series_line_width: 2.0,
            volume_bar_thickness_px: 10.0,
            plot_margin_px: 10.0,
            font_size_px: 12.0,
            price_padding_ratio: 0.05,
        }
    }
}

impl FrameStyle {
    fn color_for(&self, kind: DatasetKind) -> Color {
        match kind {
            DatasetKind::Price => self.price_color,
            DatasetKind::Volume => self.volume_color,
            DatasetKind::ComparisonPrice => self.comparison_color,
        }
    }
}

/// Reference [`ChartRenderer`] that projects a request into a [`RenderFrame`]
/// and hands it to a backend [`Renderer`].
#[derive(Debug)]
pub struct FrameRenderer<B: Renderer> {
    backend: B,
    viewport: Viewport,
    style: FrameStyle,
    pointer: PointerState,
}

impl<B: Renderer> FrameRenderer<B> {
    pub fn new(backend: B, viewport: Viewport) -> ChartResult<Self> {
        Self::with_style(backend, viewport, FrameStyle::default())
    }

    pub fn with_style(backend: B, viewport: Viewport, style: FrameStyle) -> ChartResult<Self> {
        let renderer = Self {
            backend,
            viewport: viewport.validate()?,
            style,
            pointer: PointerState::default(),
        };
        renderer.axis_bounds()?;
        Ok(renderer)
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let previous = self.viewport;
        self.viewport = viewport.validate()?;
        if let Err(err) = self.axis_bounds() {
            self.viewport = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn axis_bounds(&self) -> ChartResult<AxisBounds> {
        AxisBounds::inset(
            self.viewport,
            self.style.plot_margin_px,
            self.style.plot_margin_px,
        )
    }

    fn build_frame(
        &self,
        request: &ChartRequest<'_>,
        bounds: AxisBounds,
    ) -> ChartResult<(RenderFrame, Option<HoverPoint>)> {
        let selection = request.selection;
        let options = request.options;
        let mut frame = RenderFrame::new(self.viewport);

        let count = selection.category_count();
        let step = bounds.width() / count.max(1) as f64;
        let category_x = |index: usize| bounds.left + (index as f64 + 0.5) * step;

        if options.axes.category.show_grid {
            for index in 0..count {
                let x = category_x(index);
                frame.lines.push(LinePrimitive::new(
                    x,
                    bounds.top,
                    x,
                    bounds.bottom,
                    1.0,
                    self.style.grid_color,
                ));
            }
        }

        let volume_scale = volume_scale(selection, options, bounds)?;
        let half_bar = self.style.volume_bar_thickness_px / 2.0;
        for (index, volume) in selection.values(DatasetKind::Volume).into_iter().enumerate() {
            let y = volume_scale.to_pixel(volume)?.clamp(bounds.top, bounds.bottom);
            frame.rects.push(RectPrimitive::new(
                category_x(index) - half_bar,
                y,
                self.style.volume_bar_thickness_px,
                bounds.bottom - y,
                self.style.volume_color,
            ));
        }

        let price_scale = price_scale(selection, bounds, self.style.price_padding_ratio)?;
        let mut first_price_points = Vec::with_capacity(count);
        for kind in selection.datasets().into_iter().filter(|kind| kind.is_price()) {
            let mut projected = Vec::with_capacity(count);
            for (index, price) in selection.values(kind).into_iter().enumerate() {
                projected.push((category_x(index), price_scale.to_pixel(price)?));
            }
            for pair in projected.windows(2) {
                frame.lines.push(LinePrimitive::new(
                    pair[0].0,
                    pair[0].1,
                    pair[1].0,
                    pair[1].1,
                    self.style.series_line_width,
                    self.style.color_for(kind),
                ));
            }
            if kind == DatasetKind::Price {
                first_price_points = projected;
            }
        }

        self.push_axis_borders(&mut frame, options, bounds);

        if options.legend.display {
            self.push_legend(&mut frame, selection, bounds);
        }

        let hover = resolve_index_hover(
            self.pointer.position(),
            bounds,
            &first_price_points,
            options.interaction.mode,
            options.interaction.intersect,
        );
        if let (Some(hover), true) = (hover, options.tooltip.enabled) {
            self.push_tooltip(&mut frame, request, hover);
        }

        Ok((frame, hover))
    }

    fn push_axis_borders(&self, frame: &mut RenderFrame, options: &ChartOptions, bounds: AxisBounds) {
        let color = self.style.border_color;
        if options.axes.price.display && options.axes.price.show_border {
            frame.lines.push(LinePrimitive::new(
                bounds.left,
                bounds.top,
                bounds.left,
                bounds.bottom,
                1.0,
                color,
            ));
        }
        if options.axes.volume.display && options.axes.volume.show_border {
            frame.lines.push(LinePrimitive::new(
                bounds.right,
                bounds.top,
                bounds.right,
                bounds.bottom,
                1.0,
                color,
            ));
        }
        if options.axes.category.display && options.axes.category.show_border {
            frame.lines.push(LinePrimitive::new(
                bounds.left,
                bounds.bottom,
                bounds.right,
                bounds.bottom,
                1.0,
                color,
            ));
        }
    }

    fn push_legend(&self, frame: &mut RenderFrame, selection: SeriesSelection<'_>, bounds: AxisBounds) {
        let kinds = selection.datasets();
        let slot = bounds.width() / kinds.len() as f64;
        for (position, kind) in kinds.into_iter().enumerate() {
            frame.texts.push(TextPrimitive::new(
                kind.label(),
                bounds.left + (position as f64 + 0.5) * slot,
                bounds.top,
                self.style.font_size_px,
                self.style.color_for(kind).with_alpha(1.0),
                TextHAlign::Center,
            ));
        }
    }

    fn push_tooltip(&self, frame: &mut RenderFrame, request: &ChartRequest<'_>, hover: HoverPoint) {
        let selection = request.selection;
        let line_height = self.style.font_size_px * 1.4;
        let x = hover.pixel_x + 8.0;
        let mut y = hover.pixel_y;

        if let Some(label) = selection.label_at(hover.value_index) {
            frame.texts.push(TextPrimitive::new(
                label.to_string(),
                x,
                y,
                self.style.font_size_px,
                self.style.text_color,
                TextHAlign::Left,
            ));
            y += line_height;
        }

        for kind in selection.datasets() {
            let Some(value) = selection.values(kind).get(hover.value_index).copied() else {
                continue;
            };
            frame.texts.push(TextPrimitive::new(
                request.options.tooltip_label(kind, value),
                x,
                y,
                self.style.font_size_px,
                self.style.text_color,
                TextHAlign::Left,
            ));
            y += line_height;
        }
    }
}

impl<B: Renderer> ChartRenderer for FrameRenderer<B> {
    fn draw(&mut self, request: &ChartRequest<'_>) -> ChartResult<DrawReport> {
        let bounds = self.axis_bounds()?;
        let (mut frame, hover) = self.build_frame(request, bounds)?;

        for hook in request.draw_hooks {
            frame.extend_lines(hook.after_draw(hover, bounds));
        }

        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            hovered = hover.map(|point| point.value_index),
            "draw pass"
        );
        self.backend.render(&frame)?;

        Ok(DrawReport {
            hover,
            hooks_invoked: request.draw_hooks.len(),
        })
    }

    fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.on_pointer_move(x, y);
    }

    fn pointer_leave(&mut self) {
        self.pointer.on_pointer_leave();
    }
}

fn price_scale(
    selection: SeriesSelection<'_>,
    bounds: AxisBounds,
    padding_ratio: f64,
) -> ChartResult<LinearScale> {
    let prices: Vec<OrderedFloat<f64>> = selection
        .datasets()
        .into_iter()
        .filter(|kind| kind.is_price())
        .flat_map(|kind| selection.values(kind))
        .filter(|price| price.is_finite())
        .map(OrderedFloat)
        .collect();

    let (min, max) = match (prices.iter().min(), prices.iter().max()) {
        (Some(min), Some(max)) => (min.into_inner(), max.into_inner()),
        _ => (0.0, 1.0),
    };
    let span = max - min;
    let (min, max) = if span <= 0.0 {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * padding_ratio, max + span * padding_ratio)
    };
    LinearScale::new(min, max, bounds.bottom, bounds.top)
}

fn volume_scale(
    selection: SeriesSelection<'_>,
    options: &ChartOptions,
    bounds: AxisBounds,
) -> ChartResult<LinearScale> {
    let volumes = selection.values(DatasetKind::Volume);
    let data_max = volumes
        .iter()
        .copied()
        .map(OrderedFloat)
        .max()
        .map_or(1.0, OrderedFloat::into_inner);
    let min = options.axes.volume.min.unwrap_or(0.0);
    let max = options.axes.volume.max.unwrap_or(data_max);
    if max <= min {
        return Err(ChartError::InvalidData(
            "volume axis max must be greater than min".to_owned(),
        ));
    }
    LinearScale::new(min, max, bounds.bottom, bounds.top)
}
