use chart_panel::core::{
    ComparisonDeriver, DEFAULT_COMPARISON_FACTOR, Dataset, DatasetPipeline, GeneratorConfig,
    SeriesGenerator, TimeRange, Viewport,
};
use chart_panel::render::{
    ChartOptions, ChartRenderer, ChartRequest, CrosshairOverlay, DrawHook, FrameRenderer,
    NullRenderer, RenderFrame, SeriesSelection,
};

fn dataset() -> Dataset {
    let generator = SeriesGenerator::seeded(GeneratorConfig::default(), 21).expect("generator");
    let deriver = ComparisonDeriver::seeded(DEFAULT_COMPARISON_FACTOR, 22).expect("deriver");
    DatasetPipeline::new(generator, deriver, 50)
        .produce(TimeRange::OneWeek)
        .expect("dataset")
}

fn renderer() -> FrameRenderer<NullRenderer> {
    FrameRenderer::new(NullRenderer::default(), Viewport::new(840, 400)).expect("renderer")
}

fn category_x(renderer: &FrameRenderer<NullRenderer>, index: usize, count: usize) -> f64 {
    let bounds = renderer.axis_bounds().expect("bounds");
    bounds.left + (index as f64 + 0.5) * bounds.width() / count as f64
}

fn last_frame(renderer: &FrameRenderer<NullRenderer>) -> &RenderFrame {
    renderer.backend().last_frame().expect("frame rendered")
}

#[test]
fn base_draw_without_pointer_has_no_hover_and_no_guides() {
    let dataset = dataset();
    let options = ChartOptions::default();
    let overlay = CrosshairOverlay::default();
    let hooks: [&dyn DrawHook; 1] = [&overlay];
    let mut renderer = renderer();

    let report = renderer
        .draw(&ChartRequest::new(SeriesSelection::base(&dataset), &options, &hooks))
        .expect("draw");

    assert!(report.hover.is_none());
    assert_eq!(report.hooks_invoked, 1);
    let frame = last_frame(&renderer);
    assert_eq!(frame.rects.len(), 50);
    assert_eq!(frame.dashed_lines().count(), 0);
    assert!(frame.texts.is_empty());
    assert_eq!(renderer.backend().frames_rendered, 1);
}

#[test]
fn pointer_inside_plot_resolves_hover_before_hooks_run() {
    let dataset = dataset();
    let options = ChartOptions::default();
    let overlay = CrosshairOverlay::default();
    let hooks: [&dyn DrawHook; 1] = [&overlay];
    let mut renderer = renderer();
    let target_x = category_x(&renderer, 19, 50);

    renderer.pointer_move(target_x + 2.0, 200.0);
    let report = renderer
        .draw(&ChartRequest::new(SeriesSelection::base(&dataset), &options, &hooks))
        .expect("draw");

    let hover = report.hover.expect("hover");
    assert_eq!(hover.value_index, 19);
    assert!((hover.pixel_x - target_x).abs() <= 1e-9);

    let frame = last_frame(&renderer);
    let guides: Vec<_> = frame.dashed_lines().collect();
    assert_eq!(guides.len(), 2);
    assert!((guides[0].x1 - hover.pixel_x).abs() <= 1e-9);
    assert!((guides[1].y1 - hover.pixel_y).abs() <= 1e-9);

    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts[0], "20");
    assert!(texts[1].starts_with("Price (USD): $"));
    assert!(texts[2].starts_with("Volume: "));
}

#[test]
fn pointer_leave_clears_hover() {
    let dataset = dataset();
    let options = ChartOptions::default();
    let overlay = CrosshairOverlay::default();
    let hooks: [&dyn DrawHook; 1] = [&overlay];
    let mut renderer = renderer();

    renderer.pointer_move(400.0, 200.0);
    renderer.pointer_leave();
    let report = renderer
        .draw(&ChartRequest::new(SeriesSelection::base(&dataset), &options, &hooks))
        .expect("draw");

    assert!(report.hover.is_none());
    assert_eq!(last_frame(&renderer).dashed_lines().count(), 0);
}

#[test]
fn pointer_outside_plot_does_not_hover() {
    let dataset = dataset();
    let options = ChartOptions::default();
    let mut renderer = renderer();

    renderer.pointer_move(2.0, 2.0);
    let report = renderer
        .draw(&ChartRequest::new(SeriesSelection::base(&dataset), &options, &[]))
        .expect("draw");
    assert!(report.hover.is_none());
    assert_eq!(report.hooks_invoked, 0);
}

#[test]
fn comparison_selection_adds_series_and_legend() {
    let dataset = dataset();
    let base_options = ChartOptions::default();
    let mut renderer = renderer();
    renderer
        .draw(&ChartRequest::new(SeriesSelection::base(&dataset), &base_options, &[]))
        .expect("draw");
    let base_lines = last_frame(&renderer).lines.len();

    let options = ChartOptions::default().for_comparison(true);
    let selection = SeriesSelection::comparison(&dataset).expect("comparison available");
    renderer
        .draw(&ChartRequest::new(selection, &options, &[]))
        .expect("draw");

    let frame = last_frame(&renderer);
    assert_eq!(frame.lines.len(), base_lines + 49);
    let legend: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(legend, ["Price (USD)", "Volume", "Comparison Price (USD)"]);
}

#[test]
fn volume_bars_stay_in_the_lower_half_with_the_default_axis_max() {
    let dataset = dataset();
    let options = ChartOptions::default();
    let mut renderer = renderer();
    renderer
        .draw(&ChartRequest::new(SeriesSelection::base(&dataset), &options, &[]))
        .expect("draw");

    let bounds = renderer.axis_bounds().expect("bounds");
    let midline = bounds.top + bounds.height() / 2.0;
    for rect in &last_frame(&renderer).rects {
        assert!(rect.y > midline);
        assert!((rect.y + rect.height - bounds.bottom).abs() <= 1e-9);
        assert_eq!(rect.width, 10.0);
    }
}

#[test]
fn resize_rejects_degenerate_viewports() {
    let mut renderer = renderer();
    assert!(renderer.resize(Viewport::new(0, 400)).is_err());
    assert!(renderer.resize(Viewport::new(15, 15)).is_err());
    assert_eq!(renderer.viewport(), Viewport::new(840, 400));
    renderer.resize(Viewport::new(1280, 720)).expect("resize");
    assert_eq!(renderer.viewport(), Viewport::new(1280, 720));
}

#[test]
fn comparison_selection_requires_comparison_data() {
    let mut dataset = dataset();
    dataset.comparison = None;
    assert!(SeriesSelection::comparison(&dataset).is_err());
}
