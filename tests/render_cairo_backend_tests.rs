#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_panel::ChartError;
use chart_panel::api::{ChartPanel, PanelConfig};
use chart_panel::core::{GeneratorConfig, SeriesGenerator, Viewport};
use chart_panel::platform::HeadlessFullscreenPlatform;
use chart_panel::render::{
    CairoContextRenderer, CairoRenderer, Color, FrameRenderer, LinePrimitive, LineStrokeStyle,
    RenderFrame,
};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn hovered_panel_draw_strokes_dashed_crosshair() {
    let backend = CairoRenderer::new(840, 400).expect("backend");
    let renderer = FrameRenderer::new(backend, Viewport::new(840, 400)).expect("renderer");
    let generator = SeriesGenerator::seeded(GeneratorConfig::default(), 5).expect("generator");
    let mut panel = ChartPanel::mount_with_source(
        PanelConfig::default(),
        renderer,
        HeadlessFullscreenPlatform::new(),
        generator,
    )
    .expect("panel");

    panel.pointer_move(420.0, 200.0);
    panel.draw().expect("draw").expect("chart drawn");

    let stats = panel.renderer().backend().last_stats();
    assert_eq!(stats.dashed_lines_drawn, 2);
    assert_eq!(stats.rects_drawn, 50);
    assert!(stats.lines_drawn >= 50 + 49 + 2);
    assert_eq!(stats.texts_drawn, 3);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut renderer = CairoRenderer::new(600, 320).expect("renderer");
    let frame = RenderFrame::new(Viewport::new(600, 320))
        .with_line(LinePrimitive::new(
            10.0,
            10.0,
            590.0,
            310.0,
            1.0,
            Color::rgb(0.0, 0.0, 0.0),
        ))
        .with_line(
            LinePrimitive::new(300.0, 0.0, 300.0, 320.0, 1.0, Color::rgba(0.0, 0.0, 0.0, 0.2))
                .with_stroke_style(LineStrokeStyle::Dashed {
                    dash_px: 5.0,
                    gap_px: 5.0,
                }),
        );

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, 2);
    assert_eq!(stats.dashed_lines_drawn, 1);
}
