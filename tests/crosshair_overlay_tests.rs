use chart_panel::core::AxisBounds;
use chart_panel::interaction::HoverPoint;
use chart_panel::render::{
    Color, CrosshairOverlay, CrosshairStyle, DrawHook, LineStrokeStyle, crosshair_lines,
};

const BOUNDS: AxisBounds = AxisBounds::new(10.0, 830.0, 10.0, 390.0);

fn hover() -> HoverPoint {
    HoverPoint {
        pixel_x: 250.0,
        pixel_y: 140.0,
        value_index: 14,
    }
}

#[test]
fn hovered_point_produces_vertical_then_horizontal_guide() {
    let lines = crosshair_lines(Some(hover()), BOUNDS, CrosshairStyle::default());
    assert_eq!(lines.len(), 2);

    let vertical = lines[0];
    assert!(vertical.is_vertical());
    assert_eq!((vertical.x1, vertical.x2), (250.0, 250.0));
    assert_eq!((vertical.y1, vertical.y2), (BOUNDS.top, BOUNDS.bottom));

    let horizontal = lines[1];
    assert!(horizontal.is_horizontal());
    assert_eq!((horizontal.y1, horizontal.y2), (140.0, 140.0));
    assert_eq!((horizontal.x1, horizontal.x2), (BOUNDS.left, BOUNDS.right));
}

#[test]
fn default_style_is_thin_translucent_and_dashed() {
    for line in crosshair_lines(Some(hover()), BOUNDS, CrosshairStyle::default()) {
        assert_eq!(line.stroke_width, 1.0);
        assert_eq!(line.color, Color::rgba(0.0, 0.0, 0.0, 0.2));
        assert_eq!(
            line.stroke_style,
            LineStrokeStyle::Dashed {
                dash_px: 5.0,
                gap_px: 5.0
            }
        );
        assert_eq!(line.stroke_style.dash_pattern(), Some([5.0, 5.0]));
    }
}

#[test]
fn absent_hover_draws_nothing() {
    assert!(crosshair_lines(None, BOUNDS, CrosshairStyle::default()).is_empty());
}

#[test]
fn overlay_hook_is_a_pure_function_of_its_inputs() {
    let overlay = CrosshairOverlay::default();
    assert_eq!(overlay.id(), "crosshair");

    let first = overlay.after_draw(Some(hover()), BOUNDS);
    let second = overlay.after_draw(Some(hover()), BOUNDS);
    assert_eq!(first, second);
    assert!(overlay.after_draw(None, BOUNDS).is_empty());
    assert_eq!(overlay.after_draw(Some(hover()), BOUNDS).len(), 2);
}

#[test]
fn custom_style_is_applied_and_validated() {
    let style = CrosshairStyle {
        color: Color::rgba(1.0, 0.0, 0.0, 0.5),
        stroke_width: 2.0,
        dash_px: 3.0,
        gap_px: 1.0,
    };
    let overlay = CrosshairOverlay::new(style).expect("valid style");
    let lines = overlay.after_draw(Some(hover()), BOUNDS);
    assert!(lines.iter().all(|line| line.stroke_width == 2.0));
    assert!(lines.iter().all(|line| line.stroke_style.dash_pattern() == Some([3.0, 1.0])));

    let invalid = CrosshairStyle {
        dash_px: 0.0,
        ..CrosshairStyle::default()
    };
    assert!(CrosshairOverlay::new(invalid).is_err());
    let invalid = CrosshairStyle {
        stroke_width: -1.0,
        ..CrosshairStyle::default()
    };
    assert!(CrosshairOverlay::new(invalid).is_err());
}
