use pixel_paint::raster::{scanline_fill, DistanceMetric, FillParams};
use pixel_paint::{
    Canvas, Color, EditorContext, EditorSettings, OptionValue, PixelBuffer, Point, Rect, ToolKind,
};

fn params(color: Color, threshold: f32) -> FillParams {
    FillParams {
        color,
        threshold,
        metric: DistanceMetric::Squared,
    }
}

/// 4x4 white with a red 2x2 block in the top-left corner
fn red_corner() -> PixelBuffer {
    let mut buffer = PixelBuffer::new(4, 4, Color::WHITE);
    for point in Rect::new(0, 0, 2, 2).points() {
        buffer.set(point, Color::RED).unwrap();
    }
    buffer
}

#[test]
fn test_red_corner_becomes_blue() {
    let mut context = EditorContext::new(EditorSettings::default());
    let id = context.add_canvas(Canvas::from_buffer("corner", red_corner(), 25));

    context.set_active_tool(ToolKind::Fill);
    context.set_tool_option("palette_colour", OptionValue::Colour(Color::BLUE)).unwrap();
    context.set_tool_option("opacity", OptionValue::Integer(255)).unwrap();
    context.set_tool_option("threshold", OptionValue::Float(0.01)).unwrap();
    let filled = context.flood_fill(Point::new(0, 0)).unwrap();

    assert_eq!(filled, Some(Rect::new(0, 0, 2, 2)));
    let canvas = context.workspace().get(id).unwrap();
    for (point, color) in canvas.buffer().pixels() {
        let expected = if point.x < 2 && point.y < 2 {
            Color::BLUE
        } else {
            Color::WHITE
        };
        assert_eq!(color, expected, "at {point:?}");
    }
    assert_eq!(canvas.history().undo_len(), 1);
}

#[test]
fn test_fill_undo_restores_corner() {
    let mut context = EditorContext::new(EditorSettings::default());
    context.add_canvas(Canvas::from_buffer("corner", red_corner(), 25));
    context.set_active_tool(ToolKind::Fill);
    context.set_tool_option("palette_colour", OptionValue::Colour(Color::BLUE)).unwrap();

    context.flood_fill(Point::new(3, 3)).unwrap();
    assert_eq!(context.undo().unwrap(), Rect::new(0, 0, 4, 4));

    let canvas = context.active_canvas().unwrap();
    assert_eq!(canvas.buffer().as_raw(), red_corner().as_raw());
}

#[test]
fn test_fill_stays_inside_hard_edge() {
    let mut source = PixelBuffer::new(10, 6, Color::WHITE);
    for y in 0..6 {
        for x in 5..10 {
            source.set(Point::new(x, y), Color::BLACK).unwrap();
        }
    }

    let result = scanline_fill(&source, Point::new(1, 1), &params(Color::GREEN, 0.001)).unwrap();

    assert_eq!(result.filled, 30);
    assert_eq!(result.bounds, Some(Rect::new(0, 0, 5, 6)));
    for (point, color) in result.overlay.pixels() {
        assert_eq!(color.a == 255, point.x < 5, "at {point:?}");
    }
}

#[test]
fn test_fill_with_seed_colour_is_idempotent() {
    let source = red_corner();
    let result = scanline_fill(&source, Point::new(1, 1), &params(Color::RED, 0.001)).unwrap();
    assert_eq!(result.filled, 4);

    let mut painted = source.clone();
    let bounds = result.bounds.unwrap();
    for point in bounds.points() {
        let paint = result.overlay.get(point).unwrap();
        if paint.a == 255 {
            painted.set(point, paint).unwrap();
        }
    }
    assert_eq!(painted.as_raw(), source.as_raw());
}

#[test]
fn test_fill_tiny_threshold_only_takes_exact_matches() {
    let mut source = PixelBuffer::new(3, 1, Color::WHITE);
    source.set(Point::new(2, 0), Color::rgb(254, 255, 255)).unwrap();

    // limit is 0.195, below the distance of 1 to the off-white pixel
    let exact = scanline_fill(&source, Point::new(0, 0), &params(Color::BLUE, 0.000_001)).unwrap();
    assert_eq!(exact.filled, 2);

    let loose = scanline_fill(&source, Point::new(0, 0), &params(Color::BLUE, 0.001)).unwrap();
    assert_eq!(loose.filled, 3);
}

#[test]
fn test_fill_through_diagonal_gap_is_blocked() {
    // 4-connected: a diagonal line of black splits the buffer in two
    let mut source = PixelBuffer::new(4, 4, Color::WHITE);
    for i in 0..4 {
        source.set(Point::new(i, 3 - i), Color::BLACK).unwrap();
    }

    let result = scanline_fill(&source, Point::new(0, 0), &params(Color::BLUE, 0.001)).unwrap();

    assert_eq!(result.filled, 6);
    assert_eq!(result.overlay.get(Point::new(3, 3)).unwrap().a, 0);
}

#[test]
fn test_fill_threshold_zero_fills_nothing() {
    let source = PixelBuffer::new(4, 4, Color::WHITE);
    let result = scanline_fill(&source, Point::new(0, 0), &params(Color::BLUE, 0.0)).unwrap();
    assert_eq!(result.filled, 0);
    assert_eq!(result.bounds, None);

    let mut context = EditorContext::new(EditorSettings::default());
    context.add_canvas(Canvas::from_buffer("white", source.clone(), 25));
    context.set_active_tool(ToolKind::Fill);
    context.set_tool_option("threshold", OptionValue::Float(0.0)).unwrap();

    assert_eq!(context.flood_fill(Point::new(2, 2)).unwrap(), None);
    let canvas = context.active_canvas().unwrap();
    assert_eq!(canvas.buffer().as_raw(), source.as_raw());
    assert_eq!(canvas.history().undo_len(), 0);
    assert!(context.current_state().is_idle());
}
