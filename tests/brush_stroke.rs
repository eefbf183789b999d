use pixel_paint::event::EditorEvent;
use pixel_paint::raster::{BrushStamp, DEFAULT_SUPERSAMPLE, STAMP_PADDING};
use pixel_paint::tool::BrushConfig;
use pixel_paint::{
    Color, EditorContext, EditorSettings, EventQueue, OptionValue, PixelBuffer, Point, Rect,
    StrokeSession,
};

fn context_with_canvas(width: u32, height: u32) -> (EditorContext, EventQueue) {
    let mut settings = EditorSettings::default();
    settings.brush = BrushConfig {
        color: Color::RED,
        diameter: 4,
        opacity: 255,
    };
    let mut context = EditorContext::new(settings);
    let queue = EventQueue::new();
    context.event_bus.subscribe(Box::new(queue.clone()));
    context.create_canvas(width, height, Color::WHITE);
    queue.drain();
    (context, queue)
}

#[test]
fn test_single_point_stroke_stamps_once() {
    let config = BrushConfig {
        color: Color::RED,
        diameter: 4,
        opacity: 255,
    };
    let stamp = BrushStamp::generate(config.color, config.diameter, DEFAULT_SUPERSAMPLE);
    let expected = stamp.rect_at(Point::new(5, 5));
    let mut buffer = PixelBuffer::new(32, 32, Color::WHITE);

    let (mut session, dirty) = StrokeSession::begin(config, stamp, Point::new(5, 5), &mut buffer).unwrap();
    session.extend_to(Point::new(5, 5), &mut buffer).unwrap();

    assert_eq!(session.dab_count(), 1);
    assert_eq!(dirty, Some(session.rect()));
    assert_eq!(session.rect(), expected.intersect(&buffer.bounds()).unwrap());
    assert_eq!(expected.width, 4 + STAMP_PADDING);
}

#[test]
fn test_stroke_through_context_commits_once() {
    let (mut context, queue) = context_with_canvas(32, 32);

    context.begin_stroke(Point::new(5, 5)).unwrap();
    context.apply_brush_dab(Point::new(5, 5)).unwrap();
    let rect = context.end_stroke().unwrap().unwrap();

    let stamp = BrushStamp::generate(Color::RED, 4, DEFAULT_SUPERSAMPLE);
    assert_eq!(rect, stamp.rect_at(Point::new(5, 5)).intersect(&Rect::from_size(32, 32)).unwrap());
    assert_eq!(rect, Rect::new(0, 0, 11, 11));
    let canvas = context.active_canvas().unwrap();
    assert_eq!(canvas.history().undo_len(), 1);
    assert_eq!(canvas.buffer().get(Point::new(5, 5)).unwrap(), Color::RED);

    let completed: Vec<_> = queue
        .drain()
        .into_iter()
        .filter(|event| matches!(event, EditorEvent::StrokeCompleted { .. }))
        .collect();
    assert_eq!(completed.len(), 1);
}

#[test]
fn test_stroke_rect_is_union_of_dabs_clipped_to_canvas() {
    let (mut context, _queue) = context_with_canvas(40, 20);

    context.begin_stroke(Point::new(2, 2)).unwrap();
    context.apply_brush_dab(Point::new(30, 10)).unwrap();
    let rect = context.end_stroke().unwrap().unwrap();

    let stamp = BrushStamp::generate(Color::RED, 4, DEFAULT_SUPERSAMPLE);
    let expected = stamp
        .rect_at(Point::new(2, 2))
        .union(&stamp.rect_at(Point::new(30, 10)))
        .intersect(&Rect::from_size(40, 20))
        .unwrap();
    assert_eq!(rect, expected);
}

#[test]
fn test_gapless_stroke_between_distant_samples() {
    let (mut context, _queue) = context_with_canvas(64, 16);

    context.begin_stroke(Point::new(4, 8)).unwrap();
    context.apply_brush_dab(Point::new(60, 8)).unwrap();
    context.end_stroke().unwrap();

    let buffer = context.active_canvas().unwrap().buffer();
    for x in 4..=60 {
        assert_eq!(buffer.get(Point::new(x, 8)).unwrap(), Color::RED, "gap at x={x}");
    }
}

#[test]
fn test_stroke_opacity_caps_overlapping_dabs() {
    let (mut context, _queue) = context_with_canvas(32, 32);
    context.set_tool_option("opacity", OptionValue::Integer(128)).unwrap();

    context.begin_stroke(Point::new(10, 10)).unwrap();
    context.apply_brush_dab(Point::new(12, 10)).unwrap();
    context.apply_brush_dab(Point::new(10, 10)).unwrap();
    context.end_stroke().unwrap();

    // half-opaque red over white, however often the dabs overlapped
    let center = context.active_canvas().unwrap().buffer().get(Point::new(11, 10)).unwrap();
    assert_eq!(center.a, 255);
    assert_eq!(center.r, 255);
    assert!((126..=128).contains(&center.g), "{center:?}");
}

#[test]
fn test_undo_after_stroke_restores_canvas() {
    let (mut context, _queue) = context_with_canvas(24, 24);
    let before = context.active_canvas().unwrap().buffer().clone();

    context.begin_stroke(Point::new(3, 20)).unwrap();
    context.apply_brush_dab(Point::new(20, 3)).unwrap();
    let rect = context.end_stroke().unwrap().unwrap();

    assert_eq!(context.undo().unwrap(), rect);
    assert_eq!(context.active_canvas().unwrap().buffer().as_raw(), before.as_raw());
    context.redo().unwrap();
    assert_ne!(context.active_canvas().unwrap().buffer().as_raw(), before.as_raw());
}
