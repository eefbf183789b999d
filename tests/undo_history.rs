use pixel_paint::history::MAX_HISTORY_DEPTH;
use pixel_paint::{Color, EditHistory, PaintError, PixelBuffer, Point, Rect, UndoRecord};

/// Writes `color` into `rect` the way a tool would: capture first, then edit
fn commit(history: &mut EditHistory, buffer: &mut PixelBuffer, rect: Rect, color: Color) {
    let record = UndoRecord::capture(buffer, rect).unwrap();
    for point in rect.points() {
        buffer.set(point, color).unwrap();
    }
    history.record_edit(record);
}

#[test]
fn test_undo_then_redo_is_bit_identical() {
    let mut buffer = PixelBuffer::new(8, 8, Color::WHITE);
    let mut history = EditHistory::new(MAX_HISTORY_DEPTH);
    commit(&mut history, &mut buffer, Rect::new(1, 1, 4, 3), Color::RED.with_alpha(77));
    commit(&mut history, &mut buffer, Rect::new(3, 2, 5, 5), Color::BLUE);

    let edited = buffer.clone();
    history.undo(&mut buffer).unwrap();
    let after_first_undo = buffer.clone();
    history.undo(&mut buffer).unwrap();
    assert_eq!(buffer.as_raw(), PixelBuffer::new(8, 8, Color::WHITE).as_raw());

    history.redo(&mut buffer).unwrap();
    assert_eq!(buffer.as_raw(), after_first_undo.as_raw());
    history.redo(&mut buffer).unwrap();
    assert_eq!(buffer.as_raw(), edited.as_raw());

    // and the other way round
    history.undo(&mut buffer).unwrap();
    history.redo(&mut buffer).unwrap();
    assert_eq!(buffer.as_raw(), edited.as_raw());
}

#[test]
fn test_new_edit_clears_redo() {
    let mut buffer = PixelBuffer::new(4, 4, Color::WHITE);
    let mut history = EditHistory::new(MAX_HISTORY_DEPTH);
    commit(&mut history, &mut buffer, Rect::new(0, 0, 1, 1), Color::RED);
    assert!(history.can_undo());
    history.undo(&mut buffer).unwrap();
    assert!(!history.can_undo());
    assert!(history.can_redo());

    commit(&mut history, &mut buffer, Rect::new(1, 1, 1, 1), Color::GREEN);

    assert!(!history.can_redo());
    assert_eq!(history.redo(&mut buffer), Err(PaintError::NothingToRedo));
}

#[test]
fn test_twenty_six_commits_keep_twenty_five() {
    let mut buffer = PixelBuffer::new(26, 1, Color::WHITE);
    let mut history = EditHistory::new(MAX_HISTORY_DEPTH);
    for x in 0..26 {
        commit(&mut history, &mut buffer, Rect::new(x, 0, 1, 1), Color::BLACK);
    }
    assert_eq!(history.undo_len(), 25);

    for _ in 0..25 {
        history.undo(&mut buffer).unwrap();
    }
    assert_eq!(history.undo(&mut buffer), Err(PaintError::NothingToUndo));
    assert_eq!(history.undo(&mut buffer), Err(PaintError::NothingToUndo));

    // only the first commit is beyond reach
    assert_eq!(buffer.get(Point::new(0, 0)).unwrap(), Color::BLACK);
    for x in 1..26 {
        assert_eq!(buffer.get(Point::new(x, 0)).unwrap(), Color::WHITE, "at x={x}");
    }
    assert_eq!(history.redo_len(), 25);
}

#[test]
fn test_empty_history_reports_nothing_to_do() {
    let mut buffer = PixelBuffer::new(2, 2, Color::WHITE);
    let mut history = EditHistory::default();
    assert_eq!(history.undo(&mut buffer), Err(PaintError::NothingToUndo));
    assert_eq!(history.redo(&mut buffer), Err(PaintError::NothingToRedo));
    assert!(PaintError::NothingToUndo.is_benign());
}
