use egui::PointerButton;

use crate::error::PaintError;
use crate::event::HistoryAction;
use crate::geometry::CanvasView;
use crate::state::EditorContext;

use super::{InputEvent, PanelKind};

/// Routes input events to the editor. Pointer presses only reach the tools
/// when they land on a canvas pixel; moves and releases are always forwarded
/// so a stroke dragged off the canvas keeps going and still ends.
pub fn route_event(event: &InputEvent, context: &mut EditorContext, view: Option<&CanvasView>) {
    let result = match event {
        InputEvent::History(HistoryAction::Undo) => context.undo().map(|_| ()),
        InputEvent::History(HistoryAction::Redo) => context.redo().map(|_| ()),
        InputEvent::PointerDown {
            location,
            button: PointerButton::Primary,
        } => match view {
            Some(view)
                if location.panel == PanelKind::Central
                    && view.hover_point(location.position.x, location.position.y) =>
            {
                context
                    .pointer_down(view.screen_to_canvas(location.position))
                    .map(|_| ())
            }
            _ => Ok(()),
        },
        InputEvent::PointerMove { location, .. } => match view {
            Some(view) => context.frame_update(view.screen_to_canvas(location.position)),
            None => Ok(()),
        },
        InputEvent::PointerUp {
            button: PointerButton::Primary,
            ..
        } => context.pointer_up().map(|_| ()),
        _ => Ok(()),
    };

    if let Err(err) = result {
        log_ignored(&err);
    }
}

fn log_ignored(err: &PaintError) {
    if err.is_benign() {
        log::debug!("Ignored: {err}");
    } else {
        log::warn!("Input rejected: {err}");
    }
}
