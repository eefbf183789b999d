use crate::color::Color;
use crate::document::CanvasId;
use crate::geometry::Rect;
use crate::state::EditorState;
use crate::tool::ToolKind;

/// Which way the history moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Everything the editor core reports to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    CanvasCreated {
        canvas: CanvasId,
        width: u32,
        height: u32,
    },
    ActiveCanvasChanged {
        canvas: CanvasId,
    },
    /// Pixels inside `rect` changed and need redrawing
    CanvasChanged {
        canvas: CanvasId,
        rect: Rect,
    },
    StrokeStarted {
        canvas: CanvasId,
        tool: ToolKind,
    },
    /// A brush stroke or fill was committed to the canvas and its history
    StrokeCompleted {
        canvas: CanvasId,
        tool: ToolKind,
        rect: Rect,
    },
    ColourSampled(Color),
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    StateChanged {
        old: EditorState,
        new: EditorState,
    },
    HistoryApplied {
        canvas: CanvasId,
        action: HistoryAction,
        rect: Rect,
    },
}
