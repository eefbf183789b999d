use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::geometry::{Point, Rect};
use crate::history::{EditHistory, UndoRecord};

/// Identifies a canvas for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasId(Uuid);

impl CanvasId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CanvasId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open image: its pixels and its own undo history.
///
/// The buffer is exclusively owned here; only the tool driving the active
/// interaction gets mutable access, and only through the editor.
#[derive(Debug, Clone)]
pub struct Canvas {
    id: CanvasId,
    name: String,
    buffer: PixelBuffer,
    history: EditHistory,
}

impl Canvas {
    pub fn new(name: impl Into<String>, width: u32, height: u32, background: Color, history_depth: usize) -> Self {
        Self::from_buffer(name, PixelBuffer::new(width, height, background), history_depth)
    }

    pub fn from_buffer(name: impl Into<String>, buffer: PixelBuffer, history_depth: usize) -> Self {
        Self {
            id: CanvasId::new(),
            name: name.into(),
            buffer,
            history: EditHistory::new(history_depth),
        }
    }

    pub fn id(&self) -> CanvasId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.buffer.contains(point)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Pushes the pre-image of an edit that has already been written to the buffer
    pub fn commit(&mut self, record: UndoRecord) {
        self.history.record_edit(record);
    }

    pub fn undo(&mut self) -> PaintResult<Rect> {
        self.history.undo(&mut self.buffer)
    }

    pub fn redo(&mut self) -> PaintResult<Rect> {
        self.history.redo(&mut self.buffer)
    }
}

/// All open canvases plus which one tools act on.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    canvases: Vec<Canvas>,
    active: Option<CanvasId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canvas and makes it active if nothing else is
    pub fn add(&mut self, canvas: Canvas) -> CanvasId {
        let id = canvas.id();
        self.canvases.push(canvas);
        self.active.get_or_insert(id);
        id
    }

    pub fn remove(&mut self, id: CanvasId) -> Option<Canvas> {
        let index = self.canvases.iter().position(|c| c.id() == id)?;
        let canvas = self.canvases.remove(index);
        if self.active == Some(id) {
            self.active = self.canvases.last().map(Canvas::id);
        }
        Some(canvas)
    }

    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    pub fn get(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.iter().find(|c| c.id() == id)
    }

    pub fn active_id(&self) -> Option<CanvasId> {
        self.active
    }

    pub fn set_active(&mut self, id: CanvasId) -> PaintResult<()> {
        if self.get(id).is_none() {
            return Err(PaintError::NoActiveCanvas);
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn active(&self) -> Option<&Canvas> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Canvas> {
        let id = self.active?;
        self.canvases.iter_mut().find(|c| c.id() == id)
    }
}
