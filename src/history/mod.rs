mod record;

pub use record::UndoRecord;

use std::collections::VecDeque;

use log::{debug, info};

use crate::buffer::PixelBuffer;
use crate::error::{PaintError, PaintResult};
use crate::geometry::Rect;

/// Undo depth used unless the settings say otherwise
pub const MAX_HISTORY_DEPTH: usize = 25;

/// Bounded linear undo/redo history of rectangular pixel diffs.
///
/// Most recent records sit at the back of each deque. A new edit clears the
/// redo side; once the undo side grows past `max_depth` the oldest record is
/// dropped and can no longer be undone.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<UndoRecord>,
    redo_stack: VecDeque<UndoRecord>,
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY_DEPTH)
    }
}

impl EditHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records the pre-image of a committed edit
    pub fn record_edit(&mut self, record: UndoRecord) {
        debug!("Recording edit of {:?} ({} bytes)", record.rect(), record.memory_size());
        self.undo_stack.push_back(record);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.max_depth {
            if let Some(evicted) = self.undo_stack.pop_front() {
                debug!("History full, evicted edit of {:?}", evicted.rect());
            }
        }
    }

    /// Reverts the most recent edit and returns the rectangle it touched
    pub fn undo(&mut self, buffer: &mut PixelBuffer) -> PaintResult<Rect> {
        let rect = transfer(&mut self.undo_stack, &mut self.redo_stack, buffer)
            .ok_or(PaintError::NothingToUndo)??;
        info!("Undo restored {rect:?}");
        Ok(rect)
    }

    /// Re-applies the most recently undone edit
    pub fn redo(&mut self, buffer: &mut PixelBuffer) -> PaintResult<Rect> {
        let rect = transfer(&mut self.redo_stack, &mut self.undo_stack, buffer)
            .ok_or(PaintError::NothingToRedo)??;
        info!("Redo reapplied {rect:?}");
        Ok(rect)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Bytes held across both stacks
    pub fn memory_usage(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(UndoRecord::memory_size)
            .sum()
    }
}

/// Writes the newest record of `from` into `buffer` and pushes the pixels it
/// replaced onto `to`. Returns `None` when `from` is empty. On error nothing
/// moves and the buffer is untouched.
fn transfer(
    from: &mut VecDeque<UndoRecord>,
    to: &mut VecDeque<UndoRecord>,
    buffer: &mut PixelBuffer,
) -> Option<PaintResult<Rect>> {
    let record = from.back()?;
    let rect = record.rect();
    let inverse = match UndoRecord::capture(buffer, rect) {
        Ok(inverse) => inverse,
        Err(err) => return Some(Err(err)),
    };
    if let Err(err) = buffer.blit_region(record.snapshot(), &rect) {
        return Some(Err(err));
    }
    from.pop_back();
    to.push_back(inverse);
    Some(Ok(rect))
}
