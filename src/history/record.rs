use crate::buffer::PixelBuffer;
use crate::error::PaintResult;
use crate::geometry::Rect;

/// The pixels a rectangle held right before the edit this record reverses.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoRecord {
    rect: Rect,
    snapshot: PixelBuffer,
}

impl UndoRecord {
    /// Wraps an already captured pre-image. `snapshot` must be `rect`'s size.
    pub fn new(rect: Rect, snapshot: PixelBuffer) -> Self {
        debug_assert_eq!((snapshot.width(), snapshot.height()), (rect.width, rect.height));
        Self { rect, snapshot }
    }

    /// Captures the current content of `rect`
    pub fn capture(buffer: &PixelBuffer, rect: Rect) -> PaintResult<Self> {
        Ok(Self {
            rect,
            snapshot: buffer.copy_region(&rect)?,
        })
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn snapshot(&self) -> &PixelBuffer {
        &self.snapshot
    }

    /// Bytes held by the snapshot
    pub fn memory_size(&self) -> usize {
        self.snapshot.as_raw().len()
    }
}
