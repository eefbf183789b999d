use log::debug;

use crate::document::Canvas;
use crate::error::PaintResult;
use crate::geometry::Point;
use crate::raster::sample_at;
use super::super::trait_def::{Tool, ToolOutcome};
use super::super::ToolOption;

/// Colour dropper. Has no options of its own.
#[derive(Debug, Clone, Default)]
pub struct DropperTool {
    /// Where the pointer went down, until the next frame samples it
    pending: Option<Point>,
}

impl DropperTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for DropperTool {
    fn name(&self) -> &'static str {
        "Dropper"
    }

    fn on_pointer_down(&mut self, point: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        canvas.buffer().get(point)?;
        self.pending = Some(point);
        Ok(ToolOutcome::Nothing)
    }

    fn on_frame_update(&mut self, _pointer: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        let Some(point) = self.pending.take() else {
            return Ok(ToolOutcome::Nothing);
        };
        let color = sample_at(canvas.buffer(), point)?;
        debug!("Dropper sampled {color:?} at ({}, {})", point.x, point.y);
        Ok(ToolOutcome::Sampled(color))
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        // a press and release inside one frame still samples
        match self.pending.take() {
            Some(point) => Ok(ToolOutcome::Sampled(sample_at(canvas.buffer(), point)?)),
            None => Ok(ToolOutcome::Nothing),
        }
    }

    fn set_option(&mut self, option: ToolOption) -> PaintResult<()> {
        Err(option.unsupported())
    }

    fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}
