use crate::color::Color;
use crate::document::Canvas;
use crate::error::PaintResult;
use crate::geometry::{Point, Rect};

use super::ToolOption;

/// What a tool did during one call, so the editor can emit the matching events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolOutcome {
    /// Nothing visible happened
    Nothing,
    /// Pixels inside the rectangle were rewritten for live feedback
    Changed(Rect),
    /// The interaction ended and an undo record covering the rectangle was pushed
    Committed(Rect),
    /// The dropper read a colour
    Sampled(Color),
}

/// The interaction protocol shared by every tool.
///
/// The pointer position is always passed in explicitly; tools never query
/// global input state. Calls for one canvas are strictly serialized.
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Pointer pressed over the canvas. `point` is inside the canvas.
    fn on_pointer_down(&mut self, point: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome>;

    /// Called once per frame with the current pointer position, which may be
    /// outside the canvas while a stroke is dragged off its edge.
    fn on_frame_update(&mut self, pointer: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome>;

    /// Pointer released: commit whatever is in flight
    fn on_pointer_up(&mut self, canvas: &mut Canvas) -> PaintResult<ToolOutcome>;

    /// Applies a typed option. Options the tool does not know are rejected with
    /// `InvalidToolOption` and change nothing. Changes made mid-stroke only
    /// affect the next stroke.
    fn set_option(&mut self, option: ToolOption) -> PaintResult<()>;

    /// True between pointer-down and the commit at pointer-up
    fn is_busy(&self) -> bool;
}
