use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::PaintResult;
use crate::geometry::Point;

/// Reads the committed colour under `point`.
///
/// Stateless. Callers pass the canvas buffer, never a stroke overlay, so the
/// dropper always sees what has actually been painted.
pub fn sample_at(buffer: &PixelBuffer, point: Point) -> PaintResult<Color> {
    buffer.get(point)
}
