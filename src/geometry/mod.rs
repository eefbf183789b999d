//! Integer geometry shared by every tool: buffer-local points and pixel rectangles.

mod hit_testing;

pub use hit_testing::CanvasView;

use serde::{Deserialize, Serialize};

/// A pixel position in buffer-local coordinates.
///
/// Signed so that pointer samples that wander off the canvas during a stroke can
/// still be rasterized; anything that touches the buffer is clipped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when `other` is one of the eight neighbours of `self` (or `self` itself).
    pub fn is_adjacent_to(&self, other: Point) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned pixel rectangle. `x`/`y` is the top-left pixel, the right and
/// bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle covering a whole `width` x `height` buffer.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Builds the rectangle spanning `[left, right) x [top, bottom)`, empty if inverted.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            x: left,
            y: top,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }

    /// A `width` x `height` rectangle whose centre lands on `center`.
    ///
    /// Odd sizes put the extra pixel on the right/bottom side.
    pub fn centered_on(center: Point, width: u32, height: u32) -> Self {
        Self::new(
            center.x - (width / 2) as i32,
            center.y - (height / 2) as i32,
            width,
            height,
        )
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.left() >= self.left()
                && other.top() >= self.top()
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    /// Smallest rectangle covering both. Empty rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Overlap of the two rectangles, `None` if they do not share a pixel.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let clipped = Rect::from_edges(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Every pixel in the rectangle, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.top()..self.bottom())
            .flat_map(move |y| (self.left()..self.right()).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_ignores_empty() {
        let a = Rect::new(2, 3, 4, 5);
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);
        assert_eq!(a.union(&Rect::new(0, 0, 1, 1)), Rect::from_edges(0, 0, 6, 8));
    }

    #[test]
    fn test_intersect_clips_to_bounds() {
        let bounds = Rect::from_size(10, 10);
        let stamp = Rect::centered_on(Point::new(1, 1), 6, 6);
        assert_eq!(stamp, Rect::new(-2, -2, 6, 6));
        assert_eq!(stamp.intersect(&bounds), Some(Rect::new(0, 0, 4, 4)));
        assert_eq!(Rect::new(20, 20, 2, 2).intersect(&bounds), None);
    }

    #[test]
    fn test_points_iterates_row_major() {
        let points: Vec<_> = Rect::new(1, 1, 2, 2).points().collect();
        assert_eq!(
            points,
            vec![Point::new(1, 1), Point::new(2, 1), Point::new(1, 2), Point::new(2, 2)]
        );
    }
}
