use egui::{Pos2, Vec2};

use super::Point;

/// Where a canvas is drawn on screen. Converts pointer positions into buffer
/// coordinates and answers the hover test that guards every tool entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    /// Screen position of the canvas' top-left pixel
    pub origin: Pos2,
    /// Screen pixels per canvas pixel
    pub zoom: f32,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl CanvasView {
    pub fn new(origin: Pos2, zoom: f32, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            origin,
            zoom: zoom.max(f32::EPSILON),
            canvas_width,
            canvas_height,
        }
    }

    /// Screen rectangle covered by the canvas
    pub fn screen_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            self.origin,
            Vec2::new(
                self.canvas_width as f32 * self.zoom,
                self.canvas_height as f32 * self.zoom,
            ),
        )
    }

    /// Maps a screen position to the canvas pixel underneath it. The result may lie
    /// outside the canvas; use [`CanvasView::hover_point`] to check.
    pub fn screen_to_canvas(&self, pos: Pos2) -> Point {
        let local = (pos - self.origin) / self.zoom;
        Point::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// True when the screen position `(x, y)` is over a canvas pixel
    pub fn hover_point(&self, x: f32, y: f32) -> bool {
        let point = self.screen_to_canvas(Pos2::new(x, y));
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.canvas_width
            && (point.y as u32) < self.canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_respects_zoom_and_origin() {
        let view = CanvasView::new(Pos2::new(10.0, 20.0), 2.0, 4, 4);
        assert!(view.hover_point(10.0, 20.0));
        assert!(view.hover_point(17.9, 27.9));
        assert!(!view.hover_point(18.0, 20.0));
        assert!(!view.hover_point(9.9, 20.0));
        assert_eq!(view.screen_to_canvas(Pos2::new(13.0, 25.0)), Point::new(1, 2));
        assert_eq!(view.screen_to_canvas(Pos2::new(9.0, 20.0)), Point::new(-1, 0));
    }
}
