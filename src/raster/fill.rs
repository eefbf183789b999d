use log::debug;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::{Color, MAX_SQUARED_DISTANCE};
use crate::error::PaintResult;
use crate::geometry::{Point, Rect};

/// How "similar colour" is measured when growing a fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Sum of squared RGB differences, compared against `threshold * 195075`
    #[default]
    Squared,
    /// Red-mean weighted distance, compared against `threshold` directly
    Weighted,
}

/// Inputs of a single flood fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParams {
    /// Paint written into every filled pixel (alpha forced to 255)
    pub color: Color,
    /// Fraction of the maximum colour distance, 0..=1
    pub threshold: f32,
    pub metric: DistanceMetric,
}

/// Result of a flood fill: unblended paint plus what it covers.
#[derive(Debug, Clone)]
pub struct FillOverlay {
    /// Same size as the source; transparent except for filled pixels
    pub overlay: PixelBuffer,
    /// Bounding rectangle of the filled pixels, `None` if nothing was filled
    pub bounds: Option<Rect>,
    pub filled: usize,
}

/// Marker grid kept apart from the colour data so that "already filled" and
/// "similar to the seed" are independent questions.
struct FillState<'a> {
    source: &'a PixelBuffer,
    width: i32,
    height: i32,
    filled: Vec<bool>,
    seed_color: Color,
    params: FillParams,
    squared_limit: f32,
}

impl FillState<'_> {
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn similar(&self, color: &Color) -> bool {
        match self.params.metric {
            DistanceMetric::Squared => {
                (color.squared_distance(&self.seed_color) as f32) < self.squared_limit
            }
            DistanceMetric::Weighted => {
                color.weighted_distance(&self.seed_color) < self.params.threshold
            }
        }
    }

    /// Unfilled and similar to the seed colour in the *source* image
    fn eligible(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        if self.filled[self.index(x, y)] {
            return false;
        }
        self.source
            .get(Point::new(x, y))
            .is_ok_and(|color| self.similar(&color))
    }

    /// Walks up and left until neither step is possible
    fn top_left_of_run(&self, mut x: i32, mut y: i32) -> (i32, i32) {
        loop {
            let (ox, oy) = (x, y);
            while self.eligible(x, y - 1) {
                y -= 1;
            }
            while self.eligible(x - 1, y) {
                x -= 1;
            }
            if (x, y) == (ox, oy) {
                return (x, y);
            }
        }
    }

    /// Pushes one seed for each eligible run in row `y` between `left..=right`
    fn queue_runs(&self, left: i32, right: i32, y: i32, pending: &mut Vec<(i32, i32)>) {
        if y < 0 || y >= self.height {
            return;
        }
        let mut in_run = false;
        for x in left..=right {
            if self.eligible(x, y) {
                if !in_run {
                    pending.push((x, y));
                    in_run = true;
                }
            } else {
                in_run = false;
            }
        }
    }
}

/// Fills the contiguous region of pixels similar to the colour under `seed`.
///
/// Similarity is strict: a threshold of 0 admits nothing, not even the seed.
/// 4-connected, non-recursive: spans are discovered with an explicit work list
/// so stack depth does not depend on canvas size. Pixels are always compared
/// against `source`, never against paint already written, so the result does
/// not depend on visiting order. Worst case touches every pixel once.
pub fn scanline_fill(source: &PixelBuffer, seed: Point, params: &FillParams) -> PaintResult<FillOverlay> {
    let seed_color = source.get(seed)?;
    let paint = params.color.with_alpha(255);

    let mut state = FillState {
        source,
        width: source.width() as i32,
        height: source.height() as i32,
        filled: vec![false; source.width() as usize * source.height() as usize],
        seed_color,
        params: *params,
        squared_limit: params.threshold * MAX_SQUARED_DISTANCE,
    };
    let mut overlay = PixelBuffer::new(source.width(), source.height(), paint.with_alpha(0));
    let mut bounds: Option<Rect> = None;
    let mut filled = 0usize;

    let mut pending = Vec::new();
    if state.eligible(seed.x, seed.y) {
        pending.push(state.top_left_of_run(seed.x, seed.y));
    }

    while let Some((x, y)) = pending.pop() {
        if !state.eligible(x, y) {
            continue;
        }
        let mut left = x;
        while state.eligible(left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while state.eligible(right + 1, y) {
            right += 1;
        }

        for sx in left..=right {
            let i = state.index(sx, y);
            state.filled[i] = true;
            overlay.set(Point::new(sx, y), paint)?;
        }
        filled += (right - left + 1) as usize;
        let span = Rect::from_edges(left, y, right + 1, y + 1);
        bounds = Some(bounds.map_or(span, |b| b.union(&span)));

        state.queue_runs(left, right, y - 1, &mut pending);
        state.queue_runs(left, right, y + 1, &mut pending);
    }

    debug!("Flood fill from ({}, {}) filled {filled} pixels in {bounds:?}", seed.x, seed.y);

    Ok(FillOverlay {
        overlay,
        bounds,
        filled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(threshold: f32) -> FillParams {
        FillParams {
            color: Color::BLUE,
            threshold,
            metric: DistanceMetric::Squared,
        }
    }

    #[test]
    fn test_fill_whole_uniform_buffer() {
        let source = PixelBuffer::new(7, 5, Color::WHITE);
        let result = scanline_fill(&source, Point::new(3, 2), &params(0.001)).unwrap();
        assert_eq!(result.filled, 35);
        assert_eq!(result.bounds, Some(source.bounds()));
    }

    #[test]
    fn test_fill_wraps_around_obstacles() {
        // a U-shaped wall: the fill has to go down, across and back up
        let mut source = PixelBuffer::new(5, 5, Color::WHITE);
        for y in 0..4 {
            source.set(Point::new(2, y), Color::BLACK).unwrap();
        }
        let result = scanline_fill(&source, Point::new(0, 0), &params(0.001)).unwrap();
        assert_eq!(result.filled, 25 - 4);
        assert_eq!(result.overlay.get(Point::new(4, 0)).unwrap(), Color::BLUE);
        assert_eq!(result.overlay.get(Point::new(2, 0)).unwrap().a, 0);
    }

    #[test]
    fn test_zero_threshold_fills_nothing() {
        let source = PixelBuffer::new(4, 4, Color::WHITE);
        let result = scanline_fill(&source, Point::new(0, 0), &params(0.0)).unwrap();
        assert_eq!(result.filled, 0);
        assert_eq!(result.bounds, None);
        assert!(result.overlay.pixels().all(|(_, c)| c.a == 0));

        let weighted = FillParams {
            metric: DistanceMetric::Weighted,
            ..params(0.0)
        };
        assert_eq!(scanline_fill(&source, Point::new(0, 0), &weighted).unwrap().filled, 0);
    }

    #[test]
    fn test_threshold_controls_reach() {
        let mut source = PixelBuffer::new(4, 1, Color::rgb(100, 100, 100));
        source.set(Point::new(2, 0), Color::rgb(110, 100, 100)).unwrap();

        // 10² = 100 is below 0.001 * 195075 but above 0.0001 * 195075
        let wide = scanline_fill(&source, Point::new(0, 0), &params(0.001)).unwrap();
        assert_eq!(wide.filled, 4);
        let narrow = scanline_fill(&source, Point::new(0, 0), &params(0.0001)).unwrap();
        assert_eq!(narrow.filled, 2);
    }

    #[test]
    fn test_weighted_metric() {
        let mut source = PixelBuffer::new(3, 1, Color::BLACK);
        source.set(Point::new(2, 0), Color::WHITE).unwrap();
        let params = FillParams {
            color: Color::RED,
            threshold: 0.5,
            metric: DistanceMetric::Weighted,
        };
        let result = scanline_fill(&source, Point::new(0, 0), &params).unwrap();
        assert_eq!(result.filled, 2);
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let source = PixelBuffer::new(2, 2, Color::WHITE);
        assert!(scanline_fill(&source, Point::new(2, 0), &params(0.5)).is_err());
    }
}
