use log::debug;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::error::PaintResult;
use crate::geometry::{Point, Rect};
use crate::history::UndoRecord;
use crate::raster::{blend, rasterize_line, BrushStamp};
use crate::tool::BrushConfig;

/// A rectangle of pixels that can grow while keeping its existing content.
#[derive(Debug, Clone)]
pub struct Region {
    rect: Rect,
    pixels: PixelBuffer,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            pixels: PixelBuffer::new(0, 0, Color::TRANSPARENT),
        }
    }
}

impl Region {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    fn local(&self, point: Point) -> Point {
        Point::new(point.x - self.rect.x, point.y - self.rect.y)
    }

    /// Grows the region to cover `rect` as well. Pixels already held are kept;
    /// newly covered ones are produced by `fill`.
    pub fn grow(
        &mut self,
        rect: Rect,
        mut fill: impl FnMut(Point) -> PaintResult<Color>,
    ) -> PaintResult<()> {
        let grown = self.rect.union(&rect);
        if grown == self.rect {
            return Ok(());
        }
        let mut pixels = PixelBuffer::new(grown.width, grown.height, Color::TRANSPARENT);
        for point in grown.points() {
            let color = if self.rect.contains(point) {
                self.pixels.get(self.local(point))?
            } else {
                fill(point)?
            };
            pixels.set(Point::new(point.x - grown.x, point.y - grown.y), color)?;
        }
        self.rect = grown;
        self.pixels = pixels;
        Ok(())
    }

    /// Copies the part of the region under `rect` (in canvas coordinates)
    pub fn crop(&self, rect: &Rect) -> PaintResult<PixelBuffer> {
        let local = self.local(Point::new(rect.x, rect.y));
        self.pixels
            .copy_region(&Rect::new(local.x, local.y, rect.width, rect.height))
    }

    pub fn into_parts(self) -> (Rect, PixelBuffer) {
        (self.rect, self.pixels)
    }
}

/// One brush stroke from pointer-down to pointer-up.
///
/// Dabs accumulate unblended in `overlay`; every update recomposites
/// `pre_image` + `overlay` masked by the stroke opacity and writes the result
/// into the live buffer. Because the opacity is applied to the accumulated
/// overlay rather than per dab, overlapping dabs never exceed it.
///
/// `pre_image` is captured lazily: it only ever covers the rectangle the stroke
/// has touched, and pixels outside it are still pristine in the live buffer.
#[derive(Debug, Clone)]
pub struct StrokeSession {
    config: BrushConfig,
    stamp: BrushStamp,
    last: Point,
    pre_image: Region,
    overlay: Region,
    dabs: usize,
}

impl StrokeSession {
    /// Starts a stroke and lays the first dab at `start`
    pub fn begin(
        config: BrushConfig,
        stamp: BrushStamp,
        start: Point,
        buffer: &mut PixelBuffer,
    ) -> PaintResult<(Self, Option<Rect>)> {
        let mut session = Self {
            config,
            stamp,
            last: start,
            pre_image: Region::default(),
            overlay: Region::default(),
            dabs: 0,
        };
        let dirty = session.stamp_points(&[start], buffer)?;
        Ok((session, dirty))
    }

    /// Connects the last sample to `point` with dabs so fast pointer motion
    /// leaves no gaps. Returns the rectangle rewritten in `buffer`.
    pub fn extend_to(&mut self, point: Point, buffer: &mut PixelBuffer) -> PaintResult<Option<Rect>> {
        let points: Vec<Point> = rasterize_line(self.last, point)
            .into_iter()
            .filter(|p| *p != self.last)
            .collect();
        self.last = point;
        self.stamp_points(&points, buffer)
    }

    /// Lays a single dab at `point` without joining it to the previous sample
    pub fn apply_dab(&mut self, point: Point, buffer: &mut PixelBuffer) -> PaintResult<Option<Rect>> {
        self.last = point;
        self.stamp_points(&[point], buffer)
    }

    fn stamp_points(&mut self, points: &[Point], buffer: &mut PixelBuffer) -> PaintResult<Option<Rect>> {
        let bounds = buffer.bounds();
        let dirty = points
            .iter()
            .filter_map(|p| self.stamp.rect_at(*p).intersect(&bounds))
            .reduce(|a, b| a.union(&b));
        let Some(dirty) = dirty else {
            return Ok(None);
        };

        let transparent = self.config.color.with_alpha(0);
        self.pre_image.grow(dirty, |p| buffer.get(p))?;
        self.overlay.grow(dirty, |_| Ok(transparent))?;

        for point in points {
            let footprint = self.stamp.rect_at(*point);
            if footprint.intersect(&bounds).is_none() {
                continue;
            }
            let origin = self.overlay.local(Point::new(footprint.x, footprint.y));
            blend::stamp_onto(&mut self.overlay.pixels, self.stamp.bitmap(), origin)?;
            self.dabs += 1;
        }

        let composited = blend::composite(
            &self.pre_image.crop(&dirty)?,
            &self.overlay.crop(&dirty)?,
            self.config.opacity,
        )?;
        buffer.blit_region(&composited, &dirty)?;
        Ok(Some(dirty))
    }

    /// Union of every stamp rectangle touched so far, clipped to the canvas
    pub fn rect(&self) -> Rect {
        self.pre_image.rect()
    }

    pub fn dab_count(&self) -> usize {
        self.dabs
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// Ends the stroke. The live buffer already holds the final composite, so
    /// all that is left is the undo record for the touched rectangle.
    pub fn finish(self) -> Option<UndoRecord> {
        debug!("Stroke finished after {} dabs over {:?}", self.dabs, self.rect());
        let (rect, pixels) = self.pre_image.into_parts();
        (!rect.is_empty()).then(|| UndoRecord::new(rect, pixels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(opacity: u8) -> BrushConfig {
        BrushConfig {
            color: Color::RED,
            diameter: 4,
            opacity,
        }
    }

    #[test]
    fn test_region_grow_keeps_content() {
        let mut region = Region::default();
        region.grow(Rect::new(1, 1, 2, 2), |_| Ok(Color::RED)).unwrap();
        region.grow(Rect::new(2, 2, 2, 2), |_| Ok(Color::BLUE)).unwrap();
        assert_eq!(region.rect(), Rect::new(1, 1, 3, 3));
        let pixels = region.pixels();
        assert_eq!(pixels.get(Point::new(0, 0)).unwrap(), Color::RED);
        assert_eq!(pixels.get(Point::new(1, 1)).unwrap(), Color::RED);
        assert_eq!(pixels.get(Point::new(2, 2)).unwrap(), Color::BLUE);
        assert_eq!(pixels.get(Point::new(2, 0)).unwrap(), Color::BLUE);
    }

    #[test]
    fn test_overlapping_dabs_respect_opacity() {
        let mut buffer = PixelBuffer::new(32, 32, Color::WHITE.with_alpha(0));
        let cfg = config(100);
        let stamp = BrushStamp::generate(cfg.color, cfg.diameter, 4);
        let (mut session, _) = StrokeSession::begin(cfg, stamp, Point::new(16, 16), &mut buffer).unwrap();
        for _ in 0..5 {
            session.apply_dab(Point::new(16, 16), &mut buffer).unwrap();
        }
        assert_eq!(session.dab_count(), 6);
        assert_eq!(buffer.get(Point::new(16, 16)).unwrap().a, 100);
        assert!(buffer.pixels().all(|(_, c)| c.a <= 100));
    }

    #[test]
    fn test_finish_records_pristine_pixels() {
        let mut buffer = PixelBuffer::new(20, 20, Color::WHITE);
        let before = buffer.clone();
        let cfg = config(255);
        let stamp = BrushStamp::generate(cfg.color, cfg.diameter, 4);
        let (mut session, _) = StrokeSession::begin(cfg, stamp, Point::new(5, 5), &mut buffer).unwrap();
        session.extend_to(Point::new(14, 9), &mut buffer).unwrap();
        let rect = session.rect();
        let record = session.finish().unwrap();

        assert_eq!(record.rect(), rect);
        assert_eq!(record.snapshot(), &before.copy_region(&rect).unwrap());
        assert_eq!(buffer.get(Point::new(14, 9)).unwrap(), Color::RED);
    }
}
