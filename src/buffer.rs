use egui::ColorImage;

use crate::color::Color;
use crate::error::{PaintError, PaintResult};
use crate::geometry::{Point, Rect};

const CHANNELS: usize = 4;

/// A width x height RGBA8 raster, stored row-major.
///
/// Every accessor is bounds-checked and reports [`PaintError::OutOfBounds`]
/// instead of clipping: undo rectangles must be exact, so clipping is always
/// the caller's job.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Creates a buffer with every pixel set to `fill`
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let data = fill
            .to_array()
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps raw RGBA bytes. Returns `None` if the length does not match the size.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize * CHANNELS).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, point: Point) -> PaintResult<usize> {
        if !self.contains(point) {
            return Err(PaintError::OutOfBounds {
                point,
                width: self.width,
                height: self.height,
            });
        }
        Ok((point.y as usize * self.width as usize + point.x as usize) * CHANNELS)
    }

    fn check_rect(&self, rect: &Rect) -> PaintResult<()> {
        if self.bounds().contains_rect(rect) {
            Ok(())
        } else {
            Err(PaintError::RectOutOfBounds {
                rect: *rect,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, point: Point) -> PaintResult<Color> {
        let i = self.offset(point)?;
        Ok(Color::rgba(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    pub fn set(&mut self, point: Point, color: Color) -> PaintResult<()> {
        let i = self.offset(point)?;
        self.data[i..i + CHANNELS].copy_from_slice(&color.to_array());
        Ok(())
    }

    /// Copies the pixels under `rect` into a new buffer of the rectangle's size
    pub fn copy_region(&self, rect: &Rect) -> PaintResult<PixelBuffer> {
        self.check_rect(rect)?;
        let row_len = rect.width as usize * CHANNELS;
        let mut data = Vec::with_capacity(rect.area() * CHANNELS);
        for y in rect.top()..rect.bottom() {
            let start = self.offset(Point::new(rect.left(), y))?;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Ok(PixelBuffer {
            width: rect.width,
            height: rect.height,
            data,
        })
    }

    /// Writes `source` into this buffer with its top-left at `dest.x, dest.y`.
    ///
    /// `source` must be exactly `dest`'s size and `dest` must lie inside the buffer.
    pub fn blit_region(&mut self, source: &PixelBuffer, dest: &Rect) -> PaintResult<()> {
        if source.width != dest.width || source.height != dest.height {
            return Err(PaintError::RegionMismatch {
                rect: *dest,
                source_width: source.width,
                source_height: source.height,
            });
        }
        self.check_rect(dest)?;
        let row_len = dest.width as usize * CHANNELS;
        for (row, y) in (dest.top()..dest.bottom()).enumerate() {
            let start = self.offset(Point::new(dest.left(), y))?;
            let src = row * row_len;
            self.data[start..start + row_len].copy_from_slice(&source.data[src..src + row_len]);
        }
        Ok(())
    }

    /// Iterates `(point, colour)` pairs for every pixel, row by row
    pub fn pixels(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        let width = self.width as usize;
        self.data.chunks_exact(CHANNELS).enumerate().map(move |(i, px)| {
            (
                Point::new((i % width) as i32, (i / width) as i32),
                Color::rgba(px[0], px[1], px[2], px[3]),
            )
        })
    }

    /// Converts to an egui image for uploading as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied([self.width as usize, self.height as usize], &self.data)
    }

    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
    }

    pub fn from_rgba_image(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_out_of_bounds() {
        let mut buffer = PixelBuffer::new(3, 2, Color::WHITE);
        assert_eq!(buffer.get(Point::new(2, 1)), Ok(Color::WHITE));
        assert!(buffer.set(Point::new(1, 1), Color::RED).is_ok());
        assert_eq!(buffer.get(Point::new(1, 1)), Ok(Color::RED));

        for point in [Point::new(3, 0), Point::new(0, 2), Point::new(-1, 0)] {
            assert_eq!(
                buffer.get(point),
                Err(PaintError::OutOfBounds {
                    point,
                    width: 3,
                    height: 2
                })
            );
        }
        assert!(buffer.set(Point::new(0, -1), Color::RED).is_err());
    }

    #[test]
    fn test_blit_never_clips() {
        let mut buffer = PixelBuffer::new(4, 4, Color::WHITE);
        let patch = PixelBuffer::new(2, 2, Color::BLUE);

        assert!(matches!(
            buffer.blit_region(&patch, &Rect::new(3, 3, 2, 2)),
            Err(PaintError::RectOutOfBounds { .. })
        ));
        assert!(matches!(
            buffer.blit_region(&patch, &Rect::new(0, 0, 3, 2)),
            Err(PaintError::RegionMismatch { .. })
        ));
        // failed blits leave the buffer untouched
        assert!(buffer.pixels().all(|(_, c)| c == Color::WHITE));

        buffer.blit_region(&patch, &Rect::new(1, 2, 2, 2)).unwrap();
        assert_eq!(buffer.get(Point::new(1, 2)), Ok(Color::BLUE));
        assert_eq!(buffer.get(Point::new(2, 3)), Ok(Color::BLUE));
        assert_eq!(buffer.get(Point::new(0, 2)), Ok(Color::WHITE));
        assert_eq!(buffer.get(Point::new(3, 3)), Ok(Color::WHITE));
    }

    #[test]
    fn test_copy_region_matches_source() {
        let mut buffer = PixelBuffer::new(5, 5, Color::BLACK);
        buffer.set(Point::new(2, 3), Color::GREEN).unwrap();
        let region = buffer.copy_region(&Rect::new(1, 2, 3, 2)).unwrap();
        assert_eq!(region.width(), 3);
        assert_eq!(region.height(), 2);
        assert_eq!(region.get(Point::new(1, 1)), Ok(Color::GREEN));
        assert_eq!(region.get(Point::new(0, 0)), Ok(Color::BLACK));
    }
}
