use log::debug;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Transparent border around the dab so the soft edge is never cut off
pub const STAMP_PADDING: u32 = 8;

/// Supersampling factor used when nothing else is configured
pub const DEFAULT_SUPERSAMPLE: u32 = 4;

/// Alpha of the outer, middle and inner circle of the dab
const RING_ALPHAS: [u8; 3] = [85, 175, 255];

/// One pre-rendered brush dab.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushStamp {
    color: Color,
    diameter: u32,
    supersample: u32,
    bitmap: PixelBuffer,
}

impl BrushStamp {
    /// Renders a soft round dab of `diameter` pixels.
    ///
    /// The dab is drawn at `supersample`x resolution as three concentric
    /// circles of rising alpha and then box-filtered down to
    /// `diameter + STAMP_PADDING` square.
    pub fn generate(color: Color, diameter: u32, supersample: u32) -> Self {
        let diameter = diameter.max(1);
        let supersample = supersample.max(1);
        let size = diameter + STAMP_PADDING;

        let big_size = size * supersample;
        let big_diameter = diameter * supersample;
        let center = (big_size / 2) as i64;
        let half_step = (supersample / 2) as i64;
        let radii = [
            (big_diameter / 2) as i64 + half_step,
            (big_diameter / 2) as i64,
            ((big_diameter / 2) as i64 - half_step).max(0),
        ];

        let mut alpha = vec![0u8; big_size as usize * big_size as usize];
        for (radius, ring_alpha) in radii.into_iter().zip(RING_ALPHAS) {
            // doubled coordinates so pixel centres sit on integers
            let limit = (2 * radius) * (2 * radius);
            for y in 0..big_size as i64 {
                let dy = 2 * y + 1 - 2 * center;
                for x in 0..big_size as i64 {
                    let dx = 2 * x + 1 - 2 * center;
                    if dx * dx + dy * dy <= limit {
                        alpha[(y * big_size as i64 + x) as usize] = ring_alpha;
                    }
                }
            }
        }

        let block = supersample * supersample;
        let mut data = Vec::with_capacity(size as usize * size as usize * 4);
        for y in 0..size {
            for x in 0..size {
                let mut sum = 0u32;
                for sy in 0..supersample {
                    let row = (y * supersample + sy) * big_size;
                    for sx in 0..supersample {
                        sum += alpha[(row + x * supersample + sx) as usize] as u32;
                    }
                }
                let averaged = ((sum + block / 2) / block) as u8;
                data.extend_from_slice(&color.with_alpha(averaged).to_array());
            }
        }
        let bitmap = PixelBuffer::from_raw(size, size, data)
            .unwrap_or_else(|| PixelBuffer::new(size, size, color.with_alpha(0)));

        debug!("Generated {diameter}px brush stamp ({size}x{size}, {supersample}x supersampled)");

        Self {
            color,
            diameter,
            supersample,
            bitmap,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    pub fn size(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn bitmap(&self) -> &PixelBuffer {
        &self.bitmap
    }

    /// Rectangle the stamp covers when centred on `center`
    pub fn rect_at(&self, center: Point) -> Rect {
        Rect::centered_on(center, self.size(), self.size())
    }
}

/// Keeps the last generated stamp and only re-renders it when the colour,
/// diameter or supersampling factor change.
#[derive(Debug, Clone, Default)]
pub struct StampCache {
    stamp: Option<BrushStamp>,
    generations: u64,
}

impl StampCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, color: Color, diameter: u32, supersample: u32) -> &BrushStamp {
        let stale = self.stamp.as_ref().is_none_or(|stamp| {
            stamp.color != color
                || stamp.diameter != diameter.max(1)
                || stamp.supersample != supersample.max(1)
        });
        if stale {
            self.generations += 1;
            self.stamp = Some(BrushStamp::generate(color, diameter, supersample));
        }
        self.stamp.get_or_insert_with(|| BrushStamp::generate(color, diameter, supersample))
    }

    /// How many times a stamp has been rendered
    pub fn generations(&self) -> u64 {
        self.generations
    }
}
