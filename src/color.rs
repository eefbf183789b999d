use egui::Color32;
use serde::{Deserialize, Serialize};

/// Largest squared RGB distance between two colours: `3 * 255²`.
///
/// Fill thresholds are fractions of this value.
pub const MAX_SQUARED_DISTANCE: f32 = 195_075.0;

/// An 8-bit, non-premultiplied RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }

    /// Sum of squared RGB channel differences. Alpha is not considered.
    ///
    /// This is the cheap metric used on the real-time fill path.
    pub fn squared_distance(&self, other: &Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Red-mean weighted distance, normalised so black to white is roughly 1.
    pub fn weighted_distance(&self, other: &Color) -> f32 {
        let red_mean = (self.r as f32 + other.r as f32) / 2.0;
        let dr = other.r as f32 - self.r as f32;
        let dg = other.g as f32 - self.g as f32;
        let db = other.b as f32 - self.b as f32;

        let weighted = (2.0 + red_mean / 256.0) * dr * dr
            + 4.0 * dg * dg
            + (2.0 + (255.0 - red_mean) / 256.0) * db * db;
        weighted.sqrt() / 765.0
    }
}

impl From<Color32> for Color {
    fn from(color: Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(pixel: image::Rgba<u8>) -> Self {
        Self::from_array(pixel.0)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(color: Color) -> Self {
        image::Rgba(color.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_distance_extremes() {
        assert_eq!(Color::BLACK.squared_distance(&Color::BLACK), 0);
        assert_eq!(
            Color::BLACK.squared_distance(&Color::WHITE) as f32,
            MAX_SQUARED_DISTANCE
        );
        // alpha is ignored
        assert_eq!(Color::RED.squared_distance(&Color::RED.with_alpha(0)), 0);
    }

    #[test]
    fn test_weighted_distance_is_normalised() {
        assert_eq!(Color::WHITE.weighted_distance(&Color::WHITE), 0.0);
        let d = Color::BLACK.weighted_distance(&Color::WHITE);
        assert!(d > 0.99 && d < 1.01, "black/white distance was {d}");
    }
}
