use crate::color::Color;
use crate::error::{PaintError, PaintResult};

/// Raw value handed over by the options UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionValue {
    Colour(Color),
    Integer(i64),
    Float(f32),
}

/// A typed tool setting. Built from a name/value pair at the boundary so the
/// tools themselves never deal with strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolOption {
    PaletteColour(Color),
    Opacity(u8),
    BrushSize(u32),
    Threshold(f32),
}

impl ToolOption {
    pub const PALETTE_COLOUR: &'static str = "palette_colour";
    pub const OPACITY: &'static str = "opacity";
    pub const BRUSH_SIZE: &'static str = "brush_size";
    pub const THRESHOLD: &'static str = "threshold";

    /// Parses a named option. Unknown names are `InvalidToolOption`; a known
    /// name with the wrong kind or range of value is `InvalidOptionValue`.
    pub fn parse(name: &str, value: OptionValue) -> PaintResult<Self> {
        match (name, value) {
            (Self::PALETTE_COLOUR, OptionValue::Colour(color)) => Ok(Self::PaletteColour(color)),
            (Self::OPACITY, OptionValue::Integer(opacity)) => u8::try_from(opacity)
                .map(Self::Opacity)
                .map_err(|_| invalid(Self::OPACITY, format!("{opacity} is not in 0..=255"))),
            (Self::BRUSH_SIZE, OptionValue::Integer(size)) => match u32::try_from(size) {
                Ok(size) if size >= 1 => Ok(Self::BrushSize(size)),
                _ => Err(invalid(Self::BRUSH_SIZE, format!("{size} is not a positive size"))),
            },
            (Self::THRESHOLD, OptionValue::Float(threshold)) => {
                if (0.0..=1.0).contains(&threshold) {
                    Ok(Self::Threshold(threshold))
                } else {
                    Err(invalid(Self::THRESHOLD, format!("{threshold} is not in 0..=1")))
                }
            }
            (Self::PALETTE_COLOUR, _) => Err(invalid(Self::PALETTE_COLOUR, "expected a colour".into())),
            (Self::OPACITY, _) => Err(invalid(Self::OPACITY, "expected an integer".into())),
            (Self::BRUSH_SIZE, _) => Err(invalid(Self::BRUSH_SIZE, "expected an integer".into())),
            (Self::THRESHOLD, _) => Err(invalid(Self::THRESHOLD, "expected a number".into())),
            (other, _) => Err(PaintError::InvalidToolOption(other.to_owned())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PaletteColour(_) => Self::PALETTE_COLOUR,
            Self::Opacity(_) => Self::OPACITY,
            Self::BrushSize(_) => Self::BRUSH_SIZE,
            Self::Threshold(_) => Self::THRESHOLD,
        }
    }

    /// Error for a tool that does not recognise this option
    pub(crate) fn unsupported(&self) -> PaintError {
        PaintError::InvalidToolOption(self.name().to_owned())
    }
}

fn invalid(name: &'static str, reason: String) -> PaintError {
    PaintError::InvalidOptionValue { name, reason }
}
