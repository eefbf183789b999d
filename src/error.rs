use thiserror::Error;

use crate::geometry::{Point, Rect};

/// Errors raised by the pixel-editing core.
///
/// None of these are fatal. `OutOfBounds` is a precondition violation that the
/// hover test in front of the core should have prevented; the history and
/// option errors are benign no-ops that callers are free to ignore.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaintError {
    #[error("point ({}, {}) is outside the {width}x{height} buffer", .point.x, .point.y)]
    OutOfBounds {
        point: Point,
        width: u32,
        height: u32,
    },

    #[error("rectangle {rect:?} does not fit inside the {width}x{height} buffer")]
    RectOutOfBounds { rect: Rect, width: u32, height: u32 },

    #[error("source region is {source_width}x{source_height} but destination is {}x{}", .rect.width, .rect.height)]
    RegionMismatch {
        rect: Rect,
        source_width: u32,
        source_height: u32,
    },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("tool option `{0}` is not recognised")]
    InvalidToolOption(String),

    #[error("invalid value for tool option `{name}`: {reason}")]
    InvalidOptionValue { name: &'static str, reason: String },

    #[error("no canvas is active")]
    NoActiveCanvas,
}

/// Result type for core operations
pub type PaintResult<T> = Result<T, PaintError>;

impl PaintError {
    /// True for conditions that callers may drop on the floor without telling the user.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            Self::NothingToUndo
                | Self::NothingToRedo
                | Self::InvalidToolOption(_)
                | Self::NoActiveCanvas
        )
    }
}
