//! Pixel algorithms used by the tools. Everything here is a pure function of
//! its inputs; the tools own all state.

pub mod blend;
mod fill;
mod line;
mod sample;
mod stamp;

pub use fill::{scanline_fill, DistanceMetric, FillOverlay, FillParams};
pub use line::rasterize_line;
pub use sample::sample_at;
pub use stamp::{BrushStamp, StampCache, DEFAULT_SUPERSAMPLE, STAMP_PADDING};
