use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::document::Canvas;
use crate::error::PaintResult;
use crate::geometry::{Point, Rect};
use crate::history::UndoRecord;
use crate::raster::{blend, scanline_fill, DistanceMetric, FillParams};
use super::super::trait_def::{Tool, ToolOutcome};
use super::super::ToolOption;

/// Flood fill settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    pub color: Color,
    pub opacity: u8,
    /// Fraction of the maximum colour distance, 0..=1
    pub threshold: f32,
    pub metric: DistanceMetric,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 255,
            threshold: 0.1,
            metric: DistanceMetric::Squared,
        }
    }
}

/// A fill between pointer-down and pointer-up.
#[derive(Debug, Clone)]
struct PendingFill {
    seed: Point,
    config: FillConfig,
    /// The whole buffer: how far the fill reaches is unknown up front
    pre_image: PixelBuffer,
    /// Filled bounding rectangle once the fill has run; `Some(None)` when it reached nothing
    applied: Option<Option<Rect>>,
}

/// Bucket fill
#[derive(Debug, Clone, Default)]
pub struct FillTool {
    config: FillConfig,
    pending: Option<PendingFill>,
}

impl FillTool {
    pub fn new(config: FillConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Runs the fill against the pre-image and writes the composite into the
    /// canvas. Runs at most once per interaction.
    fn run(pending: &mut PendingFill, canvas: &mut Canvas) -> PaintResult<Option<Rect>> {
        if let Some(applied) = pending.applied {
            return Ok(applied);
        }
        let params = FillParams {
            color: pending.config.color,
            threshold: pending.config.threshold,
            metric: pending.config.metric,
        };
        let result = scanline_fill(&pending.pre_image, pending.seed, &params)?;
        if let Some(bounds) = result.bounds {
            let composited = blend::composite(
                &pending.pre_image.copy_region(&bounds)?,
                &result.overlay.copy_region(&bounds)?,
                pending.config.opacity,
            )?;
            canvas.buffer_mut().blit_region(&composited, &bounds)?;
        }
        pending.applied = Some(result.bounds);
        Ok(result.bounds)
    }
}

impl Tool for FillTool {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn on_pointer_down(&mut self, point: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        if self.pending.is_some() {
            return Ok(ToolOutcome::Nothing);
        }
        // validates the seed before anything is captured
        canvas.buffer().get(point)?;
        debug!("Fill started at ({}, {})", point.x, point.y);
        self.pending = Some(PendingFill {
            seed: point,
            config: self.config,
            pre_image: canvas.buffer().clone(),
            applied: None,
        });
        Ok(ToolOutcome::Nothing)
    }

    fn on_frame_update(&mut self, _pointer: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(ToolOutcome::Nothing);
        };
        if pending.applied.is_some() {
            return Ok(ToolOutcome::Nothing);
        }
        Ok(Self::run(pending, canvas)?.map_or(ToolOutcome::Nothing, ToolOutcome::Changed))
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(ToolOutcome::Nothing);
        };
        let Some(bounds) = Self::run(&mut pending, canvas)? else {
            return Ok(ToolOutcome::Nothing);
        };
        canvas.commit(UndoRecord::capture(&pending.pre_image, bounds)?);
        info!("Fill committed over {bounds:?}");
        Ok(ToolOutcome::Committed(bounds))
    }

    fn set_option(&mut self, option: ToolOption) -> PaintResult<()> {
        match option {
            ToolOption::PaletteColour(color) => self.config.color = color.with_alpha(255),
            ToolOption::Opacity(opacity) => self.config.opacity = opacity,
            ToolOption::Threshold(threshold) => self.config.threshold = threshold,
            ToolOption::BrushSize(_) => return Err(option.unsupported()),
        }
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}
