use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::document::Canvas;
use crate::error::PaintResult;
use crate::geometry::{Point, Rect};
use crate::raster::{StampCache, DEFAULT_SUPERSAMPLE};
use crate::stroke::StrokeSession;
use super::super::trait_def::{Tool, ToolOutcome};
use super::super::ToolOption;

/// Brush settings. A copy is taken when a stroke starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub color: Color,
    /// Dab diameter in pixels, at least 1
    pub diameter: u32,
    /// Ceiling on the alpha a single stroke can reach
    pub opacity: u8,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            diameter: 16,
            opacity: 255,
        }
    }
}

/// Freehand soft round brush
#[derive(Debug, Clone)]
pub struct BrushTool {
    config: BrushConfig,
    supersample: u32,
    stamps: StampCache,
    session: Option<StrokeSession>,
}

impl Default for BrushTool {
    fn default() -> Self {
        Self::new(BrushConfig::default(), DEFAULT_SUPERSAMPLE)
    }
}

impl BrushTool {
    pub fn new(config: BrushConfig, supersample: u32) -> Self {
        Self {
            config: BrushConfig {
                diameter: config.diameter.max(1),
                ..config
            },
            supersample,
            stamps: StampCache::new(),
            session: None,
        }
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// The stroke in progress, if any
    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    /// How many times the dab bitmap has been rendered
    pub fn stamp_generations(&self) -> u64 {
        self.stamps.generations()
    }

    /// Starts a stroke at `point`, laying the first dab
    pub fn start_stroke(&mut self, point: Point, canvas: &mut Canvas) -> PaintResult<Option<Rect>> {
        let config = self.config;
        let stamp = self
            .stamps
            .get(config.color, config.diameter, self.supersample)
            .clone();
        let (session, dirty) = StrokeSession::begin(config, stamp, point, canvas.buffer_mut())?;
        debug!("Brush stroke started at ({}, {})", point.x, point.y);
        self.session = Some(session);
        Ok(dirty)
    }

    /// Commits the current stroke, returning the rectangle pushed to history
    pub fn finish_stroke(&mut self, canvas: &mut Canvas) -> Option<Rect> {
        let record = self.session.take()?.finish()?;
        let rect = record.rect();
        canvas.commit(record);
        info!("Brush stroke committed over {rect:?}");
        Some(rect)
    }
}

impl Tool for BrushTool {
    fn name(&self) -> &'static str {
        "Brush"
    }

    fn on_pointer_down(&mut self, point: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        if self.session.is_some() {
            return Ok(ToolOutcome::Nothing);
        }
        Ok(self
            .start_stroke(point, canvas)?
            .map_or(ToolOutcome::Nothing, ToolOutcome::Changed))
    }

    fn on_frame_update(&mut self, pointer: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        let Some(session) = self.session.as_mut() else {
            return Ok(ToolOutcome::Nothing);
        };
        Ok(session
            .extend_to(pointer, canvas.buffer_mut())?
            .map_or(ToolOutcome::Nothing, ToolOutcome::Changed))
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        Ok(self
            .finish_stroke(canvas)
            .map_or(ToolOutcome::Nothing, ToolOutcome::Committed))
    }

    fn set_option(&mut self, option: ToolOption) -> PaintResult<()> {
        match option {
            ToolOption::PaletteColour(color) => self.config.color = color,
            ToolOption::Opacity(opacity) => self.config.opacity = opacity,
            ToolOption::BrushSize(size) => self.config.diameter = size.max(1),
            ToolOption::Threshold(_) => return Err(option.unsupported()),
        }
        Ok(())
    }

    fn is_busy(&self) -> bool {
        self.session.is_some()
    }
}
