pub mod brush;
pub mod dropper;
pub mod fill;

pub use brush::{BrushConfig, BrushTool};
pub use dropper::DropperTool;
pub use fill::{FillConfig, FillTool};

use serde::{Deserialize, Serialize};

use crate::document::Canvas;
use crate::error::PaintResult;
use crate::geometry::Point;
use super::trait_def::{Tool, ToolOutcome};
use super::ToolOption;

/// The closed set of tools, without their state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Brush,
    Fill,
    Dropper,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Brush, ToolKind::Fill, ToolKind::Dropper];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Fill => "Fill",
            Self::Dropper => "Dropper",
        }
    }
}

/// Enum representing all available tools, dispatched statically
#[derive(Debug, Clone)]
pub enum ToolType {
    Brush(BrushTool),
    Fill(FillTool),
    Dropper(DropperTool),
}

impl ToolType {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Brush(_) => ToolKind::Brush,
            Self::Fill(_) => ToolKind::Fill,
            Self::Dropper(_) => ToolKind::Dropper,
        }
    }

    pub fn as_brush(&self) -> Option<&BrushTool> {
        match self {
            Self::Brush(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_fill(&self) -> Option<&FillTool> {
        match self {
            Self::Fill(tool) => Some(tool),
            _ => None,
        }
    }

    /// Name of the interaction state, for the tools panel
    pub fn current_state_name(&self) -> &'static str {
        match (self, self.is_busy()) {
            (Self::Dropper(_), true) => "Sampling",
            (_, true) => "Active",
            (_, false) => "Idle",
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Brush(tool) => tool.name(),
            Self::Fill(tool) => tool.name(),
            Self::Dropper(tool) => tool.name(),
        }
    }

    fn on_pointer_down(&mut self, point: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        match self {
            Self::Brush(tool) => tool.on_pointer_down(point, canvas),
            Self::Fill(tool) => tool.on_pointer_down(point, canvas),
            Self::Dropper(tool) => tool.on_pointer_down(point, canvas),
        }
    }

    fn on_frame_update(&mut self, pointer: Point, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        match self {
            Self::Brush(tool) => tool.on_frame_update(pointer, canvas),
            Self::Fill(tool) => tool.on_frame_update(pointer, canvas),
            Self::Dropper(tool) => tool.on_frame_update(pointer, canvas),
        }
    }

    fn on_pointer_up(&mut self, canvas: &mut Canvas) -> PaintResult<ToolOutcome> {
        match self {
            Self::Brush(tool) => tool.on_pointer_up(canvas),
            Self::Fill(tool) => tool.on_pointer_up(canvas),
            Self::Dropper(tool) => tool.on_pointer_up(canvas),
        }
    }

    fn set_option(&mut self, option: ToolOption) -> PaintResult<()> {
        match self {
            Self::Brush(tool) => tool.set_option(option),
            Self::Fill(tool) => tool.set_option(option),
            Self::Dropper(tool) => tool.set_option(option),
        }
    }

    fn is_busy(&self) -> bool {
        match self {
            Self::Brush(tool) => tool.is_busy(),
            Self::Fill(tool) => tool.is_busy(),
            Self::Dropper(tool) => tool.is_busy(),
        }
    }
}
