mod option;
mod trait_def;
pub mod types;

pub use option::{OptionValue, ToolOption};
pub use trait_def::{Tool, ToolOutcome};
pub use types::{ToolKind, ToolType};

// Re-export specific tool implementations
pub use types::brush::{BrushConfig, BrushTool};
pub use types::dropper::DropperTool;
pub use types::fill::{FillConfig, FillTool};
