/// The interaction state machine of the editor.
///
/// ```text
///            pointer down (brush, fill)
///   ┌──────┐ ───────────────────────► ┌──────────┐
///   │      │ ◄─────────────────────── │ Painting │
///   │ Idle │      pointer up          └──────────┘
///   │      │ ───────────────────────► ┌──────────┐
///   └──────┘ ◄─────────────────────── │ Sampling │
///            pointer down (dropper)   └──────────┘
/// ```
///
/// Painting and Sampling never lead into each other: every interaction
/// returns to Idle before the next one can start.
use serde::{Deserialize, Serialize};

use crate::tool::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditorState {
    /// No interaction in progress
    #[default]
    Idle,
    /// A brush stroke or fill is between pointer-down and its commit
    Painting { tool: ToolKind },
    /// The dropper is waiting to read a colour
    Sampling,
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        match (self, new_state) {
            (EditorState::Idle, EditorState::Idle) => false,
            (EditorState::Idle, _) => true,
            (EditorState::Painting { .. }, EditorState::Idle) => true,
            (EditorState::Sampling, EditorState::Idle) => true,
            _ => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_painting(&self) -> bool {
        matches!(self, EditorState::Painting { .. })
    }

    pub fn is_sampling(&self) -> bool {
        matches!(self, EditorState::Sampling)
    }

    /// State entered when `tool` receives a pointer-down
    pub fn for_tool(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Dropper => EditorState::Sampling,
            tool => EditorState::Painting { tool },
        }
    }
}
