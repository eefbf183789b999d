mod editor_state;
pub mod context;
mod persistence;

pub use editor_state::EditorState;
pub use context::EditorContext;
pub use persistence::{
    EditorSettings,
    NewCanvasDefaults,
    SettingsError,
    SettingsResult,
    SettingsStore,
};
