use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::Color;
use crate::history::MAX_HISTORY_DEPTH;
use crate::raster::DEFAULT_SUPERSAMPLE;
use crate::tool::{BrushConfig, FillConfig};

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access settings file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Defaults for the "new canvas" action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCanvasDefaults {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for NewCanvasDefaults {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background: Color::WHITE,
        }
    }
}

/// Everything configurable about the editor core.
///
/// Unknown or missing fields fall back to their defaults, so older settings
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub brush: BrushConfig,
    pub fill: FillConfig,
    /// Undo records kept per canvas
    pub history_depth: usize,
    /// Supersampling factor of the brush dab
    pub brush_supersample: u32,
    pub new_canvas: NewCanvasDefaults,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            brush: BrushConfig::default(),
            fill: FillConfig::default(),
            history_depth: MAX_HISTORY_DEPTH,
            brush_supersample: DEFAULT_SUPERSAMPLE,
            new_canvas: NewCanvasDefaults::default(),
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Reads and writes [`EditorSettings`] as a JSON file
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the settings, or the defaults if the file does not exist yet
    pub fn load(&self) -> SettingsResult<EditorSettings> {
        if !self.path.exists() {
            log::info!("No settings at {}, using defaults", self.path.display());
            return Ok(EditorSettings::default());
        }
        let json = fs::read_to_string(&self.path)?;
        EditorSettings::from_json(&json)
    }

    pub fn save(&self, settings: &EditorSettings) -> SettingsResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, settings.to_json()?)?;
        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
