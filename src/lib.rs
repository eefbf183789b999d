#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod buffer;
pub mod color;
pub mod components;
pub mod document;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod history;
pub mod input;
pub mod io;
pub mod panels;
pub mod raster;
pub mod state;
pub mod stroke;
pub mod texture_manager;
pub mod tool;

pub use app::PaintApp;
pub use buffer::PixelBuffer;
pub use color::Color;
pub use document::{Canvas, CanvasId, Workspace};
pub use error::{PaintError, PaintResult};
pub use event::{EditorEvent, EventBus, EventQueue};
pub use geometry::{CanvasView, Point, Rect};
pub use history::{EditHistory, UndoRecord};
pub use state::{EditorContext, EditorSettings, EditorState, SettingsStore};
pub use stroke::StrokeSession;
pub use tool::{OptionValue, Tool, ToolKind, ToolOption, ToolType};
