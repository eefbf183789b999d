use std::path::Path;

use eframe::egui;

use crate::document::Canvas;
use crate::io;

/// Turns files dropped onto the window into canvases
#[derive(Debug)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
    history_depth: usize,
}

impl FileHandler {
    pub fn new(history_depth: usize) -> Self {
        Self {
            dropped_files: Vec::new(),
            history_depth,
        }
    }

    /// Collects newly dropped files from the UI context.
    /// Returns true if there is anything to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files.extend(i.raw.dropped_files.iter().cloned());
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Decodes every pending dropped file. Files that fail are logged and skipped.
    pub fn process_dropped_files(&mut self) -> Vec<Canvas> {
        let mut canvases = Vec::new();
        for file in std::mem::take(&mut self.dropped_files) {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            if !Self::is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {file_name}");
                continue;
            }

            let loaded = if let Some(bytes) = &file.bytes {
                log::info!("Processing image from memory: {file_name} ({} bytes)", bytes.len());
                io::load_image_from_memory(bytes)
            } else if let Some(path) = &file.path {
                io::load_image(path)
            } else {
                log::warn!("Dropped file has no accessible data: {file_name}");
                continue;
            };

            match loaded {
                Ok(buffer) => {
                    let name = display_name(&file_name);
                    canvases.push(Canvas::from_buffer(name, buffer, self.history_depth));
                }
                Err(err) => log::error!("Failed to open {file_name}: {err}"),
            }
        }
        canvases
    }

    /// Check if a file is an image based on MIME type or extension
    fn is_image_file(file: &egui::DroppedFile) -> bool {
        if !file.mime.is_empty() {
            file.mime.starts_with("image/")
        } else if let Some(path) = &file.path {
            io::is_supported(path)
        } else {
            io::is_supported(Path::new(&file.name))
        }
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

/// File name without directories, for the canvas title
fn display_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_owned())
}
