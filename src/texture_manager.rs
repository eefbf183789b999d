use std::collections::HashMap;

use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::document::{Canvas, CanvasId};
use crate::error::PaintResult;
use crate::event::EditorEvent;
use crate::geometry::Rect;

/// Keeps one GPU texture per canvas and re-uploads only the rectangles that
/// changed since the last frame.
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<CanvasId, TextureHandle>,
    /// Union of the rectangles changed since the last upload, per canvas
    dirty: HashMap<CanvasId, Rect>,
    uploads: u64,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("textures", &self.textures.len())
            .field("dirty", &self.dirty)
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records which pixels need re-uploading
    pub fn handle_event(&mut self, event: &EditorEvent) {
        if let EditorEvent::CanvasChanged { canvas, rect } = event {
            self.mark_dirty(*canvas, *rect);
        }
    }

    pub fn mark_dirty(&mut self, canvas: CanvasId, rect: Rect) {
        if !self.textures.contains_key(&canvas) {
            return;
        }
        let entry = self.dirty.entry(canvas).or_default();
        *entry = entry.union(&rect);
    }

    /// Gets the canvas texture, creating it or patching its dirty rectangle first
    pub fn texture_for(&mut self, canvas: &Canvas, ctx: &Context) -> PaintResult<TextureId> {
        let id = canvas.id();
        if let Some(handle) = self.textures.get_mut(&id) {
            if let Some(rect) = self.dirty.remove(&id) {
                let rect = rect.intersect(&canvas.buffer().bounds());
                if let Some(rect) = rect {
                    let patch = canvas.buffer().copy_region(&rect)?;
                    handle.set_partial(
                        [rect.x as usize, rect.y as usize],
                        patch.to_color_image(),
                        TextureOptions::NEAREST,
                    );
                    self.uploads += 1;
                }
            }
            return Ok(handle.id());
        }

        let handle = ctx.load_texture(
            format!("canvas_{id}"),
            canvas.buffer().to_color_image(),
            TextureOptions::NEAREST,
        );
        let texture_id = handle.id();
        self.textures.insert(id, handle);
        self.dirty.remove(&id);
        self.uploads += 1;
        Ok(texture_id)
    }

    /// Drops textures of canvases that are no longer open
    pub fn retain(&mut self, open: impl Fn(CanvasId) -> bool) {
        self.textures.retain(|id, _| open(*id));
        self.dirty.retain(|id, _| open(*id));
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }

    /// Number of full or partial uploads so far
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::history::MAX_HISTORY_DEPTH;

    fn canvas() -> Canvas {
        Canvas::new("test", 8, 8, Color::WHITE, MAX_HISTORY_DEPTH)
    }

    #[test]
    fn test_cache_hit() {
        let ctx = Context::default();
        let canvas = canvas();
        let mut manager = TextureManager::new();

        let first = manager.texture_for(&canvas, &ctx).unwrap();
        let second = manager.texture_for(&canvas, &ctx).unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
        assert_eq!(manager.uploads(), 1);
    }

    #[test]
    fn test_changed_rect_is_uploaded_once() {
        let ctx = Context::default();
        let canvas = canvas();
        let mut manager = TextureManager::new();
        manager.texture_for(&canvas, &ctx).unwrap();

        manager.handle_event(&EditorEvent::CanvasChanged {
            canvas: canvas.id(),
            rect: Rect::new(1, 1, 2, 2),
        });
        manager.handle_event(&EditorEvent::CanvasChanged {
            canvas: canvas.id(),
            rect: Rect::new(5, 5, 1, 1),
        });
        manager.texture_for(&canvas, &ctx).unwrap();
        manager.texture_for(&canvas, &ctx).unwrap();

        assert_eq!(manager.uploads(), 2);
    }

    #[test]
    fn test_retain_drops_closed_canvases() {
        let ctx = Context::default();
        let canvas = canvas();
        let mut manager = TextureManager::new();
        manager.texture_for(&canvas, &ctx).unwrap();

        manager.retain(|_| false);

        assert_eq!(manager.cache_size(), 0);
    }
}
