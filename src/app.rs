use std::path::PathBuf;

use crate::document::Canvas;
use crate::error::PaintError;
use crate::event::{EditorEvent, EventLogger, EventQueue};
use crate::file_handler::FileHandler;
use crate::geometry::CanvasView;
use crate::input::{route_event, InputHandler};
use crate::io;
use crate::panels::{central_panel, tools_panel};
use crate::state::{EditorContext, EditorSettings, SettingsStore};
use crate::texture_manager::TextureManager;
use crate::tool::OptionValue;

/// The egui shell around [`EditorContext`].
///
/// Only the settings are persisted between runs; canvases are not.
#[derive(Debug)]
pub struct PaintApp {
    context: EditorContext,
    events: EventQueue,
    input: InputHandler,
    files: FileHandler,
    textures: TextureManager,
    store: Option<SettingsStore>,
    view: Option<CanvasView>,
    zoom: f32,
    /// Path typed into the open/save field
    pub file_path: String,
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    ///
    /// Settings stored by eframe from the previous run win over `settings`.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: EditorSettings,
        store: Option<SettingsStore>,
    ) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<EditorSettings>(storage, eframe::APP_KEY))
            .unwrap_or(settings);
        Self::with_settings(settings, store)
    }

    /// Builds the app without a window, e.g. for tests
    pub fn with_settings(settings: EditorSettings, store: Option<SettingsStore>) -> Self {
        let events = EventQueue::new();
        let mut context = EditorContext::new(settings.clone());
        context.event_bus.subscribe(Box::new(events.clone()));
        context.event_bus.subscribe(Box::new(EventLogger));

        let defaults = settings.new_canvas;
        context.create_canvas(defaults.width, defaults.height, defaults.background);

        Self {
            context,
            events,
            input: InputHandler::new(),
            files: FileHandler::new(settings.history_depth),
            textures: TextureManager::new(),
            store,
            view: None,
            zoom: 1.0,
            file_path: "canvas.png".to_owned(),
            status: None,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.context
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(0.25, 32.0);
    }

    pub fn set_tools_panel_rect(&mut self, rect: egui::Rect) {
        self.input.set_tools_panel_rect(rect);
    }

    /// Sets a tool option from the UI. Rejected options are logged and ignored.
    pub fn set_tool_option(&mut self, name: &str, value: OptionValue) {
        if let Err(err) = self.context.set_tool_option(name, value) {
            log::warn!("Ignoring option {name}: {err}");
        }
    }

    pub fn undo(&mut self) {
        report(self.context.undo().map(|_| ()));
    }

    pub fn redo(&mut self) {
        report(self.context.redo().map(|_| ()));
    }

    pub fn new_canvas(&mut self) {
        let defaults = self.context.settings().new_canvas;
        self.context
            .create_canvas(defaults.width, defaults.height, defaults.background);
    }

    /// Opens the image at `file_path` as a new canvas
    pub fn open_file(&mut self) {
        let path = PathBuf::from(&self.file_path);
        match io::load_image(&path) {
            Ok(buffer) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| self.file_path.clone());
                let depth = self.context.settings().history_depth;
                self.context.add_canvas(Canvas::from_buffer(name, buffer, depth));
                self.status = None;
            }
            Err(err) => {
                log::warn!("Failed to open {}: {err}", path.display());
                self.status = Some(format!("Open failed: {err}"));
            }
        }
    }

    /// Saves the active canvas to `file_path`
    pub fn save_active_canvas(&mut self) {
        let Some(canvas) = self.context.active_canvas() else {
            return;
        };
        let path = PathBuf::from(&self.file_path);
        self.status = match io::save_image(canvas.buffer(), &path) {
            Ok(()) => Some(format!("Saved {}", path.display())),
            Err(err) => {
                log::warn!("Failed to save {}: {err}", path.display());
                Some(format!("Save failed: {err}"))
            }
        };
    }

    /// Recomputes where the active canvas sits inside the central panel
    pub fn layout_canvas(&mut self, panel: egui::Rect) -> Option<CanvasView> {
        self.input.set_central_panel_rect(panel);
        self.view = self.context.active_canvas().map(|canvas| {
            let size = egui::vec2(canvas.width() as f32, canvas.height() as f32) * self.zoom;
            let origin = (panel.center() - size / 2.0).max(panel.min).round();
            CanvasView::new(origin, self.zoom, canvas.width(), canvas.height())
        });
        self.view
    }

    /// Routes this frame's input, then ticks the tool in flight with the
    /// current pointer position.
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        for event in self.input.process_input(ctx) {
            route_event(&event, &mut self.context, self.view.as_ref());
        }
        if let (Some(view), Some(pos)) = (self.view, self.input.last_pointer_pos()) {
            report(self.context.frame_update(view.screen_to_canvas(pos)));
        }
        self.process_events(ctx);
    }

    /// Drains editor events into the texture cache
    fn process_events(&mut self, ctx: &egui::Context) {
        for event in self.events.drain() {
            self.textures.handle_event(&event);
            if matches!(event, EditorEvent::CanvasChanged { .. }) {
                ctx.request_repaint();
            }
        }
        let workspace = self.context.workspace();
        self.textures.retain(|id| workspace.get(id).is_some());
    }

    /// Texture showing the active canvas, uploaded as needed
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        let canvas = self.context.active_canvas()?;
        match self.textures.texture_for(canvas, ctx) {
            Ok(id) => Some(id),
            Err(err) => {
                log::error!("Failed to upload canvas texture: {err}");
                None
            }
        }
    }

    fn open_dropped_files(&mut self, ctx: &egui::Context) {
        self.files.preview_files_being_dropped(ctx);
        if self.files.check_for_dropped_files(ctx) {
            for canvas in self.files.process_dropped_files() {
                self.context.add_canvas(canvas);
            }
        }
    }
}

fn report(result: Result<(), PaintError>) {
    match result {
        Ok(()) => {}
        Err(err) if err.is_benign() => log::debug!("Ignored: {err}"),
        Err(err) => log::warn!("{err}"),
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = self.context.settings();
        eframe::set_value(storage, eframe::APP_KEY, &settings);
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&settings) {
                log::warn!("Failed to write settings: {err}");
            }
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.open_dropped_files(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_default_canvas() {
        let app = PaintApp::with_settings(EditorSettings::default(), None);
        let canvas = app.context().active_canvas().unwrap();
        assert_eq!(canvas.width(), 640);
        assert_eq!(canvas.height(), 480);
    }

    #[test]
    fn test_layout_centers_canvas() {
        let mut settings = EditorSettings::default();
        settings.new_canvas.width = 100;
        settings.new_canvas.height = 50;
        let mut app = PaintApp::with_settings(settings, None);
        app.set_zoom(2.0);

        let panel = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 300.0));
        let view = app.layout_canvas(panel).unwrap();

        assert_eq!(view.origin, egui::pos2(100.0, 100.0));
        assert!(view.hover_point(101.0, 101.0));
        assert!(!view.hover_point(99.0, 101.0));
    }
}
