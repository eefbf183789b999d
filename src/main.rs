#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use pixel_paint::{EditorSettings, PaintApp, SettingsStore};

/// Where settings live unless `PIXEL_PAINT_SETTINGS` points elsewhere
const DEFAULT_SETTINGS_FILE: &str = "pixel_paint_settings.json";

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let path = std::env::var_os("PIXEL_PAINT_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let store = SettingsStore::new(path);
    let settings = store.load().unwrap_or_else(|err| {
        log::warn!("Ignoring unreadable settings {}: {err}", store.path().display());
        EditorSettings::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Pixel Paint"),
        ..Default::default()
    };
    eframe::run_native(
        "pixel_paint",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaintApp::new(cc, settings, Some(store))))),
    )
}
