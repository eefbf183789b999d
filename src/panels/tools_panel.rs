use crate::color::Color;
use crate::components::ToolButton;
use crate::tool::{OptionValue, ToolKind, ToolOption, ToolType};
use crate::PaintApp;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            app.set_tools_panel_rect(ui.max_rect());

            ui.heading("Tools");

            let active_kind = app.context().active_tool_kind();
            ui.horizontal(|ui| {
                for kind in ToolKind::ALL {
                    if ToolButton::new(kind, kind == active_kind).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind.name());
                        app.context_mut().set_active_tool(kind);
                    }
                }
            });

            ui.separator();
            let active_tool = app.context().active_tool();
            ui.horizontal(|ui| {
                ui.heading("Tool Options");
                ui.label(format!("(State: {})", active_tool.current_state_name()));
            });
            tool_options(app, ui);

            ui.separator();
            history_section(app, ui);

            ui.separator();
            canvas_section(app, ui);

            ui.separator();
            file_section(app, ui);
        });
}

/// Widgets for the options the active tool understands
fn tool_options(app: &mut PaintApp, ui: &mut egui::Ui) {
    let (color, opacity, size, threshold) = match app.context().active_tool() {
        ToolType::Brush(brush) => {
            let config = brush.config();
            (Some(config.color), Some(config.opacity), Some(config.diameter), None)
        }
        ToolType::Fill(fill) => {
            let config = fill.config();
            (Some(config.color), Some(config.opacity), None, Some(config.threshold))
        }
        ToolType::Dropper(_) => {
            ui.label("Click the canvas to pick up a colour.");
            return;
        }
    };

    if let Some(color) = color {
        let mut rgb = [color.r, color.g, color.b];
        ui.horizontal(|ui| {
            ui.label("Colour");
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                let picked = Color::rgba(rgb[0], rgb[1], rgb[2], color.a);
                app.set_tool_option(ToolOption::PALETTE_COLOUR, OptionValue::Colour(picked));
            }
        });
    }

    if let Some(mut opacity) = opacity {
        if ui.add(egui::Slider::new(&mut opacity, 0..=255).text("Opacity")).changed() {
            app.set_tool_option(ToolOption::OPACITY, OptionValue::Integer(opacity.into()));
        }
    }

    if let Some(mut size) = size {
        if ui.add(egui::Slider::new(&mut size, 1..=128).text("Size")).changed() {
            app.set_tool_option(ToolOption::BRUSH_SIZE, OptionValue::Integer(size.into()));
        }
    }

    if let Some(mut threshold) = threshold {
        if ui.add(egui::Slider::new(&mut threshold, 0.0..=1.0).text("Threshold")).changed() {
            app.set_tool_option(ToolOption::THRESHOLD, OptionValue::Float(threshold));
        }
    }
}

fn history_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    let (can_undo, can_redo, undo_len, redo_len) = app
        .context()
        .active_canvas()
        .map(|canvas| {
            let history = canvas.history();
            (history.can_undo(), history.can_redo(), history.undo_len(), history.redo_len())
        })
        .unwrap_or_default();

    ui.horizontal(|ui| {
        if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
            app.undo();
        }
        if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
            app.redo();
        }
    });
    ui.horizontal(|ui| {
        ui.label(format!("Undo stack size: {undo_len}"));
        ui.label(format!("Redo stack size: {redo_len}"));
    });
}

fn canvas_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.heading("Canvases");

    if let Some(canvas) = app.context().active_canvas() {
        let history = canvas.history();
        egui::Grid::new("canvas_info_grid")
            .num_columns(2)
            .spacing([20.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label("Size");
                ui.label(format!("{} x {}", canvas.width(), canvas.height()));
                ui.end_row();
                ui.label("History");
                ui.label(format!("{} / {}", history.undo_len(), history.max_depth()));
                ui.end_row();
                ui.label("History memory");
                ui.label(format!("{} KiB", history.memory_usage() / 1024));
                ui.end_row();
            });
    }

    let active = app.context().workspace().active_id();
    let entries: Vec<_> = app
        .context()
        .workspace()
        .canvases()
        .iter()
        .map(|canvas| (canvas.id(), canvas.name().to_owned()))
        .collect();
    for (id, name) in entries {
        if ui.selectable_label(active == Some(id), name).clicked() {
            if let Err(err) = app.context_mut().set_active_canvas(id) {
                log::warn!("Could not switch canvas: {err}");
            }
        }
    }

    ui.horizontal(|ui| {
        if ui.button("New canvas").clicked() {
            app.new_canvas();
        }
        if let Some(id) = active {
            if ui.button("Close").clicked() {
                app.context_mut().close_canvas(id);
            }
        }
    });

    let mut zoom = app.zoom();
    if ui.add(egui::Slider::new(&mut zoom, 0.25..=32.0).logarithmic(true).text("Zoom")).changed() {
        app.set_zoom(zoom);
    }
}

fn file_section(app: &mut PaintApp, ui: &mut egui::Ui) {
    ui.text_edit_singleline(&mut app.file_path);
    ui.horizontal(|ui| {
        if ui.button("Open").clicked() {
            app.open_file();
        }
        if ui.button("Save").clicked() {
            app.save_active_canvas();
        }
    });
    if let Some(status) = app.status() {
        ui.label(status);
    }
}
