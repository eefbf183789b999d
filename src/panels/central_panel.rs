use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_rect = ui.available_rect_before_wrap();

        // input first so this frame's strokes are visible this frame
        let view = app.layout_canvas(canvas_rect);
        app.handle_input(ctx);

        let Some(view) = view else {
            ui.centered_and_justified(|ui| ui.label("No canvas open. Create one or drop an image here."));
            return;
        };

        let screen_rect = view.screen_rect();
        if let Some(texture) = app.canvas_texture(ctx) {
            let painter = ui.painter_at(canvas_rect);
            painter.rect_filled(screen_rect, 0.0, egui::Color32::from_gray(60));
            painter.image(
                texture,
                screen_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
            painter.rect_stroke(screen_rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(120)));
        }

        if let Some(pos) = ctx.pointer_hover_pos() {
            if view.hover_point(pos.x, pos.y) {
                let icon = if app.context().current_state().is_sampling() {
                    egui::CursorIcon::Cell
                } else {
                    egui::CursorIcon::Crosshair
                };
                ctx.set_cursor_icon(icon);
            }
        }
    });
}
