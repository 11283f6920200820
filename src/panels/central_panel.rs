use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // Canvas keeps the sheet's size; centre it in whatever space is left.
        let side = app.state().grid().canvas_size();
        let available = ui.available_rect_before_wrap();
        let canvas_rect = egui::Rect::from_center_size(available.center(), egui::vec2(side, side));

        let (response, painter) = ui.allocate_painter(available.size(), egui::Sense::click_and_drag());

        app.handle_input(ctx, canvas_rect, response.hovered());
        app.render_canvas(&painter, canvas_rect);

        painter.rect_stroke(
            canvas_rect,
            0.0,
            egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
    });
}
