use crate::PaintApp;
use crate::color::PixelColor;
use crate::tools::ToolType;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active_tool = app.state().tool();
            for tool in ToolType::ALL {
                let label = format!("{} ({})", tool.label(), tool.shortcut().name());
                if ui.selectable_label(active_tool == tool, label).clicked() {
                    app.state_mut().set_tool(tool);
                }
            }
            ui.separator();

            // The picker edits a Color32; the sentinel shows as fully transparent.
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.state().color().to_color32().unwrap_or(egui::Color32::TRANSPARENT);
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::OnlyBlend,
                )
                .changed()
                {
                    app.state_mut().select_color(PixelColor::from_color32(color));
                }
            });
            ui.label(format!("Current: {}", app.state().color()));

            let mut show_lines = app.renderer().show_grid_lines();
            if ui.checkbox(&mut show_lines, "Grid lines").changed() {
                app.renderer_mut().set_show_grid_lines(show_lines);
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.state().can_undo();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                ui.label(format!("History: {}", app.state().history().len()));
            });
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Width:");
                ui.add(egui::DragValue::new(app.new_width_mut()).range(1..=128));
                if ui.button("New").clicked() {
                    app.new_sheet();
                }
            });
            ui.separator();

            ui.label("File:");
            ui.text_edit_singleline(app.file_name_mut());
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    app.save_file();
                }
                if ui.button("Open").clicked() {
                    app.open_file();
                }
            });

            if let Some(status) = app.status() {
                ui.separator();
                ui.small(status);
            }
        });
}
