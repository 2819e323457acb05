use super::super::PlotpickApp;

impl PlotpickApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let can_use = self.digitizer.can_use_samples();
            self.ui_file_menu(ui, can_use);
            self.ui_edit_menu(ui);
            self.ui_view_menu(ui);
            self.ui_tools_menu(ui, can_use);
            ui.menu_button("Help", |ui| {
                if ui.button("About…").clicked() {
                    self.about_open = true;
                    ui.close();
                }
            });
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui, can_use: bool) {
        ui.menu_button("File", |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open an image. You can also drag & drop into the center.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }
            ui.separator();
            if ui
                .add_enabled(
                    can_use,
                    egui::Button::new("Export CSV…").shortcut_text("Ctrl+S"),
                )
                .clicked()
            {
                self.start_export_csv();
                ui.close();
            }
            if ui
                .add_enabled(
                    can_use,
                    egui::Button::new("Copy samples").shortcut_text("Ctrl+Shift+C"),
                )
                .on_hover_text("Copy samples as tab-separated text")
                .clicked()
            {
                self.copy_samples_to_clipboard();
                ui.close();
            }
            ui.separator();
            if ui
                .add(egui::Button::new("Quit").shortcut_text("Ctrl+Q"))
                .clicked()
            {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn ui_edit_menu(&mut self, ui: &mut egui::Ui) {
        let can_clear = self.digitizer.can_clear_samples();
        ui.menu_button("Edit", |ui| {
            if ui
                .add_enabled(can_clear, egui::Button::new("Clear samples"))
                .clicked()
            {
                self.clear_samples();
                ui.close();
            }
        });
    }

    fn ui_view_menu(&mut self, ui: &mut egui::Ui) {
        let has_image = self.image.is_some();
        ui.menu_button("View", |ui| {
            if ui
                .add_enabled(
                    has_image,
                    egui::Button::new("Zoom in").shortcut_text("Ctrl++"),
                )
                .clicked()
            {
                self.zoom_in();
            }
            if ui
                .add_enabled(
                    has_image,
                    egui::Button::new("Zoom out").shortcut_text("Ctrl+-"),
                )
                .clicked()
            {
                self.zoom_out();
            }
            if ui
                .add_enabled(
                    has_image,
                    egui::Button::new("Reset zoom").shortcut_text("Ctrl+0"),
                )
                .clicked()
            {
                self.digitizer.reset_zoom();
                ui.close();
            }
            ui.separator();
            ui.checkbox(&mut self.prefs.show_grid, "Show grid");
            ui.checkbox(&mut self.prefs.draw_lines, "Draw lines");
        });
    }

    fn ui_tools_menu(&mut self, ui: &mut egui::Ui, can_use: bool) {
        ui.menu_button("Tools", |ui| {
            if ui
                .add_enabled(can_use, egui::Button::new("Path length"))
                .on_hover_text("Length of the open path through all samples")
                .clicked()
            {
                self.show_path_length();
                ui.close();
            }
            if ui
                .add_enabled(can_use, egui::Button::new("Polygon area"))
                .on_hover_text("Area of the polygon closed by the samples")
                .clicked()
            {
                self.show_polygon_area();
                ui.close();
            }
        });
    }
}
