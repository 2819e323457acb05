use super::super::{APP_NAME, APP_VERSION, PlotpickApp};
use crate::export::format_value;
use egui::{Color32, RichText};

impl PlotpickApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        let samples = self.digitizer.samples().len();
        ui.horizontal(|ui| {
            if let Some(name) = &self.image_label {
                ui.label(RichText::new(name.as_str()).small().strong());
                ui.separator();
            }
            ui.label(
                RichText::new(format!("Samples: {samples}"))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            ui.separator();
            let zoom_pct = self.digitizer.zoom().scale() * 100.0;
            ui.label(
                RichText::new(format!("Zoom: {zoom_pct:.0}%"))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            if let Some(p) = self.hover_data {
                ui.separator();
                ui.label(
                    RichText::new(format!("{} × {}", format_value(p.x), format_value(p.y)))
                        .small()
                        .monospace(),
                );
            } else if self.image.is_some() && !self.digitizer.is_ready() {
                ui.separator();
                ui.label(
                    RichText::new("Right-click the image to calibrate both axes")
                        .small()
                        .color(Color32::from_rgb(220, 160, 60)),
                );
            }
            if let Some(msg) = &self.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    pub(crate) fn ui_message_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.message.as_ref() else {
            return;
        };
        let mut open = true;
        let mut dismissed = false;
        egui::Window::new(message.title)
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(message.body.as_str());
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed || !open {
            self.message = None;
        }
    }

    pub(crate) fn ui_about_window(&mut self, ctx: &egui::Context) {
        if !self.about_open {
            return;
        }
        egui::Window::new(format!("About {APP_NAME}"))
            .open(&mut self.about_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading(format!("{APP_NAME} {APP_VERSION}"));
                ui.label(env!("CARGO_PKG_DESCRIPTION"));
            });
    }
}
