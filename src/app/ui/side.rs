//! Side panel listing every sample in data coordinates.

use super::super::PlotpickApp;
use crate::export::format_value;
use egui::RichText;

impl PlotpickApp {
    pub(crate) fn ui_sample_list(&self, ui: &mut egui::Ui) {
        ui.heading("Samples");
        ui.separator();
        let samples = self.digitizer.samples();
        if samples.is_empty() {
            ui.label("Left-click the image to add samples.");
            return;
        }
        let mapped = match self.digitizer.mapped_samples() {
            Ok(mapped) => mapped,
            Err(err) => {
                ui.label(format!("{} samples recorded.", samples.len()));
                ui.label(RichText::new(err.to_string()).small().weak());
                return;
            }
        };
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (idx, p) in mapped.iter().enumerate() {
                    ui.label(
                        RichText::new(format!(
                            "{:>3}. {} × {}",
                            idx + 1,
                            format_value(p.x),
                            format_value(p.y)
                        ))
                        .monospace(),
                    );
                }
            });
    }
}
