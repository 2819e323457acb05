use super::super::PlotpickApp;
use crate::types::AxisEnd;
use egui::{Key, TextEdit};

/// Parse a calibration value typed by the user; a decimal comma is accepted.
fn parse_value_text(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl PlotpickApp {
    pub(crate) fn ui_value_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.value_prompt.as_mut() else {
            return;
        };
        let mut open = true;
        let mut accepted = false;
        let mut cancelled = false;
        let title = format!("Set {} {} value", prompt.end.label(), prompt.axis);
        egui::Window::new(title)
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let hint = match prompt.end {
                    AxisEnd::Min => "Value at the lower reference mark",
                    AxisEnd::Max => "Value at the upper reference mark",
                };
                ui.label(hint);
                let edit = ui.add(TextEdit::singleline(&mut prompt.text).desired_width(160.0));
                if !prompt.focus_requested {
                    edit.request_focus();
                    prompt.focus_requested = true;
                }
                let valid = parse_value_text(&prompt.text).is_some();
                if !valid && !prompt.text.trim().is_empty() {
                    ui.colored_label(ui.visuals().error_fg_color, "Enter a finite number");
                }
                let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                ui.horizontal(|ui| {
                    if ui.add_enabled(valid, egui::Button::new("OK")).clicked() || (enter && valid) {
                        accepted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if accepted {
            self.apply_value_prompt();
        } else if cancelled || !open {
            self.value_prompt = None;
        }
    }

    fn apply_value_prompt(&mut self) {
        let Some(prompt) = self.value_prompt.take() else {
            return;
        };
        let Some(value) = parse_value_text(&prompt.text) else {
            return;
        };
        let result =
            self.digitizer
                .set_axis_endpoint_at_pixel(prompt.axis, prompt.end, prompt.pixel, value);
        match result {
            Ok(()) if self.digitizer.is_ready() => {
                self.set_status("Calibration complete.");
            }
            Ok(()) => {
                self.set_status(format!(
                    "{} {} set to {value}.",
                    prompt.end.label(),
                    prompt.axis
                ));
            }
            Err(err) => self.set_status(format!("Calibration rejected: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_comma_decimals() {
        assert_eq!(parse_value_text(" 12.5 "), Some(12.5));
        assert_eq!(parse_value_text("0,25"), Some(0.25));
        assert_eq!(parse_value_text("-1e3"), Some(-1000.0));
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert_eq!(parse_value_text(""), None);
        assert_eq!(parse_value_text("abc"), None);
        assert_eq!(parse_value_text("inf"), None);
        assert_eq!(parse_value_text("NaN"), None);
    }
}
