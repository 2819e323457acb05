use super::super::{PlotpickApp, ValuePrompt, safe_usize_to_f32};
use crate::export::format_value;
use crate::types::{AxisEnd, AxisKind, XYPoint};
use egui::{Align2, Color32, FontId, PointerButton, Pos2, Rect, Sense, pos2};

const LABEL_OFFSET: f32 = 6.0;

/// Position relative to the image's top-left corner, in display pixels.
fn display_point(rect: Rect, pos: Pos2) -> XYPoint {
    XYPoint::from(pos2(pos.x - rect.min.x, pos.y - rect.min.y))
}

fn screen_pos(rect: Rect, display: XYPoint) -> Pos2 {
    #[allow(clippy::cast_possible_truncation)]
    {
        pos2(
            rect.min.x + display.x as f32,
            rect.min.y + display.y as f32,
        )
    }
}

fn corner_label(x: f64, y: f64) -> String {
    format!("({} × {})", format_value(x), format_value(y))
}

impl PlotpickApp {
    fn handle_dropped_files(&mut self, ui: &egui::Ui) {
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        for f in &dropped_files {
            if let Some(path) = &f.path {
                tracing::debug!(path = %path.display(), "loading dropped path");
                self.start_loading_image_from_path(path.clone());
                return;
            }
            if let Some(bytes) = &f.bytes {
                tracing::debug!(name = %f.name, len = bytes.len(), "loading dropped bytes");
                self.start_loading_image_from_bytes(
                    (!f.name.is_empty()).then(|| f.name.clone()),
                    bytes.to_vec(),
                );
                return;
            }
        }
        if !dropped_files.is_empty() {
            self.set_status("Drop failed: no readable bytes/path");
        }
    }

    pub(crate) fn ui_central_image(&mut self, ui: &mut egui::Ui) {
        self.handle_dropped_files(ui);

        let Some(img) = self.image.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label("Open an image (Ctrl+O) or drop one here.");
            });
            return;
        };
        let (tex_id, img_size) = (img.texture.id(), img.size);
        egui::ScrollArea::both().show(ui, |ui| {
            let base_size = egui::vec2(
                safe_usize_to_f32(img_size[0]),
                safe_usize_to_f32(img_size[1]),
            );
            #[allow(clippy::cast_possible_truncation)]
            let display_size = base_size * self.digitizer.zoom().scale() as f32;
            let image = egui::Image::new((tex_id, display_size));
            let response = ui.add(image.sense(Sense::click()));
            let rect = response.rect;

            self.hover_data = response
                .hover_pos()
                .and_then(|pos| self.digitizer.hover(display_point(rect, pos)));

            if response.clicked_by(PointerButton::Primary)
                && let Some(pos) = response.interact_pointer_pos()
            {
                let display = display_point(rect, pos);
                if let Some(mapped) = self.digitizer.on_click(display) {
                    self.set_status(format!(
                        "Sample {}: {}",
                        self.digitizer.samples().len(),
                        corner_label(mapped.x, mapped.y)
                    ));
                }
            }

            if response.secondary_clicked()
                && let Some(pos) = response.interact_pointer_pos()
            {
                let display = display_point(rect, pos);
                self.context_anchor = Some(self.digitizer.to_original(display));
            }
            response.context_menu(|ui| self.ui_image_context_menu(ui));

            let painter = ui.painter_at(rect);
            if self.prefs.show_grid {
                self.paint_axes(&painter, rect);
            }
            self.paint_samples(&painter, rect);
        });
    }

    fn ui_image_context_menu(&mut self, ui: &mut egui::Ui) {
        let Some(anchor) = self.context_anchor else {
            ui.close();
            return;
        };
        for (axis, end) in [
            (AxisKind::X, AxisEnd::Min),
            (AxisKind::Y, AxisEnd::Min),
            (AxisKind::X, AxisEnd::Max),
            (AxisKind::Y, AxisEnd::Max),
        ] {
            let cal = self.digitizer.mapper().axis(axis);
            let is_set = match end {
                AxisEnd::Min => cal.min().is_some(),
                AxisEnd::Max => cal.max().is_some(),
            };
            let mark = if is_set { "✔ " } else { "" };
            if ui
                .button(format!("{mark}Set {} {axis}", end.label()))
                .clicked()
            {
                self.value_prompt = Some(ValuePrompt {
                    axis,
                    end,
                    pixel: anchor,
                    text: String::new(),
                    focus_requested: false,
                });
                ui.close();
            }
        }
        ui.separator();
        ui.checkbox(&mut self.prefs.show_grid, "Show Grid");
        for axis in AxisKind::ALL {
            let mut logarithmic = self.digitizer.mapper().axis(axis).is_logarithmic();
            if ui
                .checkbox(&mut logarithmic, format!("{axis} Axis Logarithmic"))
                .changed()
                && let Err(err) = self.digitizer.set_logarithmic(axis, logarithmic)
            {
                self.set_status(err.to_string());
            }
        }
    }

    /// Calibration axes from the min corner to each max endpoint, with corner labels.
    fn paint_axes(&self, painter: &egui::Painter, rect: Rect) {
        let mapper = self.digitizer.mapper();
        let x_cal = mapper.axis(AxisKind::X);
        let y_cal = mapper.axis(AxisKind::Y);
        let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) =
            (x_cal.min(), x_cal.max(), y_cal.min(), y_cal.max())
        else {
            return;
        };
        let to_screen = |px: f64, py: f64| {
            screen_pos(rect, self.digitizer.to_display(XYPoint::new(px, py)))
        };
        let origin = to_screen(min_x.pixel, min_y.pixel);
        let x_end = to_screen(max_x.pixel, min_y.pixel);
        let y_end = to_screen(min_x.pixel, max_y.pixel);

        let stroke = self.config.axes.stroke();
        painter.arrow(origin, x_end - origin, stroke);
        painter.arrow(origin, y_end - origin, stroke);

        let font = FontId::proportional(12.0);
        let color = self.config.axes.color32();
        painter.text(
            origin + egui::vec2(LABEL_OFFSET, LABEL_OFFSET),
            Align2::LEFT_TOP,
            corner_label(min_x.value, min_y.value),
            font.clone(),
            color,
        );
        painter.text(
            x_end + egui::vec2(0.0, LABEL_OFFSET),
            Align2::RIGHT_TOP,
            corner_label(max_x.value, min_y.value),
            font.clone(),
            color,
        );
        painter.text(
            y_end + egui::vec2(LABEL_OFFSET, 0.0),
            Align2::LEFT_TOP,
            corner_label(min_x.value, max_y.value),
            font,
            color,
        );
    }

    fn paint_samples(&self, painter: &egui::Painter, rect: Rect) {
        let points: Vec<Pos2> = self
            .digitizer
            .samples()
            .raw()
            .iter()
            .map(|p| screen_pos(rect, self.digitizer.to_display(*p)))
            .collect();
        if self.prefs.draw_lines && points.len() > 1 {
            let stroke = self.config.sample_line.stroke();
            for pair in points.windows(2) {
                painter.line_segment([pair[0], pair[1]], stroke);
            }
        }
        let radius = self.config.samples.radius();
        let color = self.config.samples.color32();
        for p in points {
            painter.circle_filled(p, radius, color);
            painter.circle_stroke(p, radius, egui::Stroke::new(1.0, Color32::BLACK));
        }
    }
}
