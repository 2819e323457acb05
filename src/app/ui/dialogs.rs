use super::super::{NativeDialog, PlotpickApp};
use egui_file_dialog::FileDialog;
use std::path::Path;

impl PlotpickApp {
    pub(crate) fn open_image_dialog(&mut self) {
        let mut dialog = Self::make_open_dialog(self.prefs.last_image_dir.as_deref());
        dialog.pick_file();
        self.active_dialog = Some(NativeDialog::Open(dialog));
    }

    pub(crate) fn start_export_csv(&mut self) {
        if !self.digitizer.can_use_samples() {
            self.set_status("Calibrate both axes and pick samples before exporting.");
            return;
        }
        let mut dialog = Self::make_save_dialog(
            "Export CSV",
            "samples.csv",
            &["csv"],
            self.prefs.last_export_dir.as_deref(),
        );
        dialog.save_file();
        self.active_dialog = Some(NativeDialog::ExportCsv(dialog));
    }

    fn make_open_dialog(initial_dir: Option<&Path>) -> FileDialog {
        // Keep in sync with enabled `image` crate features.
        let mut dialog = FileDialog::new()
            .title("Open image")
            .add_file_filter_extensions(
                "All images",
                vec!["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"],
            )
            .add_file_filter_extensions("PNG", vec!["png"])
            .add_file_filter_extensions("JPEG/JPG", vec!["jpg", "jpeg"])
            .add_file_filter_extensions("BMP", vec!["bmp"])
            .default_file_filter("All images");
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        let mut first_label: Option<String> = None;
        for ext in extensions {
            let label = format!("*.{ext}");
            if first_label.is_none() {
                first_label = Some(label.clone());
            }
            dialog = dialog.add_save_extension(&label, ext);
        }
        if let Some(label) = first_label.as_deref() {
            dialog = dialog.default_save_extension(label);
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }
}
