//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::image::LoadedImage;
use crate::prefs::Preferences;
use crate::session::Digitizer;
use crate::types::{AxisEnd, AxisKind, XYPoint};
use egui::{ColorImage, Context, Key};
use egui_file_dialog::{DialogState, FileDialog};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

mod clipboard;
mod image_loader;
mod ui;

const APP_NAME: &str = "Plotpick";
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

enum ImageLoadRequest {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

struct PendingImageTask {
    rx: Receiver<ImageLoadResult>,
    label: String,
}

enum ImageLoadResult {
    Success(ColorImage),
    Error(String),
}

#[derive(Debug)]
enum NativeDialog {
    Open(FileDialog),
    ExportCsv(FileDialog),
}

/// Numeric value prompt opened from the image context menu.
///
/// `pixel` is the right-click position in original-image pixels, unscaled
/// with the zoom in effect when the menu opened.
#[derive(Debug, Clone)]
struct ValuePrompt {
    axis: AxisKind,
    end: AxisEnd,
    pixel: XYPoint,
    text: String,
    focus_requested: bool,
}

#[derive(Debug, Clone)]
struct MessageWindow {
    title: &'static str,
    body: String,
}

fn safe_usize_to_f32(value: usize) -> f32 {
    let clamped = value.min(u32::MAX as usize);
    let as_u32 = u32::try_from(clamped).unwrap_or(u32::MAX);
    #[allow(clippy::cast_precision_loss)]
    {
        as_u32 as f32
    }
}

/// Top-level application state for the Plotpick UI.
pub struct PlotpickApp {
    config: AppConfig,
    prefs: Preferences,
    digitizer: Digitizer,
    image: Option<LoadedImage>,
    image_label: Option<String>,
    pending_image_task: Option<PendingImageTask>,
    active_dialog: Option<NativeDialog>,
    context_anchor: Option<XYPoint>,
    value_prompt: Option<ValuePrompt>,
    hover_data: Option<XYPoint>,
    message: Option<MessageWindow>,
    about_open: bool,
    last_status: Option<String>,
}

impl PlotpickApp {
    /// Create the app from persisted preferences and optionally queue an initial image load.
    pub fn new(cc: &eframe::CreationContext<'_>, initial_path: Option<&Path>) -> Self {
        let config = AppConfig::load();
        let prefs = Preferences::load(cc.storage);
        let digitizer = Digitizer::new(config.zoom_step_factor());
        let mut app = Self {
            config,
            prefs,
            digitizer,
            image: None,
            image_label: None,
            pending_image_task: None,
            active_dialog: None,
            context_anchor: None,
            value_prompt: None,
            hover_data: None,
            message: None,
            about_open: false,
            last_status: None,
        };
        if let Some(p) = initial_path {
            app.start_loading_image_from_path(p.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.last_status = Some(msg.into());
    }

    fn set_loaded_image(&mut self, image: LoadedImage, label: String) {
        self.image = Some(image);
        self.image_label = Some(label);
        self.digitizer.reset();
        self.context_anchor = None;
        self.value_prompt = None;
        self.hover_data = None;
    }

    fn zoom_in(&mut self) {
        if let Err(err) = self.digitizer.zoom_in() {
            self.set_status(err.to_string());
        }
    }

    fn zoom_out(&mut self) {
        if let Err(err) = self.digitizer.zoom_out() {
            self.set_status(err.to_string());
        }
    }

    fn clear_samples(&mut self) {
        self.digitizer.clear_samples();
        self.set_status("Samples cleared.");
    }

    fn show_path_length(&mut self) {
        match self.digitizer.path_length() {
            Ok(len) => {
                self.message = Some(MessageWindow {
                    title: "Path length",
                    body: format!("The path's length is {len:.6}"),
                });
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn show_polygon_area(&mut self) {
        match self.digitizer.polygon_area() {
            Ok(area) => {
                self.message = Some(MessageWindow {
                    title: "Polygon area",
                    body: format!("The polygon's area is {area:.6}"),
                });
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn export_csv_to(&mut self, path: &Path) {
        self.prefs.remember_export_dir(path);
        match self.digitizer.export_csv(path) {
            Ok(()) => {
                let count = self.digitizer.samples().len();
                self.set_status(format!("Exported {count} samples."));
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "csv export failed: {err:#}");
                self.set_status(format!("CSV export failed: {err:#}"));
            }
        }
    }

    fn handle_hotkeys(&mut self, ctx: &Context) {
        // Ignored while typing in text fields
        if ctx.wants_keyboard_input() {
            return;
        }
        let can_use = self.digitizer.can_use_samples();
        if self.active_dialog.is_none()
            && ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command)
        {
            self.open_image_dialog();
        }
        if can_use
            && self.active_dialog.is_none()
            && ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command)
        {
            self.start_export_csv();
        }
        if can_use
            && ctx.input(|i| i.key_pressed(Key::C) && i.modifiers.command && i.modifiers.shift)
        {
            self.copy_samples_to_clipboard();
        }
        if self.image.is_some() {
            if ctx.input(|i| {
                (i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals)) && i.modifiers.command
            }) {
                self.zoom_in();
            }
            if ctx.input(|i| i.key_pressed(Key::Minus) && i.modifiers.command) {
                self.zoom_out();
            }
            if ctx.input(|i| i.key_pressed(Key::Num0) && i.modifiers.command) {
                self.digitizer.reset_zoom();
            }
        }
        if ctx.input(|i| i.key_pressed(Key::Q) && i.modifiers.command) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn update_active_dialog(&mut self, ctx: &Context) {
        let mut close_dialog = false;
        let mut picked_open: Option<PathBuf> = None;
        let mut picked_export: Option<PathBuf> = None;

        if let Some(dialog_state) = self.active_dialog.as_mut() {
            let (dialog, target) = match dialog_state {
                NativeDialog::Open(dialog) => (dialog, &mut picked_open),
                NativeDialog::ExportCsv(dialog) => (dialog, &mut picked_export),
            };
            dialog.update(ctx);
            if let Some(path) = dialog.take_picked() {
                *target = Some(path);
                close_dialog = true;
            } else {
                match dialog.state() {
                    DialogState::Cancelled => {
                        self.last_status = Some("Canceled.".to_string());
                        close_dialog = true;
                    }
                    DialogState::Closed => close_dialog = true,
                    _ => {}
                }
            }
        }

        if close_dialog {
            self.active_dialog = None;
        }
        if let Some(path) = picked_open {
            self.start_loading_image_from_path(path);
        }
        if let Some(path) = picked_export {
            self.export_csv_to(&path);
        }
    }
}

impl eframe::App for PlotpickApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::SidePanel::right("samples")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| self.ui_sample_list(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_image(ui));
        self.ui_value_prompt(ctx);
        self.ui_message_window(ctx);
        self.ui_about_window(ctx);

        self.update_active_dialog(ctx);
    }

    // Required by eframe 0.34; all drawing happens in `update`, which eframe still calls first.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.prefs.save(storage);
    }
}
