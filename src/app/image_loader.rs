use super::{ImageLoadRequest, ImageLoadResult, PendingImageTask, PlotpickApp};
use crate::image::{LoadedImage, decode_image_from_bytes, decode_image_from_path};
use egui::Context;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

fn path_label(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

impl PlotpickApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        self.prefs.remember_image_dir(&path);
        let label = path_label(&path);
        self.start_image_load(ImageLoadRequest::Path(path), label);
    }

    pub(crate) fn start_loading_image_from_bytes(&mut self, name: Option<String>, bytes: Vec<u8>) {
        let label = name.unwrap_or_else(|| "dropped bytes".to_string());
        self.start_image_load(ImageLoadRequest::Bytes(bytes), label);
    }

    fn start_image_load(&mut self, request: ImageLoadRequest, label: String) {
        let limits = self.config.effective_image_limits();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match request {
                ImageLoadRequest::Path(path) => decode_image_from_path(&limits, &path),
                ImageLoadRequest::Bytes(bytes) => decode_image_from_bytes(&limits, bytes),
            };
            let msg = match result {
                Ok(color) => ImageLoadResult::Success(color),
                Err(err) => ImageLoadResult::Error(format!("{err:#}")),
            };
            let _ = tx.send(msg);
        });
        tracing::info!(image = %label, "loading image");
        self.set_status(format!("Loading {label}…"));
        self.pending_image_task = Some(PendingImageTask { rx, label });
    }

    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.pending_image_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success(color)) => {
                let [w, h] = color.size;
                let loaded = LoadedImage::from_color_image(ctx, color);
                self.set_loaded_image(loaded, task.label.clone());
                tracing::info!(image = %task.label, width = w, height = h, "image loaded");
                self.set_status(format!("Loaded {} ({w} × {h} px)", task.label));
            }
            Ok(ImageLoadResult::Error(err)) => {
                tracing::warn!(image = %task.label, "image load failed: {err}");
                self.set_status(format!("Failed to load {}: {err}", task.label));
            }
            Err(TryRecvError::Empty) => {
                self.pending_image_task = Some(task);
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                self.set_status(format!(
                    "Loading {} failed: worker disconnected.",
                    task.label
                ));
            }
        }
    }
}
