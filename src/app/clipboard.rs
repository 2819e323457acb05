use super::PlotpickApp;
use arboard::{Clipboard, Error as ClipboardError};

impl PlotpickApp {
    /// Copy all mapped samples to the clipboard as a tab-separated table.
    pub(crate) fn copy_samples_to_clipboard(&mut self) {
        let text = match self.digitizer.samples_as_tsv() {
            Ok(text) => text,
            Err(err) => {
                self.set_status(format!("Copy failed: {err}"));
                return;
            }
        };
        match put_clipboard_text(text) {
            Ok(()) => {
                let count = self.digitizer.samples().len();
                tracing::info!(rows = count, "samples copied to clipboard");
                self.set_status(format!("Copied {count} samples to the clipboard."));
            }
            Err(msg) => {
                tracing::warn!("{msg}");
                self.set_status(msg);
            }
        }
    }
}

fn put_clipboard_text(text: String) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(format_clipboard_error)?;
    clipboard.set_text(text).map_err(format_clipboard_error)
}

fn format_clipboard_error(err: ClipboardError) -> String {
    match err {
        ClipboardError::ClipboardNotSupported => {
            "Copy failed: clipboard access is not supported in this environment.".to_string()
        }
        ClipboardError::ClipboardOccupied => {
            "Copy failed: clipboard is busy; try again in a moment.".to_string()
        }
        ClipboardError::ConversionFailure => {
            "Copy failed: samples could not be converted for the clipboard.".to_string()
        }
        ClipboardError::Unknown { description } => format!("Copy failed: {description}"),
        _ => format!("Copy failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipboard_errors_read_as_copy_failures() {
        let msg = format_clipboard_error(ClipboardError::ClipboardOccupied);
        assert!(msg.starts_with("Copy failed:"));
        let msg = format_clipboard_error(ClipboardError::Unknown {
            description: "no display".to_string(),
        });
        assert_eq!(msg, "Copy failed: no display");
    }
}
