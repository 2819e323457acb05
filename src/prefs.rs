//! User preferences persisted between runs through eframe storage.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PREFS_KEY: &str = "plotpick.prefs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub show_grid: bool,
    pub draw_lines: bool,
    pub last_image_dir: Option<PathBuf>,
    pub last_export_dir: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            // Axes overlay is on until the user turns it off.
            show_grid: true,
            draw_lines: false,
            last_image_dir: None,
            last_export_dir: None,
        }
    }
}

impl Preferences {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let prefs = storage
            .and_then(|s| eframe::get_value::<Self>(s, PREFS_KEY))
            .unwrap_or_default();
        tracing::debug!(?prefs, "preferences loaded");
        prefs
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PREFS_KEY, self);
    }

    pub fn remember_image_dir(&mut self, path: &Path) {
        self.last_image_dir = Some(parent_dir(path));
    }

    pub fn remember_export_dir(&mut self, path: &Path) {
        self.last_export_dir = Some(parent_dir(path));
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage as _;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage(HashMap<String, String>);

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn missing_storage_gives_defaults() {
        assert_eq!(Preferences::load(None), Preferences::default());
        let empty = MemoryStorage::default();
        assert_eq!(Preferences::load(Some(&empty)), Preferences::default());
    }

    #[test]
    fn fresh_preferences_show_the_axes_overlay() {
        let prefs = Preferences::default();
        assert!(prefs.show_grid);
        assert!(!prefs.draw_lines);
        // Older stored entries without the field also start with the overlay on.
        let mut storage = MemoryStorage::default();
        storage.set_string(PREFS_KEY, "(draw_lines: true)".to_string());
        let restored = Preferences::load(Some(&storage));
        assert!(restored.show_grid);
        assert!(restored.draw_lines);
    }

    #[test]
    fn saved_preferences_are_restored() {
        let mut storage = MemoryStorage::default();
        let mut prefs = Preferences {
            show_grid: false,
            draw_lines: true,
            ..Preferences::default()
        };
        prefs.remember_image_dir(Path::new("/charts/plot.png"));
        prefs.remember_export_dir(Path::new("out.csv"));
        prefs.save(&mut storage);

        let restored = Preferences::load(Some(&storage));
        assert_eq!(restored, prefs);
        assert_eq!(restored.last_image_dir, Some(PathBuf::from("/charts")));
        assert_eq!(restored.last_export_dir, Some(PathBuf::from(".")));
    }
}
