use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use egui::{Color32, Stroke};
use serde::Deserialize;

use crate::zoom::DEFAULT_ZOOM_STEP;

const CONFIG_FILE_NAME: &str = "plotpick.toml";

fn alpha_to_u8(alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn rgba(color: [u8; 3], alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], alpha_to_u8(alpha))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub thickness: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: [80, 200, 120],
            alpha: 1.0,
            thickness: 2.0,
        }
    }
}

impl StrokeStyle {
    pub fn color32(&self) -> Color32 {
        rgba(self.color, self.alpha)
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            width: self.thickness.max(0.1),
            color: self.color32(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub radius: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: [220, 40, 40],
            alpha: 1.0,
            radius: 3.0,
        }
    }
}

impl PointStyle {
    pub fn color32(&self) -> Color32 {
        rgba(self.color, self.alpha)
    }

    pub const fn radius(&self) -> f32 {
        self.radius.max(0.1)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Calibration axes, arrow heads and their labels.
    pub axes: StrokeStyle,
    pub samples: PointStyle,
    /// Polyline through the samples when "Draw lines" is on.
    pub sample_line: StrokeStyle,
    pub zoom_step: f64,
    pub image_limits: ImageLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            axes: StrokeStyle {
                color: [40, 90, 220],
                alpha: 1.0,
                thickness: 1.5,
            },
            samples: PointStyle::default(),
            sample_line: StrokeStyle {
                color: [220, 40, 40],
                alpha: 0.8,
                thickness: 1.5,
            },
            zoom_step: DEFAULT_ZOOM_STEP,
            image_limits: ImageLimits::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Some(cfg) = Self::load_from(&path) {
                tracing::info!(path = %path.display(), "loaded config");
                return cfg;
            }
        }
        Self::default()
    }

    fn load_from(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        match Self::parse(&contents) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to parse config");
                None
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Zoom step in `[0.05, 0.95]`; anything else falls back to the default.
    pub fn zoom_step_factor(&self) -> f64 {
        if self.zoom_step.is_finite() && (0.05..=0.95).contains(&self.zoom_step) {
            self.zoom_step
        } else {
            DEFAULT_ZOOM_STEP
        }
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Plotpick", "Plotpick") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("plotpick").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::parse("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.zoom_step_factor(), DEFAULT_ZOOM_STEP);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = AppConfig::parse(
            r"
zoom_step = 0.5

[samples]
radius = 5.0

[axes]
color = [0, 0, 0]
",
        )
        .unwrap();
        assert_eq!(cfg.zoom_step_factor(), 0.5);
        assert_eq!(cfg.samples.radius(), 5.0);
        assert_eq!(cfg.samples.color, PointStyle::default().color);
        assert_eq!(cfg.axes.color, [0, 0, 0]);
        // Fields missing from a present table fall back to the style's own default.
        assert_eq!(cfg.axes.thickness, StrokeStyle::default().thickness);
        assert_eq!(cfg.sample_line, AppConfig::default().sample_line);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let cfg = AppConfig::parse(
            r"
zoom_step = 3.0

[image_limits]
image_dim = 1
",
        )
        .unwrap();
        assert_eq!(cfg.zoom_step_factor(), DEFAULT_ZOOM_STEP);
        assert_eq!(cfg.effective_image_limits().image_dim, 64);
    }

    #[test]
    fn malformed_file_is_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "zoom_step = [").expect("write config");
        assert!(AppConfig::load_from(&path).is_none());
        assert!(AppConfig::load_from(&dir.path().join("missing.toml")).is_none());
    }

    #[test]
    fn alpha_is_clamped() {
        let style = StrokeStyle {
            color: [1, 2, 3],
            alpha: 4.0,
            thickness: 0.0,
        };
        assert_eq!(style.color32(), Color32::from_rgb(1, 2, 3));
        assert_eq!(style.stroke().width, 0.1);
    }
}
