use crate::capture::csv_store::CSV_FILE;
use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// CSV file receiving one row per capture. Relative paths resolve
    /// against the working directory.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// Folder for area screenshots. Defaults to the working directory.
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write log output to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Width in pixels of the border drawn on area screenshots.
    #[serde(default = "default_border_width")]
    pub border_width: u32,
    /// Opacity of the dimmed overlay, between `0.0` and `1.0`.
    #[serde(default = "default_overlay_opacity")]
    pub overlay_opacity: f32,
    /// Initial size of the main window.
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
}

fn default_csv_path() -> String {
    CSV_FILE.to_string()
}

fn default_screenshot_dir() -> String {
    ".".to_string()
}

fn default_border_width() -> u32 {
    2
}

fn default_overlay_opacity() -> f32 {
    0.25
}

fn default_window_size() -> (f32, f32) {
    (720.0, 360.0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            screenshot_dir: default_screenshot_dir(),
            debug_logging: false,
            log_file: None,
            border_width: default_border_width(),
            overlay_opacity: default_overlay_opacity(),
            window_size: default_window_size(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Alpha of the overlay fill, derived from `overlay_opacity`.
    pub fn overlay_alpha(&self) -> u8 {
        (self.overlay_opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}
