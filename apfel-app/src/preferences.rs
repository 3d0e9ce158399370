use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use apfel_core::{Complex, ExplorerConfig, Julia, Viewport};
use apfel_render::PaletteKind;

use crate::app::FractalMode;

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

/// Startup settings. Only configuration lives here; the view itself always
/// starts from the default bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_canvas_size")]
    pub window_width: f32,
    #[serde(default = "default_canvas_size")]
    pub window_height: f32,
    #[serde(default)]
    pub palette: PaletteKind,
    #[serde(default)]
    pub fractal: FractalMode,
    /// Constant used when the Julia mode is active at startup.
    #[serde(default = "default_julia_c")]
    pub julia_c: Complex,
    #[serde(default = "default_true")]
    pub show_hud: bool,
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

fn default_canvas_size() -> f32 {
    Viewport::DEFAULT_SIZE as f32
}
fn default_julia_c() -> Complex {
    Julia::default_c()
}
fn default_true() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_canvas_size(),
            window_height: default_canvas_size(),
            palette: PaletteKind::default(),
            fractal: FractalMode::default(),
            julia_c: default_julia_c(),
            show_hud: true,
            explorer: ExplorerConfig::default(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    prefs.sanitized()
                }
                Err(e) => {
                    error!("Failed to parse preferences: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read preferences file: {e}");
                Self::default()
            }
        }
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Canvas size in whole pixels, never zero.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.window_width.max(1.0) as u32,
            self.window_height.max(1.0) as u32,
        )
    }

    /// Replace out-of-range values with defaults so startup cannot fail.
    fn sanitized(mut self) -> Self {
        if let Err(e) = self.explorer.validate() {
            warn!("Ignoring explorer settings: {e}");
            self.explorer = ExplorerConfig::default();
        }
        if !(self.window_width.is_finite() && self.window_width >= 1.0)
            || !(self.window_height.is_finite() && self.window_height >= 1.0)
        {
            warn!(
                width = self.window_width,
                height = self.window_height,
                "Ignoring invalid window size"
            );
            self.window_width = default_canvas_size();
            self.window_height = default_canvas_size();
        }
        self
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::settings_dir().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("apfel-prefs-{}-{name}", std::process::id()))
            .join("preferences.json")
    }

    #[test]
    fn missing_file_gives_defaults() {
        let prefs = AppPreferences::load_from(&temp_path("missing"));
        assert_eq!(prefs.canvas_size(), (800, 800));
        assert_eq!(prefs.palette, PaletteKind::HueRamp);
        assert_eq!(prefs.explorer, ExplorerConfig::default());
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("roundtrip");
        let prefs = AppPreferences {
            palette: PaletteKind::Ocean,
            fractal: FractalMode::Julia,
            explorer: ExplorerConfig {
                default_max_iterations: 250,
                ..Default::default()
            },
            ..Default::default()
        };
        prefs.save_to(&path);
        let loaded = AppPreferences::load_from(&path);
        assert_eq!(loaded.palette, PaletteKind::Ocean);
        assert_eq!(loaded.fractal, FractalMode::Julia);
        assert_eq!(loaded.explorer.default_max_iterations, 250);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn invalid_explorer_settings_fall_back() {
        let path = temp_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{ "window_width": 0.0, "explorer": { "zoom_speed": -2.0 } }"#,
        )
        .unwrap();
        let loaded = AppPreferences::load_from(&path);
        assert_eq!(loaded.explorer, ExplorerConfig::default());
        assert_eq!(loaded.canvas_size(), (800, 800));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppPreferences::load_from(&path).canvas_size(), (800, 800));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
