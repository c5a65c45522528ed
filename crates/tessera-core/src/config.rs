//! Editor configuration, loadable from TOML.
//!
//! # Example
//!
//! ```toml
//! width = 800
//! height = 400
//! title = "Tessera Plugin UI"
//! clear_color = [0.45, 0.55, 0.60, 1.0]
//! scale = 1.0
//! idle_interval_ms = 16
//! close_timeout_ms = 2000
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rect::Rect;

/// Application name used for directory paths.
const APP_NAME: &str = "tessera";

/// File name of the editor config inside the user config directory.
const CONFIG_FILE: &str = "editor.toml";

/// Editor window and lifecycle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Native window title (visible only before reparenting).
    pub title: String,
    /// Background clear color, linear RGBA.
    pub clear_color: [f32; 4],
    /// UI scale factor (1.0 = no scaling).
    pub scale: f64,
    /// Mirror only the first N host parameters. `None` mirrors all of them.
    pub parameter_count: Option<usize>,
    /// Interval between harness idle ticks, in milliseconds.
    pub idle_interval_ms: u64,
    /// How long `close()` waits for the render thread; `0` waits forever.
    pub close_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            title: "Tessera Plugin UI".to_owned(),
            clear_color: [0.45, 0.55, 0.60, 1.0],
            scale: 1.0,
            parameter_count: None,
            idle_interval_ms: 16,
            close_timeout_ms: 2000,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, else the user config file if it exists, else defaults.
    ///
    /// An explicitly given path must exist; the implicit user config may not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = default_config_path();
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "loading user editor config");
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML and write to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Check value ranges that the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::invalid("width", "must be greater than zero"));
        }
        if self.height == 0 {
            return Err(ConfigError::invalid("height", "must be greater than zero"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::invalid(
                "scale",
                format!("must be a positive finite number, got {}", self.scale),
            ));
        }
        if self.clear_color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::invalid(
                "clear_color",
                "components must lie in 0.0..=1.0",
            ));
        }
        if self.idle_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "idle_interval_ms",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Bounding rect derived from `width`/`height`.
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Interval between idle ticks.
    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }

    /// Bound on `close()`'s join, or `None` for an unbounded join.
    pub fn close_timeout(&self) -> Option<Duration> {
        (self.close_timeout_ms > 0).then(|| Duration::from_millis(self.close_timeout_ms))
    }
}

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/tessera/`
/// - macOS: `~/Library/Application Support/tessera/`
/// - Windows: `%APPDATA%\tessera\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the implicit editor config file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = EditorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.rect(), Rect::from_size(800, 400));
        assert_eq!(config.close_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.idle_interval(), Duration::from_millis(16));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = EditorConfig::from_toml_str("width = 480\ntitle = \"Demo\"\n").unwrap();
        assert_eq!(config.width, 480);
        assert_eq!(config.height, 400);
        assert_eq!(config.title, "Demo");
        assert_eq!(config.parameter_count, None);
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let config = EditorConfig::from_toml_str("close_timeout_ms = 0").unwrap();
        assert_eq!(config.close_timeout(), None);
    }

    #[test]
    fn rejects_zero_width() {
        let err = EditorConfig::from_toml_str("width = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "width", .. }));
    }

    #[test]
    fn rejects_bad_scale_and_color() {
        let err = EditorConfig::from_toml_str("scale = -2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "scale", .. }));

        let err = EditorConfig::from_toml_str("clear_color = [1.5, 0.0, 0.0, 1.0]").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "clear_color",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = EditorConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("editor.toml");

        let config = EditorConfig {
            width: 640,
            parameter_count: Some(4),
            close_timeout_ms: 0,
            ..EditorConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = EditorConfig::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn default_path_lives_under_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("tessera/editor.toml"));
    }
}
