use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridSize;

/// Default grid width in cells, matching a 640px board at 20px cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Default simulation rate in ticks per second.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Smallest playable grid side.
pub const MIN_GRID_SIDE: u16 = 4;

/// Largest accepted grid side; terminals cannot show more anyway.
pub const MAX_GRID_SIDE: u16 = 256;

/// Accepted tick-rate range.
pub const MIN_TICKS_PER_SECOND: u32 = 1;
pub const MAX_TICKS_PER_SECOND: u32 = 60;

/// Snake head glyphs by travel direction.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Body, tail, and food glyphs.
pub const GLYPH_SNAKE_BODY: &str = "█";
pub const GLYPH_SNAKE_TAIL: &str = "▓";
pub const GLYPH_FOOD: &str = "●";

const APP_DIR_NAME: &str = "torus-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Problems loading the user settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One partial layer of settings: every field optional.
///
/// The settings file and the CLI flags both deserialize into this shape
/// and are overlaid onto the defaults in order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub grid_width: Option<u16>,
    pub grid_height: Option<u16>,
    pub ticks_per_second: Option<u32>,
    pub theme: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Settings {
    pub bounds: GridSize,
    pub ticks_per_second: u32,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            theme: String::from("classic"),
        }
    }
}

impl Settings {
    /// Overlays `layers` onto the defaults in order, later layers winning,
    /// then clamps everything into the accepted ranges.
    #[must_use]
    pub fn resolved(layers: &[&SettingsPatch]) -> Self {
        let mut settings = Self::default();
        for layer in layers {
            settings.apply(layer);
        }
        settings.clamp();
        settings
    }

    fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(width) = patch.grid_width {
            self.bounds.width = width;
        }
        if let Some(height) = patch.grid_height {
            self.bounds.height = height;
        }
        if let Some(rate) = patch.ticks_per_second {
            self.ticks_per_second = rate;
        }
        if let Some(ref theme) = patch.theme {
            self.theme = theme.clone();
        }
    }

    fn clamp(&mut self) {
        self.bounds.width = self.bounds.width.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
        self.bounds.height = self.bounds.height.clamp(MIN_GRID_SIDE, MAX_GRID_SIDE);
        self.ticks_per_second = self
            .ticks_per_second
            .clamp(MIN_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND);
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads the user settings file.
///
/// A missing file is not an error (first run) and yields an empty patch.
/// Read or parse failures are returned so the caller can warn and fall
/// back to defaults before entering raw terminal mode.
pub fn load_settings() -> Result<SettingsPatch, ConfigError> {
    load_settings_from_path(&settings_path())
}

fn load_settings_from_path(path: &Path) -> Result<SettingsPatch, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SettingsPatch::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{
        ConfigError, DEFAULT_GRID_HEIGHT, DEFAULT_TICKS_PER_SECOND, MAX_TICKS_PER_SECOND,
        MIN_GRID_SIDE, Settings, SettingsPatch, load_settings_from_path,
    };

    #[test]
    fn later_layers_override_earlier_ones() {
        let file = SettingsPatch {
            grid_width: Some(20),
            ticks_per_second: Some(8),
            ..SettingsPatch::default()
        };
        let cli = SettingsPatch {
            grid_width: Some(48),
            theme: Some(String::from("neon")),
            ..SettingsPatch::default()
        };

        let settings = Settings::resolved(&[&file, &cli]);

        assert_eq!(settings.bounds.width, 48);
        assert_eq!(settings.bounds.height, DEFAULT_GRID_HEIGHT);
        assert_eq!(settings.ticks_per_second, 8);
        assert_eq!(settings.theme, "neon");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let patch = SettingsPatch {
            grid_width: Some(1),
            grid_height: Some(2000),
            ticks_per_second: Some(500),
            ..SettingsPatch::default()
        };

        let settings = Settings::resolved(&[&patch]);

        assert_eq!(settings.bounds.width, MIN_GRID_SIDE);
        assert_eq!(settings.bounds.height, super::MAX_GRID_SIDE);
        assert_eq!(settings.ticks_per_second, MAX_TICKS_PER_SECOND);
    }

    #[test]
    fn missing_settings_file_yields_empty_patch() {
        let path = unique_test_path("missing");

        let patch = load_settings_from_path(&path).expect("missing file should not be an error");

        assert!(patch.grid_width.is_none());
        assert!(patch.theme.is_none());
    }

    #[test]
    fn partial_settings_file_parses() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "ticks_per_second": 15 }"#);

        let patch = load_settings_from_path(&path).expect("partial file should parse");

        assert_eq!(patch.ticks_per_second, Some(15));
        assert!(patch.grid_width.is_none());

        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_settings_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        let error = load_settings_from_path(&path).expect_err("malformed file should error");
        assert!(matches!(error, ConfigError::Parse(_)));

        cleanup_test_path(&path);
    }

    #[test]
    fn defaults_match_the_classic_board() {
        let settings = Settings::resolved(&[]);

        assert_eq!(settings.bounds.width, 32);
        assert_eq!(settings.bounds.height, 24);
        assert_eq!(settings.ticks_per_second, DEFAULT_TICKS_PER_SECOND);
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("torus-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
