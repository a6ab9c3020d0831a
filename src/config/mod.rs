//! Configuration file support.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/canvas-markup/config.toml`. Settings include stroke and text
//! defaults, gesture thresholds and the line commit mode.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, CommitTrigger};
pub use types::{DrawingConfig, LineConfig, TextConfig, ThresholdConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the user's config directory.
const CONFIG_DIR_NAME: &str = "canvas-markup";

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// stroke_width = 3.0
/// stroke_color = "#ff0000"
/// fill_color = [255, 255, 0]
/// font_size = 24.0
/// font_color = "black"
///
/// [text]
/// placeholder = "Type here"
/// cursor_sync_interval_ms = 16
///
/// [thresholds]
/// min_circle_radius = 8.0
///
/// [line]
/// commit_trigger = "double-click"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Stroke, fill and font defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Text annotation behaviour
    #[serde(default)]
    pub text: TextConfig,

    /// Minimum sizes below which gestures are discarded
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    /// Line tool settings
    #[serde(default)]
    pub line: LineConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke_width`: 1.0 - 20.0
    /// - `font_size`: 8.0 - 72.0
    /// - `cursor_sync_interval_ms`: 8 - 250
    /// - thresholds: >= 0.0
    pub fn validate_and_clamp(&mut self) {
        // Stroke width: 1.0 - 20.0
        if !self.drawing.stroke_width.is_finite() {
            warn!(
                "Invalid stroke_width {}, using default",
                self.drawing.stroke_width
            );
            self.drawing.stroke_width = types::default_stroke_width();
        } else if !(1.0..=20.0).contains(&self.drawing.stroke_width) {
            warn!(
                "Invalid stroke_width {:.1}, clamping to 1.0-20.0 range",
                self.drawing.stroke_width
            );
            self.drawing.stroke_width = self.drawing.stroke_width.clamp(1.0, 20.0);
        }

        // Font size: 8.0 - 72.0
        if !self.drawing.font_size.is_finite() {
            warn!("Invalid font_size {}, using default", self.drawing.font_size);
            self.drawing.font_size = types::default_font_size();
        } else if !(8.0..=72.0).contains(&self.drawing.font_size) {
            warn!(
                "Invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.font_size
            );
            self.drawing.font_size = self.drawing.font_size.clamp(8.0, 72.0);
        }

        // Colors are resolved lazily; report bad ones early
        let colors = [
            ("stroke_color", Some(&self.drawing.stroke_color)),
            ("fill_color", self.drawing.fill_color.as_ref()),
            ("font_color", Some(&self.drawing.font_color)),
        ];
        for (field, spec) in colors {
            if let Some(Err(err)) = spec.map(ColorSpec::try_to_color) {
                warn!("Invalid {field}: {err}; red will be used");
            }
        }

        if self.text.placeholder.trim().is_empty() {
            warn!("Empty text placeholder, falling back to the default");
            self.text.placeholder = types::default_placeholder();
        }

        if !(8..=250).contains(&self.text.cursor_sync_interval_ms) {
            warn!(
                "Invalid cursor_sync_interval_ms {}, clamping to 8-250 range",
                self.text.cursor_sync_interval_ms
            );
            self.text.cursor_sync_interval_ms = self.text.cursor_sync_interval_ms.clamp(8, 250);
        }

        let thresholds = [
            ("min_circle_radius", &mut self.thresholds.min_circle_radius),
            ("min_rect_side", &mut self.thresholds.min_rect_side),
            ("min_line_length", &mut self.thresholds.min_line_length),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || *value < 0.0 {
                warn!("Invalid {field} {:.1}, using 0.0", *value);
                *value = 0.0;
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/canvas-markup/config.toml`
    /// (honouring `XDG_CONFIG_HOME`).
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses configuration from TOML text and clamps it to valid ranges.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(input).context("Invalid configuration TOML")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, Color, RED};
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.drawing.stroke_width, 2.0);
        assert_eq!(config.drawing.stroke_color.to_color(), RED);
        assert!(config.drawing.fill_color.is_none());
        assert_eq!(config.thresholds.min_circle_radius, 8.0);
        assert_eq!(config.thresholds.min_rect_side, 2.0);
        assert_eq!(config.thresholds.min_line_length, 2.0);
        assert_eq!(config.line.commit_trigger, CommitTrigger::PointerUp);
        assert_eq!(config.text.cursor_sync_interval_ms, 16);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            stroke_width = 50.0
            font_size = 4.0

            [text]
            placeholder = "   "
            cursor_sync_interval_ms = 1

            [thresholds]
            min_circle_radius = -3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.stroke_width, 20.0);
        assert_eq!(config.drawing.font_size, 8.0);
        assert_eq!(config.text.placeholder, types::default_placeholder());
        assert_eq!(config.text.cursor_sync_interval_ms, 8);
        assert_eq!(config.thresholds.min_circle_radius, 0.0);
    }

    #[test]
    fn non_finite_sizes_fall_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            [drawing]
            stroke_width = nan
            font_size = inf
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.stroke_width, 2.0);
        assert_eq!(config.drawing.font_size, 20.0);
    }

    #[test]
    fn parses_colors_and_commit_trigger() {
        let config = Config::from_toml_str(
            r##"
            [drawing]
            stroke_color = "#000"
            fill_color = [0, 0, 255]
            font_color = "black"

            [line]
            commit_trigger = "double-click"
            "##,
        )
        .unwrap();

        assert_eq!(config.drawing.stroke_color.to_color(), BLACK);
        assert_eq!(
            config.drawing.fill_color.as_ref().map(ColorSpec::to_color),
            Some(Color::from_rgb8(0, 0, 255))
        );
        assert_eq!(config.drawing.font_color.to_color(), BLACK);
        assert_eq!(config.line.commit_trigger, CommitTrigger::DoubleClick);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("[drawing\nstroke_width = ").is_err());
        assert!(Config::from_toml_str("[line]\ncommit_trigger = \"sometimes\"").is_err());
    }

    #[test]
    fn load_from_reads_file_and_reports_missing_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[drawing]\nstroke_width = 5.0").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.drawing.stroke_width, 5.0);

        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn schema_names_every_section() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "text", "thresholds", "line"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
