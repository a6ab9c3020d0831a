//! Configuration type definitions.

use super::enums::{ColorSpec, CommitTrigger};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the style stamped onto new shapes when the tools first open.
/// Hosts can change these values at runtime through [`StyleCells`](crate::draw::StyleCells).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke width in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Stroke color - a named color, `#rrggbb`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub stroke_color: ColorSpec,

    /// Fill color for circles and rectangles; leave unset for outlines only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<ColorSpec>,

    /// Font size for text annotations in pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Text color
    #[serde(default = "default_color")]
    pub font_color: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            stroke_width: default_stroke_width(),
            stroke_color: default_color(),
            fill_color: None,
            font_size: default_font_size(),
            font_color: default_color(),
        }
    }
}

/// Text annotation settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Content of a freshly placed annotation; replaced by the first keystroke
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Font family for new annotations
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Repaint interval while editing, keeping the caret and selection in sync
    /// (valid range: 8 - 250 ms)
    #[serde(default = "default_cursor_sync_interval_ms")]
    pub cursor_sync_interval_ms: u64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            font_family: default_font_family(),
            cursor_sync_interval_ms: default_cursor_sync_interval_ms(),
        }
    }
}

/// Minimum gesture sizes; smaller shapes are discarded on commit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThresholdConfig {
    /// Circles with a smaller radius are discarded
    #[serde(default = "default_min_circle_radius")]
    pub min_circle_radius: f64,

    /// Rectangles narrower or shorter than this are discarded
    #[serde(default = "default_min_rect_side")]
    pub min_rect_side: f64,

    /// Lines shorter than this are discarded
    #[serde(default = "default_min_line_length")]
    pub min_line_length: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_circle_radius: default_min_circle_radius(),
            min_rect_side: default_min_rect_side(),
            min_line_length: default_min_line_length(),
        }
    }
}

/// Line tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LineConfig {
    /// Which pointer event commits a line: "pointer-up" or "double-click"
    #[serde(default)]
    pub commit_trigger: CommitTrigger,
}

// =============================================================================
// Default value functions
// =============================================================================

pub(crate) fn default_stroke_width() -> f64 {
    2.0
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

pub(crate) fn default_font_size() -> f64 {
    20.0
}

pub(crate) fn default_placeholder() -> String {
    "Double-click to edit text".to_string()
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_cursor_sync_interval_ms() -> u64 {
    16
}

fn default_min_circle_radius() -> f64 {
    8.0
}

fn default_min_rect_side() -> f64 {
    2.0
}

fn default_min_line_length() -> f64 {
    2.0
}
