//! Configuration enum types.

use crate::draw::{Color, ColorError, color::RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pointer event that commits a line gesture.
///
/// `PointerUp` is the classic press-drag-release gesture. `DoubleClick` keeps
/// the preview following the pointer after release ("polyline drag") until
/// the user double-clicks.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CommitTrigger {
    /// Commit on pointer release
    #[default]
    PointerUp,
    /// Commit on double-click
    DoubleClick,
}

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "red"
///
/// # CSS hex color
/// stroke_color = "#ff8000"
///
/// # Custom RGB color (0-255 per component)
/// stroke_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, ...) or `#rgb` / `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the specification, reporting why it is invalid.
    pub fn try_to_color(&self) -> Result<Color, ColorError> {
        match self {
            ColorSpec::Name(name) if name.trim_start().starts_with('#') => Color::from_hex(name),
            ColorSpec::Name(name) => crate::util::name_to_color(name)
                .ok_or_else(|| ColorError::UnknownName(name.clone())),
            ColorSpec::Rgb([r, g, b]) => Ok(Color::from_rgb8(*r, *g, *b)),
        }
    }

    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Invalid specifications default to red with a warning.
    pub fn to_color(&self) -> Color {
        self.try_to_color().unwrap_or_else(|err| {
            warn!("{err}, using red");
            RED
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, ORANGE};

    #[test]
    fn color_spec_accepts_names_hex_and_rgb() {
        assert_eq!(ColorSpec::Name("blue".into()).to_color(), BLUE);
        assert_eq!(ColorSpec::Name("#ff8000".into()).to_color(), Color::from_rgb8(255, 128, 0));
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color(), RED);
        assert_eq!(ColorSpec::Name("orange".into()).try_to_color(), Ok(ORANGE));
    }

    #[test]
    fn unknown_color_falls_back_to_red() {
        let spec = ColorSpec::Name("chartreuse".into());
        assert_eq!(
            spec.try_to_color(),
            Err(ColorError::UnknownName("chartreuse".into()))
        );
        assert_eq!(spec.to_color(), RED);
    }
}
