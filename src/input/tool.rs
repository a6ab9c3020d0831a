//! Drawing tool selection.

use std::fmt;

/// Drawing tool selection.
///
/// Exactly one tool is current at any time; `None` means no drawing tool is
/// engaged and the surface behaves as a plain selection canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    /// No drawing tool engaged
    #[default]
    None,
    /// Circle from center outward
    Circle,
    /// Rectangle from corner to corner
    Rect,
    /// Straight line between start and end points
    Line,
    /// Click to place an editable text annotation
    Text,
}

impl Tool {
    /// Every drawing tool, in palette order.
    pub const DRAWING: [Tool; 4] = [Tool::Circle, Tool::Rect, Tool::Line, Tool::Text];

    /// Parses a palette name; unknown names map to [`Tool::None`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "circle" => Tool::Circle,
            "rect" | "rectangle" => Tool::Rect,
            "line" => Tool::Line,
            "text" => Tool::Text,
            _ => Tool::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::None => "none",
            Tool::Circle => "circle",
            Tool::Rect => "rect",
            Tool::Line => "line",
            Tool::Text => "text",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Tool::None
    }
}

impl From<&str> for Tool {
    fn from(name: &str) -> Self {
        Tool::from_name(name)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
