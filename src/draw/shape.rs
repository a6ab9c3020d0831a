//! Shape definitions for annotations.

use super::color::Color;
use crate::util::{self, Point, Rect};

/// Approximate advance width of one glyph, relative to the font size.
const GLYPH_WIDTH_FACTOR: f64 = 0.6;

/// Line height relative to the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.16;

/// Minimum pick distance around thin strokes, in pixels.
const MIN_PICK_TOLERANCE: f64 = 4.0;

/// Discriminant of [`Shape`], used for hit-test filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rect,
    Line,
    Text,
}

/// Represents a drawable annotation on the surface.
///
/// Each variant carries only its geometry (and content for text); stroke and
/// interaction flags live on the owning [`SceneObject`](super::SceneObject).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Circle centered on the gesture start point
    Circle {
        /// Center point (where the pointer was pressed)
        center: Point,
        /// Radius in pixels
        radius: f64,
    },
    /// Axis-aligned rectangle
    Rect {
        /// Top-left corner
        origin: Point,
        /// Width in pixels
        width: f64,
        /// Height in pixels
        height: f64,
    },
    /// Straight line between two points
    Line {
        /// Fixed start point
        start: Point,
        /// Moving end point
        end: Point,
    },
    /// Editable text annotation
    Text(TextAnnotation),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Rect { .. } => ShapeKind::Rect,
            Shape::Line { .. } => ShapeKind::Line,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    /// Returns the axis-aligned bounding box, expanded to cover half the stroke width.
    pub fn bounding_box(&self, stroke_width: f64) -> Rect {
        let padding = stroke_width / 2.0;
        match self {
            Shape::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            )
            .inflate(padding),
            Shape::Rect {
                origin,
                width,
                height,
            } => Rect::new(origin.x, origin.y, *width, *height).inflate(padding),
            Shape::Line { start, end } => Rect::from_corners(*start, *end).inflate(padding),
            Shape::Text(text) => text.bounding_box(),
        }
    }

    /// Returns true if `point` picks this shape.
    ///
    /// Circles and rectangles pick on their whole area, lines within a
    /// stroke-dependent tolerance of the segment.
    pub fn contains(&self, point: Point, stroke_width: f64) -> bool {
        let tolerance = (stroke_width / 2.0).max(MIN_PICK_TOLERANCE);
        match self {
            Shape::Circle { center, radius } => {
                util::distance(*center, point) <= radius + stroke_width / 2.0
            }
            Shape::Line { start, end } => {
                util::distance_to_segment(point, *start, *end) <= tolerance
            }
            Shape::Rect { .. } | Shape::Text(_) => {
                self.bounding_box(stroke_width).contains(point)
            }
        }
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        match self {
            Shape::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextAnnotation> {
        match self {
            Shape::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Whether a text annotation currently owns the text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditingState {
    #[default]
    Idle,
    Editing,
}

/// Text annotation content plus its editing cursor.
///
/// Selection bounds are character indices into `content`, with
/// `selection_start <= selection_end`. A collapsed selection is the caret.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAnnotation {
    /// Top-left anchor in surface coordinates
    pub position: Point,
    /// Text content (may contain newlines)
    pub content: String,
    /// Font size in pixels
    pub font_size: f64,
    /// Fill color of the glyphs
    pub color: Color,
    /// Font family name
    pub font_family: String,
    /// Selection start (character index)
    pub selection_start: usize,
    /// Selection end (character index)
    pub selection_end: usize,
    /// Editing state machine
    pub editing: EditingState,
}

impl TextAnnotation {
    pub fn new(
        position: Point,
        content: impl Into<String>,
        font_size: f64,
        color: Color,
        font_family: impl Into<String>,
    ) -> Self {
        Self {
            position,
            content: content.into(),
            font_size,
            color,
            font_family: font_family.into(),
            selection_start: 0,
            selection_end: 0,
            editing: EditingState::Idle,
        }
    }

    /// Number of characters in the content.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_editing(&self) -> bool {
        self.editing == EditingState::Editing
    }

    /// Selects the whole content.
    pub fn select_all(&mut self) {
        self.selection_start = 0;
        self.selection_end = self.char_len();
    }

    /// Collapses the selection to a caret at `index`, clamped to the content.
    pub fn set_cursor(&mut self, index: usize) {
        let index = index.min(self.char_len());
        self.selection_start = index;
        self.selection_end = index;
    }

    /// Replaces the content and places the caret at `cursor`.
    pub fn set_content(&mut self, content: impl Into<String>, cursor: usize) {
        self.content = content.into();
        self.set_cursor(cursor);
    }

    /// Returns true if the selection spans the entire (non-empty) content.
    pub fn is_all_selected(&self) -> bool {
        self.selection_start == 0 && self.selection_end == self.char_len() && self.char_len() > 0
    }

    /// Estimated layout box; exact metrics belong to the rendering surface.
    pub fn bounding_box(&self) -> Rect {
        let lines: Vec<&str> = self.content.split('\n').collect();
        let longest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        Rect::new(
            self.position.x,
            self.position.y,
            longest as f64 * self.font_size * GLYPH_WIDTH_FACTOR,
            lines.len() as f64 * self.font_size * LINE_HEIGHT_FACTOR,
        )
    }
}
