//! Stroke style and the shared, mutable style cells.

use std::cell::Cell;
use std::rc::Rc;

use super::color::Color;
use crate::config::DrawingConfig;

/// Stroke width range accepted at runtime (same as config validation).
pub const STROKE_WIDTH_RANGE: (f64, f64) = (1.0, 20.0);

/// Font size range accepted at runtime (same as config validation).
pub const FONT_SIZE_RANGE: (f64, f64) = (8.0, 72.0);

/// Stroke parameters stamped onto every newly created preview object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in pixels
    pub width: f64,
    /// Stroke color
    pub color: Color,
    /// Fill color, or `None` for an unfilled outline
    pub fill: Option<Color>,
}

impl StrokeStyle {
    /// Same stroke without a fill (lines never fill).
    pub fn without_fill(self) -> Self {
        Self { fill: None, ..self }
    }
}

/// Drawing parameters shared between the host and every engine.
///
/// Cloning is cheap and yields another handle onto the same cells, so a
/// palette widget can hold one clone and the engines observe its changes the
/// next time they create an object. Objects already on the surface keep the
/// style they were created with.
#[derive(Debug, Clone)]
pub struct StyleCells {
    stroke_width: Rc<Cell<f64>>,
    stroke_color: Rc<Cell<Color>>,
    fill_color: Rc<Cell<Option<Color>>>,
    font_size: Rc<Cell<f64>>,
    font_color: Rc<Cell<Color>>,
}

impl StyleCells {
    pub fn new(
        stroke_width: f64,
        stroke_color: Color,
        fill_color: Option<Color>,
        font_size: f64,
        font_color: Color,
    ) -> Self {
        Self {
            stroke_width: Rc::new(Cell::new(stroke_width)),
            stroke_color: Rc::new(Cell::new(stroke_color)),
            fill_color: Rc::new(Cell::new(fill_color)),
            font_size: Rc::new(Cell::new(font_size)),
            font_color: Rc::new(Cell::new(font_color)),
        }
    }

    /// Builds the cells from the (already validated) drawing configuration.
    pub fn from_config(config: &DrawingConfig) -> Self {
        Self::new(
            config.stroke_width,
            config.stroke_color.to_color(),
            config.fill_color.as_ref().map(|spec| spec.to_color()),
            config.font_size,
            config.font_color.to_color(),
        )
    }

    /// Snapshot of the current stroke parameters.
    pub fn stroke(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.stroke_width.get(),
            color: self.stroke_color.get(),
            fill: self.fill_color.get(),
        }
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width.get()
    }

    /// Sets the stroke width, clamped to 1.0-20.0. Non-finite widths are ignored.
    pub fn set_stroke_width(&self, width: f64) {
        if !width.is_finite() {
            log::warn!("Ignoring non-finite stroke width {}", width);
            return;
        }
        let clamped = width.clamp(STROKE_WIDTH_RANGE.0, STROKE_WIDTH_RANGE.1);
        self.stroke_width.set(clamped);
        log::debug!("Stroke width set to {:.1}px", clamped);
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color.get()
    }

    pub fn set_stroke_color(&self, color: Color) {
        self.stroke_color.set(color);
    }

    pub fn fill_color(&self) -> Option<Color> {
        self.fill_color.get()
    }

    pub fn set_fill_color(&self, color: Option<Color>) {
        self.fill_color.set(color);
    }

    pub fn font_size(&self) -> f64 {
        self.font_size.get()
    }

    /// Sets the font size, clamped to 8.0-72.0. Non-finite sizes are ignored.
    pub fn set_font_size(&self, size: f64) {
        if !size.is_finite() {
            log::warn!("Ignoring non-finite font size {}", size);
            return;
        }
        let clamped = size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
        self.font_size.set(clamped);
        log::debug!("Font size set to {:.1}px", clamped);
    }

    pub fn font_color(&self) -> Color {
        self.font_color.get()
    }

    pub fn set_font_color(&self, color: Color) {
        self.font_color.set(color);
    }
}

impl Default for StyleCells {
    fn default() -> Self {
        Self::from_config(&DrawingConfig::default())
    }
}
