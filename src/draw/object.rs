//! Scene objects hosted by a rendering surface.

use super::shape::{Shape, ShapeKind, TextAnnotation};
use super::style::StrokeStyle;

/// A shape plus the interaction flags the surface honours.
///
/// Previews start non-selectable and non-evented so they neither get picked
/// by hit tests nor steal the gesture; committing flips them to persistent
/// scene objects in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Geometry (and content for text)
    pub shape: Shape,
    /// Stroke applied when the object was created
    pub stroke: StrokeStyle,
    /// Whether the user may select the object
    pub selectable: bool,
    /// Whether the object receives pointer events (and hit tests)
    pub evented: bool,
    /// Whether resize/rotate controls are shown when selected
    pub has_controls: bool,
    /// Whether a selection border is shown when selected
    pub has_borders: bool,
}

impl SceneObject {
    /// Creates a transient, non-interactive preview object.
    pub fn preview(shape: Shape, stroke: StrokeStyle) -> Self {
        Self {
            shape,
            stroke,
            selectable: false,
            evented: false,
            has_controls: false,
            has_borders: false,
        }
    }

    /// Creates a text annotation object; text is interactive from the start
    /// but never shows transform controls.
    pub fn text(annotation: TextAnnotation, stroke: StrokeStyle) -> Self {
        Self {
            shape: Shape::Text(annotation),
            stroke,
            selectable: true,
            evented: true,
            has_controls: false,
            has_borders: true,
        }
    }

    /// Promotes a preview into a persistent, selectable scene object.
    pub fn promote(&mut self) {
        self.selectable = true;
        self.evented = true;
        self.has_controls = true;
        self.has_borders = true;
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Returns true once the object belongs to the persistent scene.
    pub fn is_persistent(&self) -> bool {
        self.selectable && self.evented
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        self.shape.as_text()
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextAnnotation> {
        self.shape.as_text_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;
    use crate::util::Point;

    #[test]
    fn promote_turns_preview_into_persistent_object() {
        let stroke = StrokeStyle {
            width: 2.0,
            color: RED,
            fill: None,
        };
        let mut object = SceneObject::preview(
            Shape::Line {
                start: Point::new(0.0, 0.0),
                end: Point::new(5.0, 5.0),
            },
            stroke,
        );
        assert!(!object.is_persistent());

        object.promote();
        assert!(object.is_persistent());
        assert!(object.has_controls && object.has_borders);
        assert_eq!(object.kind(), ShapeKind::Line);
    }
}
