//! Annotation data model.
//!
//! This module defines the core drawing types shared by the engines and the
//! rendering surface:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: Circle, rectangle, line and text geometry
//! - [`SceneObject`]: A shape plus its stroke and interaction flags
//! - [`StyleCells`]: Shared, mutable drawing defaults

pub mod color;
pub mod object;
pub mod shape;
pub mod style;

// Re-export commonly used types at module level
pub use color::{Color, ColorError};
pub use object::SceneObject;
pub use shape::{EditingState, Shape, ShapeKind, TextAnnotation};
pub use style::{StrokeStyle, StyleCells};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
