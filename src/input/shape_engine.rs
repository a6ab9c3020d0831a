//! Preview engine for circles, rectangles and lines.
//!
//! One [`ShapePreviewEngine`] exists per shape tool. Pressing the pointer
//! creates a non-interactive preview on the surface, moving reshapes it in
//! place, and the commit event either promotes it to a persistent scene
//! object or discards it when it is below the minimum size.

use log::debug;

use super::bridge::{HandlerSet, PointerEventBridge};
use super::engine::{ToolEngine, listener_for};
use super::events::{MouseButton, PointerEvent};
use super::tool::Tool;
use crate::config::{CommitTrigger, ThresholdConfig};
use crate::draw::{SceneObject, Shape, ShapeKind, StrokeStyle, StyleCells};
use crate::surface::{ObjectId, RenderingSurface};
use crate::util::{self, Point, Rect};

/// Shape drawn by a [`ShapePreviewEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Circle,
    Rect,
    Line,
}

impl PreviewKind {
    pub fn tool(self) -> Tool {
        match self {
            PreviewKind::Circle => Tool::Circle,
            PreviewKind::Rect => Tool::Rect,
            PreviewKind::Line => Tool::Line,
        }
    }

    pub fn shape_kind(self) -> ShapeKind {
        match self {
            PreviewKind::Circle => ShapeKind::Circle,
            PreviewKind::Rect => ShapeKind::Rect,
            PreviewKind::Line => ShapeKind::Line,
        }
    }

    /// Computes the shape spanned by a drag from `start` to `current`.
    ///
    /// - Circle: centered on `start`, radius is the drag distance
    /// - Rect: normalized corner-to-corner box
    /// - Line: `start` stays fixed, the end follows the pointer
    pub fn geometry(self, start: Point, current: Point) -> Shape {
        match self {
            PreviewKind::Circle => Shape::Circle {
                center: start,
                radius: util::distance(start, current),
            },
            PreviewKind::Rect => {
                let rect = Rect::from_corners(start, current);
                Shape::Rect {
                    origin: Point::new(rect.x, rect.y),
                    width: rect.width,
                    height: rect.height,
                }
            }
            PreviewKind::Line => Shape::Line {
                start,
                end: current,
            },
        }
    }

    /// Returns true if `shape` is large enough to keep.
    pub fn meets_minimum(self, shape: &Shape, thresholds: &Thresholds) -> bool {
        match shape {
            Shape::Circle { radius, .. } => *radius >= thresholds.min_circle_radius,
            Shape::Rect { width, height, .. } => {
                *width >= thresholds.min_rect_side && *height >= thresholds.min_rect_side
            }
            Shape::Line { start, end } => {
                util::distance(*start, *end) >= thresholds.min_line_length
            }
            Shape::Text(_) => true,
        }
    }

    fn stroke(self, style: &StyleCells) -> StrokeStyle {
        match self {
            PreviewKind::Line => style.stroke().without_fill(),
            PreviewKind::Circle | PreviewKind::Rect => style.stroke(),
        }
    }
}

/// Minimum sizes below which a gesture is discarded on commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_circle_radius: f64,
    pub min_rect_side: f64,
    pub min_line_length: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&ThresholdConfig::default())
    }
}

impl From<&ThresholdConfig> for Thresholds {
    fn from(config: &ThresholdConfig) -> Self {
        Self {
            min_circle_radius: config.min_circle_radius,
            min_rect_side: config.min_rect_side,
            min_line_length: config.min_line_length,
        }
    }
}

/// State of the gesture in flight.
///
/// The session is the preview's only owner until commit: the object lives on
/// the surface, but nothing else holds its id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Where the pointer went down, in surface coordinates
    pub start: Point,
    /// Transient preview object on the surface
    pub preview: ObjectId,
}

/// Gesture engine for one shape tool.
#[derive(Debug)]
pub struct ShapePreviewEngine {
    kind: PreviewKind,
    trigger: CommitTrigger,
    style: StyleCells,
    thresholds: Thresholds,
    bridge: PointerEventBridge,
    session: Option<GestureSession>,
}

impl ShapePreviewEngine {
    /// Creates an engine.
    ///
    /// # Arguments
    /// * `kind` - Shape drawn by this engine
    /// * `style` - Shared style cells read whenever a preview is created
    /// * `thresholds` - Minimum sizes checked on commit
    /// * `trigger` - Pointer event that commits the gesture
    pub fn new(
        kind: PreviewKind,
        style: StyleCells,
        thresholds: Thresholds,
        trigger: CommitTrigger,
    ) -> Self {
        let handlers = HandlerSet {
            on_move: true,
            on_down: true,
            on_up: trigger == CommitTrigger::PointerUp,
            on_double_click: trigger == CommitTrigger::DoubleClick,
            on_right_click: true,
        };

        Self {
            kind,
            trigger,
            style,
            thresholds,
            bridge: PointerEventBridge::new(listener_for(kind.tool()), handlers),
            session: None,
        }
    }

    pub fn kind(&self) -> PreviewKind {
        self.kind
    }

    pub fn trigger(&self) -> CommitTrigger {
        self.trigger
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Removes the preview of the gesture in flight, if any.
    fn discard(&mut self, surface: &mut dyn RenderingSurface) {
        if let Some(session) = self.session.take() {
            surface.remove_object(session.preview);
            surface.render_all();
            debug!("Discarded {:?} preview {:?}", self.kind, session.preview);
        }
    }

    /// Returns true if the pointer is over a persistent shape of our own kind.
    fn is_over_own_shape(&self, surface: &dyn RenderingSurface, event: &PointerEvent) -> bool {
        surface
            .hit_test(event)
            .and_then(|id| surface.object(id))
            .is_some_and(|object| {
                object.is_persistent() && object.kind() == self.kind.shape_kind()
            })
    }
}

impl ToolEngine for ShapePreviewEngine {
    fn tool(&self) -> Tool {
        self.kind.tool()
    }

    fn bridge(&self) -> &PointerEventBridge {
        &self.bridge
    }

    fn on_clean(&mut self, surface: Option<&mut dyn RenderingSurface>) {
        match surface {
            Some(surface) => {
                self.cancel(surface);
                self.bridge.on_clean(Some(surface));
            }
            None => {
                if self.session.take().is_some() {
                    debug!("{:?} gesture dropped without a surface", self.kind);
                }
            }
        }
    }

    fn cancel(&mut self, surface: &mut dyn RenderingSurface) {
        self.discard(surface);
    }

    /// Starts a gesture.
    ///
    /// # Behavior
    /// - Non-left buttons and presses during an active gesture are ignored
    /// - Pressing on an existing shape of the same kind is ignored so it can
    ///   be re-selected instead of drawn over
    /// - Otherwise a zero-size preview is placed at the pointer
    fn handle_down(&mut self, surface: &mut dyn RenderingSurface, event: &PointerEvent) {
        if event.button != MouseButton::Left || self.session.is_some() {
            return;
        }
        if self.is_over_own_shape(surface, event) {
            return;
        }

        let start = surface.to_surface_coordinates(event);
        let preview = SceneObject::preview(
            self.kind.geometry(start, start),
            self.kind.stroke(&self.style),
        );
        let preview = surface.add_object(preview);
        self.session = Some(GestureSession { start, preview });
        surface.render_all();
    }

    fn handle_move(&mut self, surface: &mut dyn RenderingSurface, event: &PointerEvent) {
        let Some(session) = self.session else {
            return;
        };

        let current = surface.to_surface_coordinates(event);
        let Some(object) = surface.object_mut(session.preview) else {
            debug!("{:?} preview vanished from the surface; ending gesture", self.kind);
            self.session = None;
            return;
        };
        object.shape = self.kind.geometry(session.start, current);
        surface.render_all();
    }

    /// Finishes the gesture.
    ///
    /// # Behavior
    /// - Geometry is recomputed from the commit position
    /// - Shapes below the minimum size are removed from the surface
    /// - Otherwise the preview is promoted in place to a selectable object
    ///
    /// The session is always cleared, whichever branch is taken.
    fn handle_commit(&mut self, surface: &mut dyn RenderingSurface, event: &PointerEvent) {
        let Some(session) = self.session.take() else {
            return;
        };

        let end = surface.to_surface_coordinates(event);
        let shape = self.kind.geometry(session.start, end);

        if !self.kind.meets_minimum(&shape, &self.thresholds) {
            surface.remove_object(session.preview);
            debug!("{:?} below minimum size; discarded", self.kind);
        } else if let Some(object) = surface.object_mut(session.preview) {
            object.shape = shape;
            object.promote();
            debug!("Committed {:?} as {:?}", self.kind, session.preview);
        }
        surface.render_all();
    }

    /// Right click cancels the gesture in flight.
    fn handle_right_click(&mut self, surface: &mut dyn RenderingSurface, _event: &PointerEvent) {
        self.discard(surface);
    }

    fn is_busy(&self) -> bool {
        self.session.is_some()
    }
}
