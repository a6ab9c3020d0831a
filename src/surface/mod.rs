//! Rendering surface capabilities consumed by the tools.
//!
//! The tools never draw anything themselves. They talk to a scene-graph style
//! surface through two traits:
//! - [`EventSource`]: pointer listener registration
//! - [`RenderingSurface`]: object storage, hit testing, rendering requests and
//!   the per-object text editing operations
//!
//! [`MemorySurface`] is a complete in-memory implementation for hosts without
//! a scene graph of their own, and for tests.

pub mod memory;

pub use memory::MemorySurface;

use crate::draw::{EditingState, SceneObject};
use crate::input::events::{PointerEvent, PointerEventKind};
use crate::util::Point;

/// Handle of an object stored on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Handle identifying one listener (one engine's handler set) on an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Pointer listener registry of a surface.
///
/// Registration is set-like: registering the same listener twice for a kind
/// has no extra effect, and removing an unregistered listener is a no-op.
pub trait EventSource {
    /// Registers `listener` for events of `kind`.
    fn on(&mut self, kind: PointerEventKind, listener: ListenerId);

    /// Removes `listener` from events of `kind`.
    fn off(&mut self, kind: PointerEventKind, listener: ListenerId);

    /// Listeners currently registered for `kind`, in registration order.
    fn listeners(&self, kind: PointerEventKind) -> Vec<ListenerId>;

    fn has_listener(&self, kind: PointerEventKind, listener: ListenerId) -> bool {
        self.listeners(kind).contains(&listener)
    }
}

/// Scene-graph operations the tools need from a drawing surface.
pub trait RenderingSurface: EventSource {
    /// Adds an object on top of the scene and returns its handle.
    fn add_object(&mut self, object: SceneObject) -> ObjectId;

    /// Removes an object, returning it if it was present.
    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject>;

    /// Handles of every object, bottom layer first.
    fn object_ids(&self) -> Vec<ObjectId>;

    fn object(&self, id: ObjectId) -> Option<&SceneObject>;

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject>;

    /// Requests a repaint of the whole scene.
    fn render_all(&mut self);

    /// Topmost evented object under the pointer, if any.
    fn hit_test(&self, event: &PointerEvent) -> Option<ObjectId>;

    fn set_active_object(&mut self, id: ObjectId);

    fn discard_active_object(&mut self);

    /// Maps a client-space pointer position into surface coordinates.
    fn to_surface_coordinates(&self, event: &PointerEvent) -> Point;

    /// Whether clicking picks existing objects (rubber-band selection etc.).
    fn selection_enabled(&self) -> bool;

    fn set_selection_enabled(&mut self, enabled: bool);

    /// Puts a text object into editing mode.
    fn enter_editing(&mut self, id: ObjectId) {
        if let Some(text) = self.object_mut(id).and_then(SceneObject::as_text_mut) {
            text.editing = EditingState::Editing;
        }
    }

    /// Leaves editing mode, keeping the content.
    fn exit_editing(&mut self, id: ObjectId) {
        if let Some(text) = self.object_mut(id).and_then(SceneObject::as_text_mut) {
            text.editing = EditingState::Idle;
            let end = text.selection_end;
            text.set_cursor(end);
        }
    }

    fn is_editing(&self, id: ObjectId) -> bool {
        self.object(id)
            .and_then(SceneObject::as_text)
            .is_some_and(|text| text.is_editing())
    }

    fn select_all(&mut self, id: ObjectId) {
        if let Some(text) = self.object_mut(id).and_then(SceneObject::as_text_mut) {
            text.select_all();
        }
    }

    /// Routes keyboard input to the text object (hidden textarea, IME, ...).
    fn focus_input(&mut self, id: ObjectId);

    /// Replaces a text object's content and collapses the caret at `cursor`.
    fn set_text(&mut self, id: ObjectId, content: &str, cursor: usize) {
        if let Some(text) = self.object_mut(id).and_then(SceneObject::as_text_mut) {
            text.set_content(content, cursor);
        }
    }
}
