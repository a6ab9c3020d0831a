//! In-memory rendering surface.

use super::{EventSource, ListenerId, ObjectId, RenderingSurface};
use crate::draw::{SceneObject, ShapeKind, TextAnnotation};
use crate::input::events::{Key, KeyEvent, PointerEvent, PointerEventKind};
use crate::util::Point;

/// Scene graph kept entirely in memory.
///
/// Objects are stored in paint order (first = bottom layer, last = top layer).
/// Rendering requests are only counted, which makes the surface suitable for
/// headless hosts and for asserting repaint behaviour in tests.
#[derive(Debug)]
pub struct MemorySurface {
    objects: Vec<(ObjectId, SceneObject)>,
    next_id: u64,
    listeners: Vec<(PointerEventKind, ListenerId)>,
    selection_enabled: bool,
    active: Option<ObjectId>,
    focused: Option<ObjectId>,
    render_count: u64,
    origin: Point,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    /// Creates an empty surface whose client and surface coordinates coincide.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
            listeners: Vec::new(),
            selection_enabled: true,
            active: None,
            focused: None,
            render_count: 0,
            origin: Point::default(),
        }
    }

    /// Creates a surface whose top-left corner sits at `origin` in client space.
    pub fn with_origin(origin: Point) -> Self {
        Self {
            origin,
            ..Self::new()
        }
    }

    /// All objects in paint order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of objects that belong to the persistent scene.
    pub fn persistent_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|(_, object)| object.is_persistent())
            .count()
    }

    /// Number of transient (non-interactive) preview objects.
    pub fn preview_count(&self) -> usize {
        self.object_count() - self.persistent_count()
    }

    /// Persistent objects of one kind, in paint order.
    pub fn persistent_of(&self, kind: ShapeKind) -> Vec<&SceneObject> {
        self.objects
            .iter()
            .map(|(_, object)| object)
            .filter(|object| object.is_persistent() && object.kind() == kind)
            .collect()
    }

    /// Total number of listener registrations across all event kinds.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn focused(&self) -> Option<ObjectId> {
        self.focused
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn text(&self, id: ObjectId) -> Option<&TextAnnotation> {
        self.object(id).and_then(SceneObject::as_text)
    }

    /// Applies a key's default effect to the focused text object.
    ///
    /// This is the normal text-insertion path: printable characters and Enter
    /// replace the selection, Backspace/Delete remove the selection or one
    /// character, arrows and Home/End move the caret. Keys pressed with a
    /// shortcut modifier insert nothing.
    ///
    /// Returns `true` if the content or caret changed.
    pub fn apply_key(&mut self, event: &KeyEvent) -> bool {
        let Some(id) = self.focused else {
            return false;
        };
        let Some(text) = self.object_mut(id).and_then(SceneObject::as_text_mut) else {
            return false;
        };
        if !text.is_editing() {
            return false;
        }

        let changed = match event.key {
            Key::Char(c) if !event.modifiers.is_shortcut() => {
                replace_selection(text, &c.to_string());
                true
            }
            Key::Enter => {
                replace_selection(text, "\n");
                true
            }
            Key::Backspace => delete_backward(text),
            Key::Delete => delete_forward(text),
            Key::ArrowLeft | Key::Home => {
                let target = if event.key == Key::Home {
                    0
                } else if text.selection_start != text.selection_end {
                    text.selection_start
                } else {
                    text.selection_start.saturating_sub(1)
                };
                text.set_cursor(target);
                true
            }
            Key::ArrowRight | Key::End => {
                let target = if event.key == Key::End {
                    text.char_len()
                } else if text.selection_start != text.selection_end {
                    text.selection_end
                } else {
                    text.selection_end + 1
                };
                text.set_cursor(target);
                true
            }
            _ => false,
        };

        if changed {
            self.render_all();
        }
        changed
    }
}

fn replace_selection(text: &mut TextAnnotation, insert: &str) {
    let mut chars: Vec<char> = text.content.chars().collect();
    let start = text.selection_start.min(chars.len());
    let end = text.selection_end.clamp(start, chars.len());
    let inserted = insert.chars().count();

    chars.splice(start..end, insert.chars());
    text.set_content(chars.into_iter().collect::<String>(), start + inserted);
}

fn delete_backward(text: &mut TextAnnotation) -> bool {
    if text.selection_start != text.selection_end {
        replace_selection(text, "");
        return true;
    }
    if text.selection_start == 0 {
        return false;
    }
    text.selection_start -= 1;
    replace_selection(text, "");
    true
}

fn delete_forward(text: &mut TextAnnotation) -> bool {
    if text.selection_start != text.selection_end {
        replace_selection(text, "");
        return true;
    }
    if text.selection_end >= text.char_len() {
        return false;
    }
    text.selection_end += 1;
    replace_selection(text, "");
    true
}

impl EventSource for MemorySurface {
    fn on(&mut self, kind: PointerEventKind, listener: ListenerId) {
        if !self.has_listener(kind, listener) {
            self.listeners.push((kind, listener));
        }
    }

    fn off(&mut self, kind: PointerEventKind, listener: ListenerId) {
        self.listeners.retain(|(registered_kind, registered)| {
            !(*registered_kind == kind && *registered == listener)
        });
    }

    fn listeners(&self, kind: PointerEventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(registered_kind, _)| *registered_kind == kind)
            .map(|(_, listener)| *listener)
            .collect()
    }
}

impl RenderingSurface for MemorySurface {
    fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|(existing, _)| *existing == id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        Some(self.objects.remove(index).1)
    }

    fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|(id, _)| *id).collect()
    }

    fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, object)| object)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(existing, _)| *existing == id)
            .map(|(_, object)| object)
    }

    fn render_all(&mut self) {
        self.render_count += 1;
    }

    fn hit_test(&self, event: &PointerEvent) -> Option<ObjectId> {
        let point = self.to_surface_coordinates(event);
        self.objects
            .iter()
            .rev()
            .find(|(_, object)| {
                object.evented && object.shape.contains(point, object.stroke.width)
            })
            .map(|(id, _)| *id)
    }

    fn set_active_object(&mut self, id: ObjectId) {
        if self.object(id).is_some() {
            self.active = Some(id);
        }
    }

    fn discard_active_object(&mut self) {
        self.active = None;
    }

    fn to_surface_coordinates(&self, event: &PointerEvent) -> Point {
        Point::new(event.x - self.origin.x, event.y - self.origin.y)
    }

    fn selection_enabled(&self) -> bool {
        self.selection_enabled
    }

    fn set_selection_enabled(&mut self, enabled: bool) {
        self.selection_enabled = enabled;
    }

    fn focus_input(&mut self, id: ObjectId) {
        if self.object(id).and_then(SceneObject::as_text).is_some() {
            self.focused = Some(id);
        }
    }
}
