//! Text annotation engine.
//!
//! Clicking empty space places a new annotation holding the placeholder text
//! and puts it straight into editing with everything selected. The first real
//! keystroke replaces the placeholder (see [`TextAnnotationEngine::handle_key`]).
//! While an annotation is being edited, the cursor-sync ticker keeps the
//! surface repainting.

use std::time::{Duration, Instant};

use log::debug;

use super::bridge::{HandlerSet, PointerEventBridge};
use super::engine::{ToolEngine, listener_for};
use super::events::{Key, KeyEvent, KeyOutcome, MouseButton, PointerEvent};
use super::ticker::CursorSyncTicker;
use super::tool::Tool;
use crate::config::TextConfig;
use crate::draw::{SceneObject, StyleCells, TextAnnotation};
use crate::surface::{ObjectId, RenderingSurface};

/// Editing state of the text tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextState {
    #[default]
    Idle,
    /// An annotation owns the text input.
    Editing {
        target: ObjectId,
        /// The next content-producing key clears the placeholder first
        override_armed: bool,
    },
}

/// Gesture engine for the text tool.
#[derive(Debug)]
pub struct TextAnnotationEngine {
    style: StyleCells,
    placeholder: String,
    font_family: String,
    bridge: PointerEventBridge,
    ticker: CursorSyncTicker,
    state: TextState,
}

impl TextAnnotationEngine {
    pub fn new(style: StyleCells, config: &TextConfig) -> Self {
        let handlers = HandlerSet {
            on_down: true,
            ..HandlerSet::default()
        };

        Self {
            style,
            placeholder: config.placeholder.clone(),
            font_family: config.font_family.clone(),
            bridge: PointerEventBridge::new(listener_for(Tool::Text), handlers),
            ticker: CursorSyncTicker::new(Duration::from_millis(config.cursor_sync_interval_ms)),
            state: TextState::Idle,
        }
    }

    pub fn state(&self) -> TextState {
        self.state
    }

    /// Annotation currently being edited, if any.
    pub fn editing_target(&self) -> Option<ObjectId> {
        match self.state {
            TextState::Editing { target, .. } => Some(target),
            TextState::Idle => None,
        }
    }

    pub fn is_override_armed(&self) -> bool {
        matches!(
            self.state,
            TextState::Editing {
                override_armed: true,
                ..
            }
        )
    }

    pub fn ticker(&self) -> &CursorSyncTicker {
        &self.ticker
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Applies the first-keystroke override to a key pressed while editing.
    ///
    /// Only the first content-producing key after a new annotation is placed
    /// is affected:
    /// - Backspace/Delete empty the annotation and return
    ///   [`KeyOutcome::PreventDefault`]
    /// - Printable characters and Enter return [`KeyOutcome::Continue`]; the
    ///   placeholder is still fully selected, so the host's insertion replaces it
    ///
    /// Navigation and modifier keys, and chords with Ctrl/Alt/Meta, leave the
    /// override armed.
    pub fn handle_key(
        &mut self,
        surface: &mut dyn RenderingSurface,
        event: &KeyEvent,
    ) -> KeyOutcome {
        let TextState::Editing {
            target,
            override_armed: true,
        } = self.state
        else {
            return KeyOutcome::Continue;
        };

        if !surface.is_editing(target) {
            self.on_editing_exited(surface, target);
            return KeyOutcome::Continue;
        }
        if event.modifiers.is_shortcut() || event.key.is_navigation_or_modifier() {
            return KeyOutcome::Continue;
        }

        match event.key {
            Key::Backspace | Key::Delete => {
                self.disarm();
                surface.set_text(target, "", 0);
                surface.render_all();
                debug!("Cleared placeholder of {:?}", target);
                KeyOutcome::PreventDefault
            }
            Key::Char(_) | Key::Enter => {
                self.disarm();
                let all_selected = surface
                    .object(target)
                    .and_then(SceneObject::as_text)
                    .is_some_and(TextAnnotation::is_all_selected);
                if !all_selected {
                    surface.select_all(target);
                }
                KeyOutcome::Continue
            }
            _ => KeyOutcome::Continue,
        }
    }

    /// Reacts to `id` leaving editing, whoever ended it.
    pub fn on_editing_exited(&mut self, surface: &mut dyn RenderingSurface, id: ObjectId) {
        if self.editing_target() == Some(id) {
            self.state = TextState::Idle;
        }
        if self.ticker.target() == Some(id) {
            self.ticker.cancel();
        }
        surface.render_all();
        debug!("Editing of {:?} ended", id);
    }

    /// Polls the cursor-sync ticker. Returns true if a repaint was requested.
    pub fn tick(&mut self, surface: &mut dyn RenderingSurface, now: Instant) -> bool {
        let Some(target) = self.ticker.poll(now) else {
            return false;
        };

        if surface.is_editing(target) {
            surface.render_all();
            true
        } else {
            self.on_editing_exited(surface, target);
            false
        }
    }

    fn disarm(&mut self) {
        if let TextState::Editing { override_armed, .. } = &mut self.state {
            *override_armed = false;
        }
    }

    fn begin_editing(&mut self, surface: &mut dyn RenderingSurface, id: ObjectId, armed: bool) {
        surface.enter_editing(id);
        surface.select_all(id);
        surface.focus_input(id);
        self.state = TextState::Editing {
            target: id,
            override_armed: armed,
        };
        self.ticker.start(id);
        surface.render_all();
    }

    /// Exits editing on the current target, keeping its content.
    fn end_editing(&mut self, surface: &mut dyn RenderingSurface) {
        if let Some(target) = self.editing_target() {
            surface.exit_editing(target);
            self.on_editing_exited(surface, target);
        }
    }

    fn focus_existing(&mut self, surface: &mut dyn RenderingSurface, id: ObjectId) {
        if self.editing_target().is_some_and(|current| current != id) {
            self.end_editing(surface);
        }
        surface.set_active_object(id);
        self.begin_editing(surface, id, false);
    }

    fn create_at(&mut self, surface: &mut dyn RenderingSurface, event: &PointerEvent) {
        let position = surface.to_surface_coordinates(event);
        let annotation = TextAnnotation::new(
            position,
            &self.placeholder,
            self.style.font_size(),
            self.style.font_color(),
            &self.font_family,
        );
        let id = surface.add_object(SceneObject::text(annotation, self.style.stroke()));
        surface.set_active_object(id);
        self.begin_editing(surface, id, true);
        debug!("Placed text annotation {:?} at ({}, {})", id, position.x, position.y);
    }
}

impl ToolEngine for TextAnnotationEngine {
    fn tool(&self) -> Tool {
        Tool::Text
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
                self.ticker.cancel();
                self.state = TextState::Idle;
            }
        }
    }

    /// Force-exits the edit in flight, keeping the annotation's content.
    fn cancel(&mut self, surface: &mut dyn RenderingSurface) {
        if let Some(target) = self.editing_target() {
            surface.exit_editing(target);
            surface.discard_active_object();
            surface.render_all();
        }
        self.ticker.cancel();
        self.state = TextState::Idle;
    }

    /// Places, focuses or finishes an annotation.
    ///
    /// # Behavior
    /// - On an existing annotation: edit it (ending any other edit first)
    /// - Elsewhere while editing: finish the edit, nothing new is placed
    /// - Elsewhere while idle: place a new annotation with the placeholder
    fn handle_down(&mut self, surface: &mut dyn RenderingSurface, event: &PointerEvent) {
        if event.button != MouseButton::Left {
            return;
        }

        if let Some(id) = text_under_pointer(surface, event) {
            self.focus_existing(surface, id);
            return;
        }

        if self.editing_target().is_some() {
            self.end_editing(surface);
            surface.discard_active_object();
            return;
        }

        self.create_at(surface, event);
    }

    fn is_busy(&self) -> bool {
        self.state != TextState::Idle
    }
}

/// Topmost evented text annotation under the pointer.
///
/// Shapes drawn over an annotation do not hide it from the text tool.
fn text_under_pointer(surface: &dyn RenderingSurface, event: &PointerEvent) -> Option<ObjectId> {
    let point = surface.to_surface_coordinates(event);
    surface.object_ids().into_iter().rev().find(|id| {
        surface.object(*id).is_some_and(|object| {
            object.evented
                && object.as_text().is_some()
                && object.shape.contains(point, object.stroke.width)
        })
    })
}
