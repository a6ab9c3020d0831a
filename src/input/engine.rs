//! Shared contract of the per-tool engines.

use super::bridge::{Handler, PointerEventBridge};
use super::events::PointerEvent;
use super::tool::Tool;
use crate::surface::{ListenerId, RenderingSurface};

/// Pointer lifecycle of one drawing tool.
///
/// Engines never hold on to the surface; the controller lends it for the
/// duration of each call. `on_clean` receives `None` when no surface is
/// mounted and must still drop all gesture state in that case.
pub trait ToolEngine {
    /// Tool this engine implements.
    fn tool(&self) -> Tool;

    /// Listener registration of this engine.
    fn bridge(&self) -> &PointerEventBridge;

    /// Attaches the engine's listeners. Idempotent.
    fn on_init(&mut self, surface: &mut dyn RenderingSurface) {
        // Cleaning goes through `on_clean`, which undoes the same registration.
        let _ = self.bridge().on_init(Some(surface));
    }

    /// Discards in-flight work, then detaches the listeners. Idempotent.
    fn on_clean(&mut self, surface: Option<&mut dyn RenderingSurface>);

    /// Discards in-flight work but stays attached to the surface.
    fn cancel(&mut self, surface: &mut dyn RenderingSurface);

    fn handle_down(&mut self, surface: &mut dyn RenderingSurface, event: &PointerEvent);

    fn handle_move(&mut self, _surface: &mut dyn RenderingSurface, _event: &PointerEvent) {}

    /// Finishes the gesture (pointer-up or double-click, per configuration).
    fn handle_commit(&mut self, _surface: &mut dyn RenderingSurface, _event: &PointerEvent) {}

    fn handle_right_click(&mut self, _surface: &mut dyn RenderingSurface, _event: &PointerEvent) {
    }

    /// Returns true while a gesture or an edit is in flight.
    fn is_busy(&self) -> bool;
}

/// Listener handle used by the engine of `tool`.
pub(crate) fn listener_for(tool: Tool) -> ListenerId {
    ListenerId(tool as u64)
}

/// Invokes the engine callback selected by the bridge.
pub(crate) fn dispatch(
    engine: &mut dyn ToolEngine,
    handler: Handler,
    surface: &mut dyn RenderingSurface,
    event: &PointerEvent,
) {
    match handler {
        Handler::Down => engine.handle_down(surface, event),
        Handler::Move => engine.handle_move(surface, event),
        Handler::Up | Handler::DoubleClick => engine.handle_commit(surface, event),
        Handler::RightClick => engine.handle_right_click(surface, event),
    }
}
