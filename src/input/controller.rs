//! Tool controller: owns the surface and the per-tool engines.

use std::time::Instant;

use log::debug;

use super::engine::{ToolEngine, dispatch};
use super::events::{Key, KeyEvent, KeyOutcome, PointerEvent, PointerEventKind};
use super::shape_engine::{PreviewKind, ShapePreviewEngine, Thresholds};
use super::text_engine::TextAnnotationEngine;
use super::tool::Tool;
use crate::config::{CommitTrigger, Config};
use crate::draw::StyleCells;
use crate::surface::{MemorySurface, ObjectId, RenderingSurface};

/// Result of routing one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// At least one engine callback ran
    pub handled: bool,
    /// The host should suppress the event's default action (context menu)
    pub prevent_default: bool,
}

/// One engine per drawing tool.
#[derive(Debug)]
struct Engines {
    circle: ShapePreviewEngine,
    rect: ShapePreviewEngine,
    line: ShapePreviewEngine,
    text: TextAnnotationEngine,
}

impl Engines {
    fn from_config(config: &Config, style: &StyleCells) -> Self {
        let thresholds = Thresholds::from(&config.thresholds);
        let shape = |kind: PreviewKind, trigger: CommitTrigger| {
            ShapePreviewEngine::new(kind, style.clone(), thresholds, trigger)
        };

        Self {
            circle: shape(PreviewKind::Circle, CommitTrigger::PointerUp),
            rect: shape(PreviewKind::Rect, CommitTrigger::PointerUp),
            line: shape(PreviewKind::Line, config.line.commit_trigger),
            text: TextAnnotationEngine::new(style.clone(), &config.text),
        }
    }

    fn get(&self, tool: Tool) -> Option<&dyn ToolEngine> {
        match tool {
            Tool::None => None,
            Tool::Circle => Some(&self.circle),
            Tool::Rect => Some(&self.rect),
            Tool::Line => Some(&self.line),
            Tool::Text => Some(&self.text),
        }
    }

    fn get_mut(&mut self, tool: Tool) -> Option<&mut dyn ToolEngine> {
        match tool {
            Tool::None => None,
            Tool::Circle => Some(&mut self.circle),
            Tool::Rect => Some(&mut self.rect),
            Tool::Line => Some(&mut self.line),
            Tool::Text => Some(&mut self.text),
        }
    }

    fn all_mut(&mut self) -> [&mut dyn ToolEngine; 4] {
        [
            &mut self.circle,
            &mut self.rect,
            &mut self.line,
            &mut self.text,
        ]
    }
}

/// Switches between drawing tools and routes host events to them.
///
/// The controller is the single owner of the session: the current tool, the
/// mounted surface and every engine's in-flight state. Exactly one tool (or
/// none) is active; only the active engine has listeners on the surface.
///
/// Surface-wide object selection is disabled while a drawing tool is active
/// and re-enabled when the controller returns to [`Tool::None`].
#[derive(Debug)]
pub struct ToolController<S: RenderingSurface> {
    surface: Option<S>,
    current: Tool,
    style: StyleCells,
    engines: Engines,
}

impl<S: RenderingSurface> ToolController<S> {
    /// Creates a controller without a surface.
    ///
    /// `config` should already be validated; [`Config::load`] does that, a
    /// hand-built config goes through [`Config::validate_and_clamp`].
    pub fn new(config: &Config) -> Self {
        let style = StyleCells::from_config(&config.drawing);
        let engines = Engines::from_config(config, &style);

        Self {
            surface: None,
            current: Tool::None,
            style,
            engines,
        }
    }

    pub fn with_surface(config: &Config, surface: S) -> Self {
        let mut controller = Self::new(config);
        let _ = controller.mount(surface);
        controller
    }

    /// Attaches `surface`, returning the previously mounted one.
    ///
    /// If a tool is already active its engine is initialized on the new
    /// surface.
    pub fn mount(&mut self, surface: S) -> Option<S> {
        let previous = self.unmount();
        self.surface = Some(surface);
        self.init_engine(self.current);
        self.sync_selection();
        previous
    }

    /// Detaches the surface after cleaning the active engine.
    ///
    /// The current tool is kept and re-initialized on the next mount.
    pub fn unmount(&mut self) -> Option<S> {
        self.clean_engine(self.current);
        let mut surface = self.surface.take()?;
        surface.set_selection_enabled(true);
        Some(surface)
    }

    /// Activates `tool`, or deactivates it when it is already current.
    ///
    /// Switching cleans the previous engine first, so its preview is gone and
    /// its listeners are detached before the new engine attaches.
    pub fn toggle_tool(&mut self, tool: Tool) {
        let previous = self.current;

        if tool == previous {
            self.current = Tool::None;
            self.clean_engine(tool);
        } else {
            self.clean_engine(previous);
            self.current = tool;
            self.init_engine(tool);
        }
        self.sync_selection();

        if self.surface.is_none() {
            debug!("Tool switched without a mounted surface");
        }
        debug!("Tool changed: {} -> {}", previous, self.current);
    }

    /// Deactivates the current tool and cleans every engine. Idempotent.
    pub fn teardown(&mut self) {
        let previous = std::mem::take(&mut self.current);

        for engine in self.engines.all_mut() {
            match self.surface.as_mut() {
                Some(surface) => engine.on_clean(Some(surface)),
                None => engine.on_clean(None),
            }
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_selection_enabled(true);
        }

        if !previous.is_none() {
            debug!("Tore down {} tool", previous);
        }
    }

    /// Removes every object from the surface.
    ///
    /// The active engine drops its preview or edit first but keeps its
    /// listeners, so the current tool stays usable.
    pub fn clear_surface(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Nothing to clear: no surface mounted");
            return;
        };

        if let Some(engine) = self.engines.get_mut(self.current) {
            engine.cancel(surface);
        }

        let ids = surface.object_ids();
        for id in &ids {
            surface.remove_object(*id);
        }
        surface.discard_active_object();
        surface.render_all();
        debug!("Cleared {} object(s) from the surface", ids.len());
    }

    /// Routes a pointer event to every engine listening for its kind.
    pub fn dispatch_pointer(&mut self, event: &PointerEvent) -> DispatchOutcome {
        let Some(surface) = self.surface.as_mut() else {
            debug!("Ignoring {:?} event: no surface mounted", event.kind);
            return DispatchOutcome::default();
        };

        let listeners = surface.listeners(event.kind);
        let mut outcome = DispatchOutcome {
            handled: false,
            prevent_default: event.kind == PointerEventKind::ContextMenu && !listeners.is_empty(),
        };

        for engine in self.engines.all_mut() {
            let bridge = engine.bridge();
            if !listeners.contains(&bridge.listener()) {
                continue;
            }
            if let Some(handler) = bridge.route(event.kind) {
                dispatch(engine, handler, &mut *surface, event);
                outcome.handled = true;
            }
        }

        outcome
    }

    /// Forwards a key pressed while a text annotation is being edited.
    ///
    /// When this returns [`KeyOutcome::Continue`] the host applies the key's
    /// normal effect to the focused annotation.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return KeyOutcome::Continue;
        };
        self.engines.text.handle_key(surface, event)
    }

    /// Tells the text engine that `id` left editing on the surface's initiative.
    pub fn notify_editing_exited(&mut self, id: ObjectId) {
        if let Some(surface) = self.surface.as_mut() {
            self.engines.text.on_editing_exited(surface, id);
        }
    }

    /// Drives the cursor-sync ticker; call once per host frame.
    ///
    /// Returns true if a repaint was requested.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.surface.as_mut() {
            Some(surface) => self.engines.text.tick(surface, now),
            None => false,
        }
    }

    pub fn current_tool(&self) -> Tool {
        self.current
    }

    /// Shared style cells; changes apply to the next object created.
    pub fn style(&self) -> &StyleCells {
        &self.style
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn text_engine(&self) -> &TextAnnotationEngine {
        &self.engines.text
    }

    /// Returns true while the active engine has a gesture or edit in flight.
    pub fn has_active_gesture(&self) -> bool {
        self.engines
            .get(self.current)
            .is_some_and(|engine| engine.is_busy())
    }

    fn init_engine(&mut self, tool: Tool) {
        let (Some(engine), Some(surface)) = (self.engines.get_mut(tool), self.surface.as_mut())
        else {
            return;
        };
        engine.on_init(surface);
    }

    fn clean_engine(&mut self, tool: Tool) {
        let Some(engine) = self.engines.get_mut(tool) else {
            return;
        };
        match self.surface.as_mut() {
            Some(surface) => engine.on_clean(Some(surface)),
            None => engine.on_clean(None),
        }
    }

    fn sync_selection(&mut self) {
        let enabled = self.current.is_none();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_selection_enabled(enabled);
        }
    }
}

impl ToolController<MemorySurface> {
    /// Handles a key end to end on the in-memory surface: first-keystroke
    /// override, then the default text-insertion path unless prevented.
    pub fn press_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let outcome = self.handle_key(event);
        if outcome == KeyOutcome::Continue {
            if let Some(surface) = self.surface.as_mut() {
                surface.apply_key(event);
            }
        }
        outcome
    }

    /// Types `text` one character at a time through [`Self::press_key`].
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press_key(&KeyEvent::new(Key::Char(c)));
        }
    }
}
