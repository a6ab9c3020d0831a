//! Pointer listener registration for one engine.

use super::events::PointerEventKind;
use crate::surface::{EventSource, ListenerId};

/// Which pointer callbacks an engine implements.
///
/// Every flag is optional; the bridge only subscribes to the channels whose
/// flag is set. The context-menu channel is always subscribed so the native
/// menu never opens over a drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandlerSet {
    pub on_move: bool,
    pub on_down: bool,
    pub on_up: bool,
    pub on_double_click: bool,
    pub on_right_click: bool,
}

/// Callback selected for an incoming pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Move,
    Down,
    Up,
    DoubleClick,
    RightClick,
}

/// Subscribes one handler set to a surface's pointer stream.
///
/// The bridge owns no reference to the surface; callers pass it in (or `None`
/// when the surface is not mounted, in which case every call is a no-op).
/// `on_init` and `on_clean` are symmetric and both idempotent.
#[derive(Debug, Clone)]
pub struct PointerEventBridge {
    listener: ListenerId,
    handlers: HandlerSet,
}

impl PointerEventBridge {
    pub fn new(listener: ListenerId, handlers: HandlerSet) -> Self {
        Self { listener, handlers }
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    pub fn handlers(&self) -> HandlerSet {
        self.handlers
    }

    /// Event kinds this bridge subscribes to.
    pub fn subscriptions(&self) -> Vec<PointerEventKind> {
        let HandlerSet {
            on_move,
            on_down,
            on_up,
            on_double_click,
            ..
        } = self.handlers;

        [
            (on_move, PointerEventKind::Move),
            (on_down, PointerEventKind::Down),
            (on_up, PointerEventKind::Up),
            (on_double_click, PointerEventKind::DoubleClick),
            (true, PointerEventKind::ContextMenu),
        ]
        .into_iter()
        .filter_map(|(enabled, kind)| enabled.then_some(kind))
        .collect()
    }

    /// Registers the handler set on `source`.
    ///
    /// Returns a disposer that undoes exactly this registration, or `None`
    /// when no surface is available.
    pub fn on_init<S>(&self, source: Option<&mut S>) -> Option<BridgeDisposer>
    where
        S: EventSource + ?Sized,
    {
        let source = source?;
        let kinds = self.subscriptions();
        for kind in &kinds {
            source.on(*kind, self.listener);
        }
        log::debug!(
            "Attached listener {:?} to {} pointer channel(s)",
            self.listener,
            kinds.len()
        );

        Some(BridgeDisposer {
            listener: self.listener,
            kinds,
        })
    }

    /// Removes the handler set from `source`.
    ///
    /// Safe on a bridge that was never initialized or is already cleaned.
    pub fn on_clean<S>(&self, source: Option<&mut S>)
    where
        S: EventSource + ?Sized,
    {
        let Some(source) = source else {
            return;
        };
        for kind in self.subscriptions() {
            source.off(kind, self.listener);
        }
    }

    /// Returns true if any of this bridge's listeners is registered on `source`.
    pub fn is_attached<S>(&self, source: &S) -> bool
    where
        S: EventSource + ?Sized,
    {
        self.subscriptions()
            .into_iter()
            .any(|kind| source.has_listener(kind, self.listener))
    }

    /// Selects the callback for an event of `kind`.
    ///
    /// Context-menu events map to the right-click handler when one is
    /// present; the default menu is suppressed either way.
    pub fn route(&self, kind: PointerEventKind) -> Option<Handler> {
        let handlers = self.handlers;
        match kind {
            PointerEventKind::Move => handlers.on_move.then_some(Handler::Move),
            PointerEventKind::Down => handlers.on_down.then_some(Handler::Down),
            PointerEventKind::Up => handlers.on_up.then_some(Handler::Up),
            PointerEventKind::DoubleClick => {
                handlers.on_double_click.then_some(Handler::DoubleClick)
            }
            PointerEventKind::ContextMenu => {
                handlers.on_right_click.then_some(Handler::RightClick)
            }
        }
    }
}

/// Undo handle returned by [`PointerEventBridge::on_init`].
///
/// Disposing is equivalent to calling `on_clean` on the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping the disposer leaves the listeners attached"]
pub struct BridgeDisposer {
    listener: ListenerId,
    kinds: Vec<PointerEventKind>,
}

impl BridgeDisposer {
    pub fn dispose<S>(self, source: Option<&mut S>)
    where
        S: EventSource + ?Sized,
    {
        let Some(source) = source else {
            return;
        };
        for kind in self.kinds {
            source.off(kind, self.listener);
        }
    }
}
