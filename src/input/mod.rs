//! Input handling and tool state machines.
//!
//! This module turns host pointer and keyboard events into annotation
//! gestures. [`ToolController`] owns the surface and switches between the
//! per-tool engines; each engine registers its listeners through a
//! [`PointerEventBridge`] and drives its own gesture state machine.

pub mod bridge;
pub mod controller;
pub mod engine;
pub mod events;
pub mod modifiers;
pub mod shape_engine;
pub mod text_engine;
pub mod ticker;
pub mod tool;

#[cfg(test)]
mod tests;

// Re-export commonly used types at module level
pub use bridge::{BridgeDisposer, Handler, HandlerSet, PointerEventBridge};
pub use controller::{DispatchOutcome, ToolController};
pub use engine::ToolEngine;
pub use events::{Key, KeyEvent, KeyOutcome, MouseButton, PointerEvent, PointerEventKind};
pub use modifiers::Modifiers;
pub use shape_engine::{GestureSession, PreviewKind, ShapePreviewEngine, Thresholds};
pub use text_engine::{TextAnnotationEngine, TextState};
pub use ticker::CursorSyncTicker;
pub use tool::Tool;
