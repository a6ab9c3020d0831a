//! Pointer-driven annotation tools for scene-graph drawing surfaces.
//!
//! A host application mounts its surface into a [`ToolController`], forwards
//! pointer and keyboard events to it, and polls [`ToolController::tick`] from
//! its frame loop. The controller switches between the circle, rectangle,
//! line and text tools and keeps exactly one of them attached to the surface.
//!
//! [`MemorySurface`] is a complete in-memory surface for hosts without a
//! scene graph of their own.

pub mod config;
pub mod draw;
pub mod input;
pub mod surface;
pub mod util;

pub use config::Config;
pub use input::{Tool, ToolController};
pub use surface::{MemorySurface, RenderingSurface};
