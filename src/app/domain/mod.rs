//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Buffers and the workspace triple
//! - Selections inside a buffer
//! - Editor settings and the theme preference

pub mod selection;
pub mod settings;
pub mod theme;
pub mod workspace;

pub use selection::{Selection, SelectionTracker};
pub use settings::{EditorSettings, ModelChoice};
pub use theme::Theme;
pub use workspace::{Buffer, BufferKind, WorkspaceState};
