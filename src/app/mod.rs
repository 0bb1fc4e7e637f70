//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Buffers, Selection, Settings, Theme)
//! - `controllers/` - Orchestration (BufferStore, Preview, Status, Generation, Explain)
//! - `services/` - Business operations (composer, AI client, archive, import, snippets)
//! - `infrastructure/` - External integrations (storage, error)
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::{BufferStore, GenerationError, PreviewController, StatusBoard};
pub use domain::{BufferKind, EditorSettings, Selection, Theme, WorkspaceState};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::storage::{FileStorage, MemoryStorage, Storage};
pub use services::ai_client::{AiClient, GeminiClient};
pub use services::composer::{ComposedDocument, compose};
pub use state::{Editor, GenerationOutcome};
