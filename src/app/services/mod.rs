//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Document composition for the preview
//! - The text-generation client and its prompts
//! - ZIP export and file import
//! - Snippets and small text helpers

pub mod ai_client;
pub mod archive;
pub mod composer;
pub mod import;
pub mod prompts;
pub mod snippets;
pub mod text_ops;
