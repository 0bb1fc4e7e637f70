//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Key/value storage (files on disk, or memory)
//! - Error types

pub mod error;
pub mod storage;
