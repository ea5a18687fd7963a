//! Storage layer for liveedit
//!
//! This crate provides:
//! - The project store (one JSON file holding every saved bundle, newest first)
//! - Storage error types

pub mod error;
pub mod store;

pub use error::{Result, StorageError};
pub use store::ProjectStore;
