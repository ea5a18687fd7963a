//! Core domain models and logic for liveedit
//!
//! This crate contains:
//! - Domain models (SnippetBundle, BundleDraft)
//! - Render engine (composes a bundle into a standalone preview document)
//! - Preview surfaces the composed document is handed to

pub mod bundle;
pub mod error;
pub mod render;

pub use bundle::{BundleDraft, SnippetBundle, SnippetParts, format_size};
pub use error::{CoreError, Result};
pub use render::{PreviewSlot, PreviewSurface, RenderEngine, RenderedDocument};
