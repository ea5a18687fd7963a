//! HTTP surface for liveedit
//!
//! REST endpoints over the project store, live preview rendering, and static
//! serving of the editor's assets.

pub mod api;
pub mod server;

pub use api::ApiError;
pub use server::{AppState, LiveEditServer, router};
