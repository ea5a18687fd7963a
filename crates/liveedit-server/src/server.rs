use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use liveedit_config::{Config, ServerConfig};
use liveedit_core::{PreviewSlot, RenderEngine};
use liveedit_storage::ProjectStore;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProjectStore>,
    pub engine: Arc<RenderEngine>,
    /// Live preview target; every preview request replaces its content
    pub preview: PreviewSlot,
}

impl AppState {
    pub fn new(store: Arc<ProjectStore>) -> Self {
        Self {
            store,
            engine: Arc::new(RenderEngine::new()),
            preview: PreviewSlot::new(),
        }
    }
}

/// Build the application router
///
/// Unmatched paths fall through to the static directory, where `/` serves
/// `index.html`.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_info))
        .route(
            "/api/projects",
            get(api::list_projects).post(api::save_project),
        )
        .route("/api/projects/save", post(api::save_project))
        .route(
            "/api/projects/:id",
            get(api::get_project).delete(api::delete_project),
        )
        .route("/api/projects/:id/preview", get(api::project_preview))
        .route("/api/preview", post(api::update_live_preview))
        .route("/preview", get(api::live_preview))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET handler for server info/health check
async fn handle_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "liveedit",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub struct LiveEditServer;

impl LiveEditServer {
    pub async fn serve(config: &Config) -> anyhow::Result<()> {
        let store = Arc::new(ProjectStore::new(config.storage.data_file.clone()));
        let app = router(AppState::new(store), &config.server);

        let addr = config.server.bind_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(
            "liveedit listening on {} (projects: {}, static: {})",
            addr,
            config.storage.data_file.display(),
            config.server.static_dir.display()
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}
