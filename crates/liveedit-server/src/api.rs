//! REST handlers for projects and previews

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use liveedit_core::{BundleDraft, CoreError, RenderedDocument};
use liveedit_storage::StorageError;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::server::AppState;

/// Browsers run preview documents in an opaque origin with this policy.
pub const PREVIEW_SANDBOX: &str = "sandbox allow-scripts allow-modals allow-forms";

/// Error returned by handlers, rendered as `{ "error": message }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(id) => {
                warn!(id = %id, "project not found");
                Self {
                    status: StatusCode::NOT_FOUND,
                    message: format!("Project '{}' not found", id),
                }
            }
            other => {
                error!("project storage failed: {}", other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: other.to_string(),
                }
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// GET /api/projects - List all projects, newest first
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = state.store.list_all().await?;
    Ok(Json(json!({ "projects": projects })))
}

/// POST /api/projects - Create a project, replacing any with the same name
pub async fn save_project(
    State(state): State<AppState>,
    Json(draft): Json<BundleDraft>,
) -> Result<Json<Value>, ApiError> {
    let bundle = draft.into_bundle()?;
    let id = bundle.id.clone();
    let name = bundle.name.clone();

    state.store.save(bundle).await?;
    info!(id = %id, name = %name, "project saved");

    Ok(Json(json!({ "success": true, "id": id })))
}

/// GET /api/projects/:id - Get one project
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let project = state.store.get_by_id(&id).await?;
    Ok(Json(json!({ "project": project })))
}

/// DELETE /api/projects/:id - Delete one project
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete_by_id(&id).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /api/projects/:id/preview - Composed document for a saved project
pub async fn project_preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let project = state.store.get_by_id(&id).await?;
    Ok(preview_response(state.engine.compose(&project)))
}

/// POST /api/preview - Render an unsaved draft into the live preview
pub async fn update_live_preview(
    State(state): State<AppState>,
    Json(draft): Json<BundleDraft>,
) -> Json<Value> {
    let mut surface = state.preview.clone();
    state.engine.render(&draft, &mut surface);
    Json(json!({ "success": true }))
}

/// GET /preview - Whatever the live preview currently shows
pub async fn live_preview(State(state): State<AppState>) -> Response {
    let document = state
        .preview
        .current()
        .unwrap_or_else(|| state.engine.compose(&BundleDraft::default()));
    preview_response(document)
}

fn preview_response(document: RenderedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_SECURITY_POLICY, PREVIEW_SANDBOX),
            (header::CACHE_CONTROL, "no-store"),
        ],
        document.into_html(),
    )
        .into_response()
}
