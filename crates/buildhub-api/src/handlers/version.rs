//! Document version handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use buildhub_core::types::DocumentId;
use buildhub_entity::document::DocumentVersion;

use crate::dto::request::UploadVersionRequest;
use crate::dto::response::{ApiResponse, DocumentResponse};
use crate::error::ApiResult;
use crate::extractors::{ActingUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/documents/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<DocumentId>,
) -> ApiResult<Json<ApiResponse<Vec<DocumentVersion>>>> {
    let versions = state.version_service.list_versions(&id).await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// POST /api/documents/{id}/versions
pub async fn upload_version(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<DocumentId>,
    ValidatedJson(req): ValidatedJson<UploadVersionRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DocumentResponse>>)> {
    let (upload, change_log) = req.into_parts();
    let document = state
        .version_service
        .upload_new_version(&user, &id, upload, change_log)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document.into()))))
}
