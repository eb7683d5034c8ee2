//! Tag handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use buildhub_entity::tag::DocumentTag;

use crate::dto::request::CreateTagRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{ActingUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    _user: ActingUser,
) -> ApiResult<Json<ApiResponse<Vec<DocumentTag>>>> {
    let tags = state.tag_service.list().await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    user: ActingUser,
    ValidatedJson(req): ValidatedJson<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DocumentTag>>)> {
    let tag = state.tag_service.create(&user, &req.name, &req.color).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag))))
}
