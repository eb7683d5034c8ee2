//! Folder CRUD and tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use buildhub_core::types::FolderId;
use buildhub_entity::folder::{Folder, FolderTree};

use crate::dto::request::{CreateFolderRequest, UpdateFolderRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ActingUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    _user: ActingUser,
) -> ApiResult<Json<ApiResponse<Vec<Folder>>>> {
    let folders = state.folder_service.list().await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/tree
pub async fn get_tree(
    State(state): State<AppState>,
    _user: ActingUser,
) -> ApiResult<Json<ApiResponse<FolderTree>>> {
    let tree = state.tree_service.tree().await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.get(&id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    user: ActingUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    let folder = state
        .folder_service
        .create(&user, &req.name, req.parent_id.as_ref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<FolderId>,
    ValidatedJson(req): ValidatedJson<UpdateFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.update(&user, &id, req.into()).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<FolderId>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.folder_service.delete(&user, &id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder deleted"))))
}
