//! Document CRUD, tagging, and download handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use buildhub_core::error::AppError;
use buildhub_core::types::{DocumentId, TagId};

use crate::dto::request::{
    AddTagsRequest, CreateDocumentRequest, DocumentListQuery, UpdateDocumentRequest,
};
use crate::dto::response::{ApiResponse, DocumentResponse, DownloadResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{ActingUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
    _user: ActingUser,
    Query(query): Query<DocumentListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<DocumentResponse>>>> {
    let filter = query.into_filter()?;
    let documents = state.document_service.list(&filter).await?;
    Ok(Json(ApiResponse::ok(
        documents.into_iter().map(DocumentResponse::from).collect(),
    )))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<DocumentId>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    let document = state.document_service.get(&id).await?;
    Ok(Json(ApiResponse::ok(document.into())))
}

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    user: ActingUser,
    ValidatedJson(req): ValidatedJson<CreateDocumentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DocumentResponse>>)> {
    let (upload, options) = req.into_parts();
    let document = state.document_service.create(&user, upload, options).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document.into()))))
}

/// PUT /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<DocumentId>,
    ValidatedJson(req): ValidatedJson<UpdateDocumentRequest>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    let document = state
        .document_service
        .update(&user, &id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(document.into())))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<DocumentId>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.document_service.delete(&user, &id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Document deleted"))))
}

/// POST /api/documents/{id}/tags
pub async fn add_tags(
    State(state): State<AppState>,
    user: ActingUser,
    Path(id): Path<DocumentId>,
    ValidatedJson(req): ValidatedJson<AddTagsRequest>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    let document = state
        .document_service
        .add_tags(&user, &id, &req.tag_ids)
        .await?;
    Ok(Json(ApiResponse::ok(document.into())))
}

/// DELETE /api/documents/{id}/tags/{tag_id}
pub async fn remove_tag(
    State(state): State<AppState>,
    user: ActingUser,
    Path((id, tag_id)): Path<(DocumentId, TagId)>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    let document = state
        .document_service
        .remove_tags(&user, &id, &[tag_id])
        .await?;
    Ok(Json(ApiResponse::ok(document.into())))
}

/// GET /api/documents/{id}/download
pub async fn download_document(
    State(state): State<AppState>,
    _user: ActingUser,
    Path(id): Path<DocumentId>,
) -> ApiResult<Json<ApiResponse<DownloadResponse>>> {
    let document = state.document_service.get(&id).await?;
    let current = document
        .current_version()
        .ok_or_else(|| AppError::internal(format!("Document {id} has no active version")))?;
    Ok(Json(ApiResponse::ok(DownloadResponse::new(&document, current))))
}
