//! Finance calculation handlers.

use axum::Json;

use buildhub_entity::finance::calculate_totals;

use crate::dto::request::TotalsRequest;
use crate::dto::response::{ApiResponse, TotalsResponse};
use crate::error::ApiResult;
use crate::extractors::{ActingUser, ValidatedJson};

/// POST /api/finance/totals
pub async fn totals(
    _user: ActingUser,
    ValidatedJson(req): ValidatedJson<TotalsRequest>,
) -> ApiResult<Json<ApiResponse<TotalsResponse>>> {
    let totals = calculate_totals(&req.items)?;
    Ok(Json(ApiResponse::ok(totals.into())))
}
