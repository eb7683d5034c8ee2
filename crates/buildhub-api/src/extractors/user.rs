//! `ActingUser` extractor: reads the numeric user id from `X-User-Id`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use buildhub_core::error::AppError;
use buildhub_service::RequestContext;

use crate::error::ApiError;

/// Header carrying the acting user's numeric id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The user on whose behalf the request runs.
///
/// Identity is asserted by the front office; it is not verified here.
#[derive(Debug, Clone)]
pub struct ActingUser(pub RequestContext);

impl std::ops::Deref for ActingUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing X-User-Id header"))?;

        let user_id = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::authentication("Invalid X-User-Id header"))?;

        Ok(ActingUser(RequestContext::new(user_id)))
    }
}
