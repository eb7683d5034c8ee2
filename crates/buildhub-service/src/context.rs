//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Built by the HTTP layer (or the CLI) and passed into mutating service
/// methods so that every change knows who made it and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: i64,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
