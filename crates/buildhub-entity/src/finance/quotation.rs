//! Quotations sent to clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use buildhub_core::result::AppResult;

use super::totals::{LineItem, Totals};

/// Quotation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    /// Being prepared.
    #[default]
    Draft,
    /// Sent to the client.
    Sent,
    /// Accepted by the client.
    Accepted,
    /// Rejected by the client.
    Rejected,
    /// Validity date passed without an answer.
    Expired,
}

/// A priced offer to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    /// Unique id.
    pub id: Uuid,
    /// Human-facing number, e.g. `Q-2024-001`.
    pub number: String,
    /// Client name.
    pub client: String,
    /// Priced lines.
    pub items: Vec<LineItem>,
    /// Status.
    pub status: QuotationStatus,
    /// Last day the offer holds.
    pub valid_until: Option<NaiveDate>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Quotation {
    /// Start a draft quotation.
    pub fn new(number: &str, client: &str, items: Vec<LineItem>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.to_string(),
            client: client.to_string(),
            items,
            status: QuotationStatus::Draft,
            valid_until: None,
            created_at: now,
        }
    }

    /// Totals over the quotation's items. Fails on an invalid item.
    pub fn totals(&self) -> AppResult<Totals> {
        Totals::checked_from_items(&self.items)
    }

    /// Whether the quotation is still open but past its validity date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self.status, QuotationStatus::Draft | QuotationStatus::Sent)
            && self.valid_until.is_some_and(|d| d < today)
    }
}
