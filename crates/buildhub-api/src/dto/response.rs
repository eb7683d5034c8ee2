//! Response DTOs.

use serde::{Deserialize, Serialize};

use buildhub_database::DatabaseHealth;
use buildhub_entity::document::{Document, DocumentVersion};
use buildhub_entity::finance::{Totals, format_amount};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Database connectivity, omitted when no database is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseHealth>,
}

/// A document as returned by the API: the stored record plus its
/// current version.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub document: Document,
    pub current_version: Option<DocumentVersion>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        let current_version = document.current_version().cloned();
        Self {
            document,
            current_version,
        }
    }
}

/// Everything a client needs to fetch the current content of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
    /// Current version number, e.g. `"1.2"`.
    pub version: String,
    pub download_url: String,
}

impl DownloadResponse {
    /// Describe the current version of `document`.
    pub fn new(document: &Document, current: &DocumentVersion) -> Self {
        Self {
            file_name: current.file_name.clone(),
            file_size: current.file_size,
            mime_type: document.mime_type.clone(),
            version: current.version.to_string(),
            download_url: document.download_url.clone(),
        }
    }
}

/// Financial totals with display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalsResponse {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    /// Applied tax rate.
    pub tax_rate: f64,
    /// The three amounts formatted with two decimals.
    pub formatted: FormattedTotals,
}

/// Two-decimal display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl From<Totals> for TotalsResponse {
    fn from(totals: Totals) -> Self {
        Self {
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            tax_rate: buildhub_entity::finance::TAX_RATE,
            formatted: FormattedTotals {
                subtotal: format_amount(totals.subtotal),
                tax: format_amount(totals.tax),
                total: format_amount(totals.total),
            },
        }
    }
}
