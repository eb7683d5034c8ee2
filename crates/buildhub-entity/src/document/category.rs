//! Document category enum.

use serde::{Deserialize, Serialize};

/// Business category of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Contract,
    Invoice,
    Quotation,
    PurchaseOrder,
    /// Architectural or engineering drawing.
    Drawing,
    /// Building permit or regulatory approval.
    Permit,
    Report,
    /// Site photo.
    Photo,
    Specification,
    Correspondence,
    #[default]
    Other,
}

impl DocumentCategory {
    /// Every variant, in declaration order.
    pub const ALL: [DocumentCategory; 11] = [
        Self::Contract,
        Self::Invoice,
        Self::Quotation,
        Self::PurchaseOrder,
        Self::Drawing,
        Self::Permit,
        Self::Report,
        Self::Photo,
        Self::Specification,
        Self::Correspondence,
        Self::Other,
    ];

    /// Return the category as a string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Invoice => "invoice",
            Self::Quotation => "quotation",
            Self::PurchaseOrder => "purchase_order",
            Self::Drawing => "drawing",
            Self::Permit => "permit",
            Self::Report => "report",
            Self::Photo => "photo",
            Self::Specification => "specification",
            Self::Correspondence => "correspondence",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown document category '{s}'"))
    }
}
