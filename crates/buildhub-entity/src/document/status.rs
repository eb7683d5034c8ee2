//! Document status enum.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// In use.
    #[default]
    Active,
    /// Kept for the record, hidden from day-to-day work.
    Archived,
    /// Not yet published.
    Draft,
}

impl DocumentStatus {
    /// Return the status as a string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Draft => "draft",
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "draft" => Ok(Self::Draft),
            other => Err(format!("Unknown document status '{other}'")),
        }
    }
}
