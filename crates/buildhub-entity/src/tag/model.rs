//! Tag entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use buildhub_core::types::TagId;

/// A colored label attached to documents.
///
/// Tags have their own lifecycle; documents reference them by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DocumentTag {
    /// Unique tag identifier.
    pub id: TagId,
    /// Display name.
    pub name: String,
    /// Hex color (`#RRGGBB`).
    pub color: String,
}

impl DocumentTag {
    /// Create a tag with a fresh id.
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            id: TagId::new(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Whether `color` is a `#RRGGBB` hex color.
    pub fn is_valid_color(color: &str) -> bool {
        color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit())
    }
}
