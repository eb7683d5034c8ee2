//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use buildhub_core::types::FolderId;

use crate::patch::double_option;

/// A folder in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<FolderId>,
    /// Full materialized path (e.g., `/Projects/Harbor View`).
    pub path: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
    /// Number of documents filed directly in this folder, when computed.
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_count: Option<u64>,
}

impl Folder {
    /// Create a folder under `parent` (or at the root).
    pub fn new(name: &str, parent: Option<&Folder>, now: DateTime<Utc>) -> Self {
        Self {
            id: FolderId::new(),
            name: name.to_string(),
            parent_id: parent.map(|p| p.id),
            path: Self::child_path(parent.map(|p| p.path.as_str()), name),
            created_at: now,
            updated_at: now,
            document_count: None,
        }
    }

    /// Compute the path of a child named `name` below `parent_path`.
    pub fn child_path(parent_path: Option<&str>, name: &str) -> String {
        match parent_path {
            Some(parent) => format!("{parent}/{name}"),
            None => format!("/{name}"),
        }
    }

    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether this folder's path lies strictly below `ancestor_path`.
    pub fn is_below(&self, ancestor_path: &str) -> bool {
        self.path
            .strip_prefix(ancestor_path)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Replace the `old_prefix` part of this folder's path with `new_prefix`.
    ///
    /// Returns `false` (and leaves the path alone) when the path is not
    /// below `old_prefix`.
    pub fn rebase_path(&mut self, old_prefix: &str, new_prefix: &str) -> bool {
        if !self.is_below(old_prefix) {
            return false;
        }
        self.path = format!("{new_prefix}{}", &self.path[old_prefix.len()..]);
        true
    }
}

/// Explicit update command for a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New parent (`Some(None)` moves the folder to the root).
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<FolderId>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let now = Utc::now();
        let a = Folder::new("A", None, now);
        let b = Folder::new("B", Some(&a), now);
        assert_eq!(a.path, "/A");
        assert!(a.is_root());
        assert_eq!(b.path, "/A/B");
        assert_eq!(b.parent_id, Some(a.id));
    }

    #[test]
    fn test_is_below_requires_separator() {
        let now = Utc::now();
        let mut f = Folder::new("x", None, now);
        f.path = "/Projects2/x".to_string();
        assert!(!f.is_below("/Projects"));
        assert!(f.is_below("/Projects2"));
        assert!(!f.is_below("/Projects2/x"));
    }

    #[test]
    fn test_rebase_path() {
        let now = Utc::now();
        let mut f = Folder::new("Plans", None, now);
        f.path = "/Old/Sub/Plans".to_string();
        assert!(f.rebase_path("/Old", "/New"));
        assert_eq!(f.path, "/New/Sub/Plans");
        assert!(!f.rebase_path("/Elsewhere", "/X"));
        assert_eq!(f.path, "/New/Sub/Plans");
    }
}
