//! Metadata changes applied to a stored document.

use chrono::{DateTime, Utc};

use buildhub_core::types::TagId;

use super::model::{Document, UpdateDocument};
use crate::tag::DocumentTag;

/// A change to a document's metadata or tag set.
///
/// Stores apply a change to the document as it is stored at that moment,
/// under the same lock that guards version uploads. Fields the change does
/// not name keep their stored values.
#[derive(Debug, Clone)]
pub enum DocumentChange {
    /// Scalar fields of an update command, plus the resolved replacement
    /// tag set when the command carries one.
    Update {
        command: UpdateDocument,
        tags: Option<Vec<DocumentTag>>,
    },
    /// Attach tags not yet present.
    AddTags(Vec<DocumentTag>),
    /// Detach tags by id.
    RemoveTags(Vec<TagId>),
}

impl Document {
    /// Apply `change` and refresh `updated_at`.
    pub fn apply_change(&mut self, change: &DocumentChange, now: DateTime<Utc>) {
        match change {
            DocumentChange::Update { command, tags } => {
                self.apply_update(command, now);
                if let Some(tags) = tags {
                    self.tags = tags.clone();
                }
            }
            DocumentChange::AddTags(tags) => self.add_tags(tags.iter().cloned()),
            DocumentChange::RemoveTags(tag_ids) => self.remove_tags(tag_ids),
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentOptions, DocumentStatus, FileUpload};

    fn upload(name: &str, size: i64) -> FileUpload {
        FileUpload {
            file_name: name.to_string(),
            file_size: size,
            mime_type: None,
        }
    }

    #[test]
    fn test_update_leaves_upload_fields_alone() {
        let start = Utc::now();
        let mut doc = Document::new(
            &upload("plan.pdf", 10),
            &DocumentOptions::default(),
            Vec::new(),
            1,
            start,
        );
        doc.push_version(&upload("plan-rev1.pdf", 20), None, 1, start);

        let change = DocumentChange::Update {
            command: UpdateDocument {
                status: Some(DocumentStatus::Archived),
                ..Default::default()
            },
            tags: None,
        };
        let later = start + chrono::Duration::seconds(5);
        doc.apply_change(&change, later);

        assert_eq!(doc.status, DocumentStatus::Archived);
        assert_eq!(doc.file_name, "plan-rev1.pdf");
        assert_eq!(doc.file_size, 20);
        assert_eq!(doc.updated_at, later);
    }

    #[test]
    fn test_tag_changes() {
        let mut doc = Document::new(
            &upload("photo.jpg", 1),
            &DocumentOptions::default(),
            Vec::new(),
            1,
            Utc::now(),
        );
        let a = DocumentTag::new("A", "#111111");
        let b = DocumentTag::new("B", "#222222");

        doc.apply_change(&DocumentChange::AddTags(vec![a.clone(), b.clone()]), Utc::now());
        doc.apply_change(&DocumentChange::AddTags(vec![a.clone()]), Utc::now());
        assert_eq!(doc.tags, vec![a.clone(), b.clone()]);

        doc.apply_change(&DocumentChange::RemoveTags(vec![a.id]), Utc::now());
        assert_eq!(doc.tags, vec![b]);
    }
}
