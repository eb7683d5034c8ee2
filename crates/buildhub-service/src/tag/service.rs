//! Tag listing and creation.

use std::sync::Arc;

use tracing::info;

use buildhub_core::error::AppError;
use buildhub_core::result::AppResult;
use buildhub_core::traits::Repository;
use buildhub_database::repositories::TagRepository;
use buildhub_entity::tag::DocumentTag;

use crate::context::RequestContext;

/// Manages the tag catalogue. Tags are never renamed or deleted.
#[derive(Clone)]
pub struct TagService {
    /// Tag repository.
    tag_repo: Arc<dyn TagRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tag_repo: Arc<dyn TagRepository>) -> Self {
        Self { tag_repo }
    }

    /// Lists all tags in creation order.
    pub async fn list(&self) -> AppResult<Vec<DocumentTag>> {
        self.tag_repo.find_all().await
    }

    /// Creates a tag. Names are trimmed and unique regardless of case.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        color: &str,
    ) -> AppResult<DocumentTag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }
        if !DocumentTag::is_valid_color(color) {
            return Err(AppError::validation(format!(
                "Invalid tag color '{color}', expected #RRGGBB"
            )));
        }
        if self.tag_repo.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict(format!("Tag '{name}' already exists")));
        }

        let tag = self.tag_repo.create(&DocumentTag::new(name, color)).await?;

        info!(
            user_id = ctx.user_id,
            tag_id = %tag.id,
            name = %tag.name,
            "Tag created"
        );

        Ok(tag)
    }
}
