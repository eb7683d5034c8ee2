//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use buildhub_core::config::AppConfig;
use buildhub_database::DatabasePool;
use buildhub_database::repositories::{DocumentRepository, FolderRepository, TagRepository};
use buildhub_service::{DocumentService, FolderService, TagService, TreeService, VersionService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the state was built, for uptime reporting
    pub started_at: Instant,
    /// PostgreSQL pool, absent when running on in-memory repositories
    pub database: Option<DatabasePool>,

    // ── Services ─────────────────────────────────────────────
    /// Document CRUD and tagging
    pub document_service: Arc<DocumentService>,
    /// Document version workflow
    pub version_service: Arc<VersionService>,
    /// Folder CRUD
    pub folder_service: Arc<FolderService>,
    /// Folder tree
    pub tree_service: Arc<TreeService>,
    /// Tag catalogue
    pub tag_service: Arc<TagService>,
}

impl AppState {
    /// Wire the services on top of the given repositories.
    pub fn new(
        config: AppConfig,
        document_repo: Arc<dyn DocumentRepository>,
        folder_repo: Arc<dyn FolderRepository>,
        tag_repo: Arc<dyn TagRepository>,
    ) -> Self {
        let max_upload = config.documents.max_upload_size_bytes;

        Self {
            document_service: Arc::new(DocumentService::new(
                Arc::clone(&document_repo),
                Arc::clone(&folder_repo),
                Arc::clone(&tag_repo),
                max_upload,
            )),
            version_service: Arc::new(VersionService::new(Arc::clone(&document_repo), max_upload)),
            folder_service: Arc::new(FolderService::new(
                Arc::clone(&folder_repo),
                Arc::clone(&document_repo),
            )),
            tree_service: Arc::new(TreeService::new(folder_repo, document_repo)),
            tag_service: Arc::new(TagService::new(tag_repo)),
            config: Arc::new(config),
            started_at: Instant::now(),
            database: None,
        }
    }

    /// Attach the pool so `/api/health` reports its connectivity.
    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }
}
