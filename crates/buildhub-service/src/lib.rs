//! # buildhub-service
//!
//! Business logic service layer for BuildHub. Each service orchestrates
//! the repositories it is handed at construction time (`Arc<dyn …>`), so
//! the same logic runs against PostgreSQL or the in-memory stores.

pub mod context;
pub mod document;
pub mod folder;
pub mod tag;

pub use context::RequestContext;
pub use document::{DocumentFilter, DocumentService, SortKey, VersionService};
pub use folder::{FolderService, TreeService};
pub use tag::TagService;
