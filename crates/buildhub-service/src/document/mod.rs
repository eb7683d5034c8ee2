//! Document services: CRUD, tagging, search, and versioning.

pub mod search;
pub mod service;
pub mod version;

pub use search::{DocumentFilter, SortKey};
pub use service::DocumentService;
pub use version::VersionService;
