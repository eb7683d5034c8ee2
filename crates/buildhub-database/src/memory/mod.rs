//! In-memory repositories.
//!
//! Each store keeps a `Vec` behind a tokio `RwLock`, so insertion order is
//! preserved and every mutation is atomic with respect to other callers.
//! They enforce the same uniqueness rules as the PostgreSQL schema.

mod document;
mod folder;
mod tag;

pub use document::MemoryDocumentRepository;
pub use folder::MemoryFolderRepository;
pub use tag::MemoryTagRepository;
