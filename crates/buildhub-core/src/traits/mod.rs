//! Core traits defined in `buildhub-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
