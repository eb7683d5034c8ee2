//! HTTP request handlers, one module per resource.

pub mod document;
pub mod finance;
pub mod folder;
pub mod health;
pub mod tag;
pub mod version;
