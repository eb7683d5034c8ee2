//! # buildhub-entity
//!
//! Domain entity models for BuildHub. Folders and tags map one-to-one to
//! database rows and derive `sqlx::FromRow`; documents are aggregates that
//! own their version history and carry their resolved tags.
//!
//! The version workflow lives on [`document::Document`] so that every
//! repository backend promotes versions through the same code.

pub mod document;
pub mod finance;
pub mod folder;
pub mod patch;
pub mod tag;
