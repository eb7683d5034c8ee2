//! # buildhub-core
//!
//! Core crate for BuildHub. Contains the generic repository trait,
//! configuration schemas, typed identifiers, sorting types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other BuildHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
