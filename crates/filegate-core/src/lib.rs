//! # filegate-core
//!
//! Core crate for Filegate. Contains the object-store gateway trait,
//! configuration schemas, capability and folder-path types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Filegate crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
