//! # filegate-entity
//!
//! Domain entity models for Filegate: users and roles, file metadata
//! records, folder assignments, and share links. All persisted models
//! derive `sqlx::FromRow` and serde traits.

pub mod assignment;
pub mod file;
pub mod share;
pub mod user;
