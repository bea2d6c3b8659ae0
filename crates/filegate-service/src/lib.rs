//! # filegate-service
//!
//! Business logic for Filegate. Services take an assembled
//! [`Principal`](filegate_entity::user::Principal), enforce the required
//! capability, and orchestrate the repositories and the object store.
//! The listing module holds the namespace reconciler — the merge of the
//! bucket's pseudo-hierarchy with the metadata table that every folder
//! view is built from.

pub mod assignment;
pub mod file;
pub mod listing;
pub mod role;
pub mod share;
pub mod user;
