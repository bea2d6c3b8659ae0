//! Folder assignment (per-user folder ACL) model.

pub mod model;

pub use model::{AssignmentFlags, AssignmentWithUser, FolderAssignment};
