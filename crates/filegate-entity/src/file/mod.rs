//! File metadata record.

pub mod model;

pub use model::{CreateFileRecord, FileRecord, FileWithOwner};
