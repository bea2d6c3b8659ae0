//! Folder listing: the namespace reconciler and its service wrapper.

pub mod entry;
pub mod reconciler;
pub mod service;

pub use entry::{FileEntry, FolderEntry, ListingEntry};
pub use service::ListingService;
