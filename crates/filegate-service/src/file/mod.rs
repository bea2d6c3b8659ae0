//! File lifecycle operations.

pub mod service;

pub use service::FileService;
