//! # filegate-storage
//!
//! Object-store providers for Filegate. The S3 provider talks to any
//! S3-compatible service (AWS, MinIO, OCI object storage); the memory
//! provider backs tests and local development without a bucket.

pub mod memory;
pub mod s3;

pub use memory::MemoryObjectStore;
pub use s3::S3ObjectStore;
