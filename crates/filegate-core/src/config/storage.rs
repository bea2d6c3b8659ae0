//! Object-store configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// Endpoint URL (for non-AWS services like MinIO or OCI).
    #[serde(default)]
    pub endpoint: String,
    /// Region name.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID; empty means "use the ambient credential chain".
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Lifetime of presigned upload URLs in seconds.
    #[serde(default = "default_upload_ttl")]
    pub upload_url_ttl_seconds: u64,
    /// Lifetime of presigned download URLs in seconds.
    #[serde(default = "default_download_ttl")]
    pub download_url_ttl_seconds: u64,
    /// Hard ceiling on share-link expiry in hours.
    #[serde(default = "default_share_ceiling")]
    pub share_max_hours: i64,
    /// Maximum object size accepted for upload (default 5 GiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            upload_url_ttl_seconds: default_upload_ttl(),
            download_url_ttl_seconds: default_download_ttl(),
            share_max_hours: default_share_ceiling(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_upload_ttl() -> u64 {
    3600
}

fn default_download_ttl() -> u64 {
    3600
}

fn default_share_ceiling() -> i64 {
    12
}

fn default_max_upload() -> u64 {
    5_368_709_120 // 5 GiB
}
