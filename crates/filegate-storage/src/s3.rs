//! S3-compatible object-store provider.
//!
//! The client is constructed once at startup and injected into the
//! services that need it — there is no lazily-initialized global. All SDK
//! errors are mapped to [`AppError`] here; nothing downstream sees a raw
//! transport error.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use tracing::info;

use filegate_core::config::storage::ObjectStorageConfig;
use filegate_core::error::{AppError, ErrorKind};
use filegate_core::result::AppResult;
use filegate_core::traits::storage::{DeleteOutcome, ObjectEntry, ObjectStore, PresignedUpload};

/// Object store backed by an S3-compatible bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    upload_url_ttl: Duration,
}

impl S3ObjectStore {
    /// Build a client from configuration.
    ///
    /// With explicit keys in the config a static credential provider is
    /// used; otherwise the ambient AWS credential chain applies. Path-style
    /// addressing is forced so MinIO and OCI endpoints work unchanged.
    pub async fn new(config: &ObjectStorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration(
                "storage.bucket must be set for the S3 provider",
            ));
        }

        let region = Region::new(config.region.clone());

        let mut builder = if config.access_key.is_empty() {
            let shared = aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .load()
                .await;
            aws_sdk_s3::config::Builder::from(&shared)
        } else {
            let credentials = Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "filegate-config",
            );
            aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(credentials)
        };

        builder = builder.force_path_style(true);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = %config.endpoint,
            "Initializing S3 object store"
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            upload_url_ttl: Duration::from_secs(config.upload_url_ttl_seconds),
        })
    }

    fn presigning_config(expires_in: Duration) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in)
            .map_err(|e| AppError::storage(format!("Invalid presign expiry: {e}")))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn list_objects(
        &self,
        prefix: &str,
        delimiter: Option<&str>,
    ) -> AppResult<Vec<ObjectEntry>> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix);
        if let Some(d) = delimiter {
            request = request.delimiter(d);
        }

        let output = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list objects under '{prefix}'"),
                e,
            )
        })?;

        let mut entries = Vec::new();
        for object in output.contents() {
            let Some(key) = object.key() else { continue };
            entries.push(ObjectEntry::Object {
                key: key.to_string(),
                size: object.size(),
                last_modified: object
                    .last_modified()
                    .and_then(|t| chrono::DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
            });
        }
        for common in output.common_prefixes() {
            if let Some(p) = common.prefix() {
                entries.push(ObjectEntry::CommonPrefix {
                    prefix: p.to_string(),
                });
            }
        }
        Ok(entries)
    }

    async fn presign_upload(&self, key: &str, content_type: &str) -> AppResult<PresignedUpload> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning_config(self.upload_url_ttl)?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign upload for '{key}'"),
                    e,
                )
            })?;

        // Every signed header must be echoed by the client; content-type is
        // among them, which is what pins it.
        let mut headers = BTreeMap::new();
        for (name, value) in presigned.headers() {
            headers.insert(name.to_string(), value.to_string());
        }

        Ok(PresignedUpload {
            url: presigned.uri().to_string(),
            method: presigned.method().to_string(),
            headers,
        })
    }

    async fn presign_download(&self, key: &str, expires_in: Duration) -> AppResult<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to presign download for '{key}'"),
                    e,
                )
            })?;
        Ok(presigned.uri().to_string())
    }

    async fn copy(&self, src_key: &str, dst_key: &str) -> AppResult<()> {
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(format!("{}/{}", self.bucket, src_key))
            .key(dst_key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to copy '{src_key}' -> '{dst_key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn delete_many(&self, keys: &[String]) -> AppResult<Vec<DeleteOutcome>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let objects = keys
            .iter()
            .map(|k| ObjectIdentifier::builder().key(k).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::storage(format!("Invalid delete batch: {e}")))?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| AppError::storage(format!("Invalid delete batch: {e}")))?;

        let output = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to delete objects", e)
            })?;

        let errors: HashMap<&str, String> = output
            .errors()
            .iter()
            .filter_map(|e| {
                e.key()
                    .map(|k| (k, e.message().unwrap_or("unknown error").to_string()))
            })
            .collect();

        // S3 reports unknown keys as deleted; anything not explicitly
        // errored is gone.
        Ok(keys
            .iter()
            .map(|key| match errors.get(key.as_str()) {
                Some(message) => DeleteOutcome {
                    key: key.clone(),
                    deleted: false,
                    error: Some(message.clone()),
                },
                None => DeleteOutcome {
                    key: key.clone(),
                    deleted: true,
                    error: None,
                },
            })
            .collect())
    }

    async fn put_folder_marker(&self, key: &str) -> AppResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from_static(b""))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create folder marker '{key}'"),
                    e,
                )
            })?;
        Ok(())
    }
}
