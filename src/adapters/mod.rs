// Adapters layer: concrete implementations for the record store, renderer, blob stores and transport.

pub mod local;
pub mod pdf;

#[cfg(feature = "lambda")]
pub mod apigw;
#[cfg(feature = "lambda")]
pub mod dynamodb;
#[cfg(feature = "lambda")]
pub mod s3;

use crate::core::{BlobStorage, StoredReportReference};
use crate::utils::error::Result;

/// Blob store selected from configuration at startup.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    #[cfg(feature = "lambda")]
    S3(s3::S3Storage),
    Local(local::LocalStorage),
}

impl BlobStorage for StorageBackend {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredReportReference> {
        match self {
            #[cfg(feature = "lambda")]
            StorageBackend::S3(storage) => storage.put_object(key, data, content_type).await,
            StorageBackend::Local(storage) => storage.put_object(key, data, content_type).await,
        }
    }
}
