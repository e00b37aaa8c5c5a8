use crate::core::{BlobStorage, StoredReportReference};
use crate::utils::error::{ReportError, Result};
use aws_config::SdkConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // S3-compatible providers (MinIO, LocalStack)
}

impl S3Storage {
    pub fn new(
        client: S3Client,
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> Self {
        Self {
            client,
            bucket,
            region,
            endpoint_url,
        }
    }

    /// Builds the client from the shared SDK config, overriding region and endpoint when given.
    pub fn from_sdk_config(
        sdk_config: &SdkConfig,
        bucket: String,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> Self {
        let region = region
            .or_else(|| sdk_config.region().map(|r| r.to_string()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let mut builder =
            aws_sdk_s3::config::Builder::from(sdk_config).region(Region::new(region.clone()));
        if let Some(endpoint) = &endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = S3Client::from_conf(builder.build());

        Self::new(client, bucket, region, endpoint_url)
    }

    /// Path-style URL for custom endpoints, virtual-hosted style for AWS.
    pub fn object_url(&self, key: &str) -> String {
        match &self.endpoint_url {
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket,
                key
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

fn store_error(err: SdkError<PutObjectError>) -> ReportError {
    let detail = DisplayErrorContext(&err).to_string();
    let message = match err.into_service_error() {
        PutObjectError::EncryptionTypeMismatch(_) => {
            format!("encryption type mismatch: {}", detail)
        }
        PutObjectError::InvalidRequest(_) => format!("invalid request: {}", detail),
        other => match other.code() {
            Some(code) => format!("{}: {}", code, detail),
            None => detail,
        },
    };
    ReportError::StoreError { message }
}

impl BlobStorage for S3Storage {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredReportReference> {
        tracing::debug!(
            "PutObject s3://{}/{} ({} bytes)",
            self.bucket,
            key,
            data.len()
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(store_error)?;

        Ok(StoredReportReference {
            key: key.to_string(),
            url: self.object_url(key),
        })
    }
}
