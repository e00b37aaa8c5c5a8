use crate::core::{BlobStorage, StoredReportReference};
use crate::utils::error::{ReportError, Result};
use std::path::PathBuf;

/// Writes reports below a directory instead of S3, for running the function locally.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

fn io_error(path: &std::path::Path, e: std::io::Error) -> ReportError {
    ReportError::StoreError {
        message: format!("{}: {}", path.display(), e),
    }
}

impl BlobStorage for LocalStorage {
    async fn put_object(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<StoredReportReference> {
        let full_path = self.base_path.join(key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| io_error(&full_path, e))?;

        let absolute = tokio::fs::canonicalize(&full_path)
            .await
            .map_err(|e| io_error(&full_path, e))?;

        Ok(StoredReportReference {
            key: key.to_string(),
            url: format!("file://{}", absolute.display()),
        })
    }
}
