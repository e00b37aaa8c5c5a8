pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{local::LocalStorage, pdf::PdfReportRenderer, StorageBackend};
pub use config::AppConfig;

#[cfg(feature = "lambda")]
pub use adapters::{dynamodb::DynamoPlantRepository, s3::S3Storage};

pub use crate::core::report::{EngineSettings, HandlerOutcome, ReportEngine};
pub use utils::error::{ReportError, Result};
