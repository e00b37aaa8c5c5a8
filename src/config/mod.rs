use crate::core::report::EngineSettings;
use crate::core::request::CoordinatePolicy;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_non_empty_string, validate_path, validate_s3_bucket_name,
    validate_table_name, validate_url, Validate,
};
use std::env;

pub const DEFAULT_REPORT_PREFIX: &str = "reports";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub table_name: String,
    pub bucket_name: String,
    pub report_prefix: String,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub report_storage_dir: Option<String>,
    pub allow_zero_coordinates: bool,
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ReportError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "expected a boolean (true/false)".to_string(),
        }),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            get(name).ok_or_else(|| ReportError::MissingConfigError {
                field: name.to_string(),
            })
        };

        Ok(Self {
            table_name: required("TABLE_NAME")?,
            bucket_name: required("BUCKET_NAME")?,
            report_prefix: get("REPORT_PREFIX")
                .unwrap_or_else(|| DEFAULT_REPORT_PREFIX.to_string()),
            s3_region: get("S3_REGION"),
            s3_endpoint: get("S3_ENDPOINT"),
            report_storage_dir: get("REPORT_STORAGE_DIR"),
            allow_zero_coordinates: match get("ALLOW_ZERO_COORDINATES") {
                Some(value) => parse_bool("ALLOW_ZERO_COORDINATES", &value)?,
                None => false,
            },
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            report_prefix: self.report_prefix.clone(),
            coordinate_policy: CoordinatePolicy {
                allow_zero: self.allow_zero_coordinates,
            },
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_table_name("TABLE_NAME", &self.table_name)?;
        validate_s3_bucket_name("BUCKET_NAME", &self.bucket_name)?;
        validate_non_empty_string("REPORT_PREFIX", &self.report_prefix)?;

        if let Some(region) = &self.s3_region {
            validate_aws_region("S3_REGION", region)?;
        }
        if let Some(endpoint) = &self.s3_endpoint {
            validate_url("S3_ENDPOINT", endpoint)?;
        }
        if let Some(dir) = &self.report_storage_dir {
            validate_path("REPORT_STORAGE_DIR", dir)?;
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}
