use crate::domain::model::{Location, ReportRequest};
use crate::utils::error::{ReportError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatePolicy {
    /// When false a coordinate of exactly 0.0 counts as not supplied.
    pub allow_zero: bool,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    location: Option<RawLocation>,
    plant_id: Option<String>,
}

fn missing(field: &str) -> ReportError {
    ReportError::MissingField {
        field: field.to_string(),
    }
}

fn coordinate(field: &str, value: Option<f64>, policy: CoordinatePolicy) -> Result<f64> {
    match value {
        Some(v) if v == 0.0 && !policy.allow_zero => Err(missing(field)),
        Some(v) => Ok(v),
        None => Err(missing(field)),
    }
}

/// Decodes an API Gateway body, which arrives base64 encoded for binary media types.
pub fn decode_body(body: Option<&str>, is_base64_encoded: bool) -> Result<String> {
    let body = body.ok_or_else(|| ReportError::MalformedInput {
        message: "request body is empty".to_string(),
    })?;

    if !is_base64_encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| ReportError::MalformedInput {
            message: format!("body is not valid base64: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| ReportError::MalformedInput {
        message: format!("body is not valid UTF-8: {}", e),
    })
}

pub fn parse_report_request(body: &str, policy: CoordinatePolicy) -> Result<ReportRequest> {
    let raw: RawRequest =
        serde_json::from_str(body).map_err(|e| ReportError::MalformedInput {
            message: e.to_string(),
        })?;

    let plant_id = match raw.plant_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return Err(missing("plant_id")),
    };

    let location = raw.location.ok_or_else(|| missing("location"))?;
    let latitude = coordinate("latitude", location.latitude, policy)?;
    let longitude = coordinate("longitude", location.longitude, policy)?;

    Ok(ReportRequest {
        plant_id,
        location: Location {
            latitude,
            longitude,
        },
    })
}
