use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Plant not found: {plant_id}")]
    NotFound { plant_id: String },

    #[error("Record store unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ReportError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::MalformedInput { .. } | ReportError::MissingField { .. } => 400,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Stable code placed in the `error` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::MalformedInput { .. } => "malformed_input",
            ReportError::MissingField { .. } => "missing_field",
            ReportError::NotFound { .. } => "not_found",
            ReportError::BackendUnavailable { .. } => "backend_unavailable",
            ReportError::RenderError { .. } => "render_error",
            ReportError::StoreError { .. } => "store_error",
            ReportError::SerializationError(_) => "serialization_error",
            ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => "config_error",
        }
    }

    /// Generic message for the caller. Backend detail stays in the logs.
    pub fn user_friendly_message(&self) -> &'static str {
        match self {
            ReportError::MalformedInput { .. } => "Invalid request body",
            ReportError::MissingField { .. } => {
                "Missing required fields: plant_id, latitude, and longitude"
            }
            ReportError::NotFound { .. } | ReportError::BackendUnavailable { .. } => {
                "Failed to fetch plant information"
            }
            ReportError::RenderError { .. } | ReportError::StoreError { .. } => {
                "Failed to generate PDF report"
            }
            _ => "Internal server error",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
