use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConverterError>;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinate(String),

    #[error("{axis} {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Hemisphere '{hemisphere}' is not valid for {axis}")]
    HemisphereMismatch { hemisphere: char, axis: &'static str },

    #[error("Unsupported coordinate format: '{0}'. Expected one of dd, dm, dms")]
    UnsupportedFormat(String),

    #[error("Unsupported coordinate reference system: EPSG:{0}")]
    UnsupportedCrs(u32),

    #[error("Transformation failed: {0}")]
    Transformation(String),

    #[error("Missing required columns: {missing:?}. CSV must contain: {required:?}")]
    MissingColumns {
        missing: Vec<String>,
        required: Vec<String>,
    },

    #[error("Could not decode input: {0}")]
    Encoding(String),

    #[error("Background task failed: {0}")]
    Blocking(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ConverterError {
    /// Whether the error was caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ConverterError::Io(_)
                | ConverterError::Json(_)
                | ConverterError::Config(_)
                | ConverterError::InvalidConfig(_)
                | ConverterError::Blocking(_)
                | ConverterError::Logging(_)
        )
    }
}

impl ResponseError for ConverterError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = if self.is_client_error() {
            format!("Conversion error: {}", self)
        } else {
            format!("Internal server error: {}", self)
        };
        HttpResponse::build(self.status_code()).json(json!({ "detail": detail }))
    }
}
