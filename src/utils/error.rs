use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoroscopeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid photo: {reason}")]
    InvalidPhotoError { reason: String },

    #[error("Generation service returned status {status}: {body}")]
    ServiceStatusError { status: u16, body: String },
}

impl HoroscopeError {
    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            HoroscopeError::ConfigError { message } => {
                format!("Configuration problem: {}", message)
            }
            HoroscopeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            HoroscopeError::MissingFieldError { field } => {
                format!("'{}' is required", field)
            }
            HoroscopeError::DatabaseError(_) => "The horoscope database is unavailable".to_string(),
            HoroscopeError::ApiError(_) | HoroscopeError::ServiceStatusError { .. } => {
                "The horoscope generation service is unavailable".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HoroscopeError::ConfigError { .. }
            | HoroscopeError::InvalidConfigValueError { .. } => {
                "Check the configuration file and the environment variables it references"
            }
            HoroscopeError::MissingFieldError { .. } | HoroscopeError::ValidationError { .. } => {
                "Fix the request payload and try again"
            }
            HoroscopeError::DatabaseError(_) | HoroscopeError::IoError(_) => {
                "Check that the database path is writable"
            }
            HoroscopeError::ApiError(_) | HoroscopeError::ServiceStatusError { .. } => {
                "Check the API key and endpoint, or start with --offline"
            }
            _ => "Try again later",
        }
    }
}

pub type Result<T> = std::result::Result<T, HoroscopeError>;
