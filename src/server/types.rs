use crate::domain::model::{HoroscopeRequest, HoroscopeResult};
use crate::utils::error::Result;
use crate::utils::validation::require_field;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Form payload. Every field is optional here so that a missing field
/// becomes our own 400 instead of a deserialisation rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHoroscopeRequest {
    pub first_name: Option<String>,
    pub birthday: Option<String>,
    pub photo_url: Option<String>,
    pub occupation: Option<String>,
}

impl CreateHoroscopeRequest {
    pub fn into_request(self) -> Result<HoroscopeRequest> {
        let first_name = require_field("firstName", &self.first_name)?;
        let birthday = require_field("birthday", &self.birthday)?;
        let photo_url = require_field("photoUrl", &self.photo_url)?;
        let occupation = require_field("occupation", &self.occupation)?;

        Ok(HoroscopeRequest {
            first_name: first_name.trim().to_string(),
            birthday: birthday.parse()?,
            photo_url: photo_url.to_string(),
            occupation: occupation.trim().to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHoroscopeResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct GetHoroscopeQuery {
    #[serde(rename = "horoscopeId")]
    pub horoscope_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeHoroscopeRequest {
    pub id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeHoroscopeResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedHoroscopesResponse {
    pub horoscopes: Vec<HoroscopeResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned by handlers, rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Logs the cause and hides it from the caller.
    pub fn internal(message: impl Into<String>, cause: &dyn std::fmt::Display) -> Self {
        let message = message.into();
        tracing::error!("{}: {}", message, cause);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}
