//! API error handling
//!
//! The single place where failures become HTTP status codes. Every error is
//! rendered as `{timestamp, message, status}`.

use std::any::Any;

use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use weather_core::WeatherError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), %message, "request rejected");
        }

        let body = ErrorResponse {
            timestamp: Utc::now(),
            message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::CityNotFound { .. } => Self::NotFound(err.to_string()),
            WeatherError::CityAlreadyExists(_) => Self::Conflict(err.to_string()),
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("No handler found for the requested path".to_string())
}

/// Fallback for a known path called with a method it does not serve.
///
/// Like every failure outside the weather taxonomy this is reported as a 500.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::Internal(format!("Request method '{method}' is not supported"))
}

/// Turns a panicking handler into a 500 in the usual error shape.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ApiError::Internal(format!("Unexpected failure: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::LookupScope;

    #[test]
    fn city_not_found_maps_to_404() {
        let err: ApiError = WeatherError::not_found("Atlantis", LookupScope::AllSources).into();

        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Atlantis data not found in all the sources");
    }

    #[test]
    fn city_already_exists_maps_to_409() {
        let err: ApiError = WeatherError::CityAlreadyExists("Auckland".into()).into();

        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn into_response_validation() {
        let response = ApiError::Validation("city: city is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_response_internal() {
        let response = ApiError::Internal("crash".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn panic_becomes_internal_error_body() {
        let response = handle_panic(Box::new("store exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, 500);
        assert_eq!(body.message, "Unexpected failure: store exploded");
    }

    #[test]
    fn owned_panic_message_is_kept() {
        let response = handle_panic(Box::new(String::from("index out of bounds")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_serialization() {
        let body = ErrorResponse {
            timestamp: Utc::now(),
            message: "Atlantis data not found in all the sources".into(),
            status: 404,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("timestamp").is_some());
        assert_eq!(json["status"], 404);
        assert_eq!(json["message"], "Atlantis data not found in all the sources");
    }
}
