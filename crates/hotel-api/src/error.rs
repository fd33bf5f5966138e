//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use hotel_intake::IntakeError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("invalid intake: {0}")]
  Invalid(String),

  #[error("request timed out")]
  Timeout,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<IntakeError> for ApiError {
  fn from(e: IntakeError) -> Self {
    match e {
      IntakeError::Validation(v) => ApiError::Invalid(v.to_string()),
      IntakeError::Timeout => ApiError::Timeout,
      IntakeError::Query(source) | IntakeError::Persistence(source) => {
        ApiError::Store(source)
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Invalid(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Timeout => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
