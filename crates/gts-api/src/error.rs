//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"error": "<message>"}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  /// The request failed validation before reaching the store.
  #[error("{0}")]
  BadRequest(String),

  #[error(transparent)]
  Invalid(#[from] gts_core::Error),

  /// A write was rejected by the database and rolled back.
  #[error("{0}")]
  Database(#[source] BoxError),

  /// A read failed in the store.
  #[error("store error: {0}")]
  Store(#[source] BoxError),

  #[error("render error: {0}")]
  Render(String),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  pub fn not_found(entity: &str) -> Self { ApiError::NotFound(format!("{entity} not found")) }
}

/// Map a failed write to [`ApiError::Database`], logging the rollback.
pub(crate) fn write_failed<E>(action: &'static str) -> impl FnOnce(E) -> ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  move |e| {
    tracing::warn!(action, error = %e, "write rolled back");
    ApiError::Database(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) | ApiError::Invalid(_) | ApiError::Database(_) => {
        StatusCode::BAD_REQUEST
      }
      ApiError::Store(_) | ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
