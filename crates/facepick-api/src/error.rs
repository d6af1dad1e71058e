//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Listing failures use the `{"error": ...}` shape; mutation failures use the
//! `{"success": false, "error": ...}` shape the client checks for.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use facepick_core::wire::{ErrorResponse, MutationResponse};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A listing query failed.
  #[error("{0}")]
  Store(#[source] BoxError),

  /// The request body could not be read.
  #[error("{0}")]
  BadRequest(String),

  /// `column` named something outside the four path columns.
  #[error("invalid column")]
  InvalidColumn,

  /// An update statement failed.
  #[error("{0}")]
  Mutation(#[source] BoxError),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn mutation(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Mutation(Box::new(e))
  }
}

impl From<facepick_core::Error> for ApiError {
  fn from(e: facepick_core::Error) -> Self {
    match e {
      facepick_core::Error::InvalidColumn(_) => ApiError::InvalidColumn,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    match self {
      ApiError::Store(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: message }))
          .into_response()
      }
      ApiError::BadRequest(_) | ApiError::InvalidColumn => {
        (StatusCode::BAD_REQUEST, Json(MutationResponse::failed(message)))
          .into_response()
      }
      ApiError::Mutation(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(MutationResponse::failed(message)))
          .into_response()
      }
    }
  }
}
