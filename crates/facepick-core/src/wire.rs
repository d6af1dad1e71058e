//! JSON bodies exchanged between the API layer and its clients.
//!
//! `PersonRecord` is itself the listing format; these are the remaining
//! request and response shapes.

use serde::{Deserialize, Serialize};

/// `POST /set-good-pic` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGoodPicBody {
  pub id:         i64,
  #[serde(rename = "imagePath")]
  pub image_path: String,
}

/// `POST /delete-path` body. `column` is an unvalidated client string; the
/// server maps it onto [`crate::PathColumn`] before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePathBody {
  pub id:     i64,
  pub column: String,
}

/// Result of a mutation: `{"success": true}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl MutationResponse {
  pub fn ok() -> Self { Self { success: true, error: None } }

  pub fn failed(error: impl Into<String>) -> Self {
    Self { success: false, error: Some(error.into()) }
  }
}

/// `GET /people/count` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
  pub total: u64,
}

/// Body of a failed listing or count: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
}
