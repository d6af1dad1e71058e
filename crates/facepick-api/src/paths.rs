//! Handlers for the path mutation endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/set-good-pic` | `{"id": 3, "imagePath": "/img/x.jpg"}` |
//! | `POST` | `/delete-path`  | `{"id": 7, "column": "good_pics"}` |
//!
//! Both answer `{"success": true}` or `{"success": false, "error": "..."}`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use facepick_core::{
  column::PathColumn,
  store::PeopleStore,
  wire::{DeletePathBody, MutationResponse, SetGoodPicBody},
};
use tracing::{error, info, warn};

use crate::error::ApiError;

// ─── Set canonical image ──────────────────────────────────────────────────────

/// `POST /set-good-pic`: writes `good_pics` unconditionally. The path is not
/// checked against the person's own candidates.
pub async fn set_good_pic<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<SetGoodPicBody>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError>
where
  S: PeopleStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  info!(id = body.id, image_path = %body.image_path, "setting good image");

  let matched = store
    .set_path(body.id, PathColumn::GoodPics, body.image_path)
    .await
    .map_err(|e| {
      error!(id = body.id, error = %e, "updating good image failed");
      ApiError::mutation(e)
    })?;

  if !matched {
    warn!(id = body.id, "no person with this id");
  }
  Ok(Json(MutationResponse::ok()))
}

// ─── Delete path ──────────────────────────────────────────────────────────────

/// `POST /delete-path`: `column` must name one of the four path columns;
/// anything else is rejected before the store is called.
pub async fn delete_path<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<DeletePathBody>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError>
where
  S: PeopleStore,
{
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  info!(id = body.id, column = %body.column, "deleting image path");

  let column = PathColumn::parse(&body.column).inspect_err(|_| {
    warn!(id = body.id, column = %body.column, "rejected unknown column");
  })?;

  let matched = store.clear_path(body.id, column).await.map_err(|e| {
    error!(id = body.id, %column, error = %e, "deleting image path failed");
    ApiError::mutation(e)
  })?;

  if !matched {
    warn!(id = body.id, "no person with this id");
  }
  Ok(Json(MutationResponse::ok()))
}
