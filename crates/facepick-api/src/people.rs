//! Handlers for the `/people` listing endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | `?page` (default 1), `?limit` (default 100) |
//! | `GET`  | `/people/count` | `{"total": n}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use facepick_core::{
  page::PageRequest,
  person::PersonRecord,
  store::{PeopleStore, StoreFailure as _},
  wire::CountResponse,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query values; parsed leniently by [`PageRequest::from_query`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub page:  Option<String>,
  pub limit: Option<String>,
}

/// `GET /people[?page=<n>][&limit=<n>]`
///
/// A lost store connection is repaired and the query retried once; a second
/// failure, or any other failure, is a 500.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PersonRecord>>, ApiError>
where
  S: PeopleStore,
{
  let request = PageRequest::from_query(params.page.as_deref(), params.limit.as_deref());
  let window  = request.window();
  info!(page = request.page, limit = request.limit, "listing people");

  let people = match store.list_page(window).await {
    Ok(people) => people,
    Err(e) if e.is_disconnect() => {
      warn!(error = %e, "store connection lost, reconnecting");
      store.reconnect().await.map_err(|e| {
        error!(error = %e, "reconnect failed");
        ApiError::store(e)
      })?;
      store.list_page(window).await.map_err(|e| {
        error!(error = %e, "listing failed after reconnect");
        ApiError::store(e)
      })?
    }
    Err(e) => {
      error!(error = %e, "listing failed");
      return Err(ApiError::store(e));
    }
  };

  info!(count = people.len(), "listed people");
  Ok(Json(people))
}

// ─── Count ────────────────────────────────────────────────────────────────────

/// `GET /people/count`
pub async fn count<S>(State(store): State<Arc<S>>) -> Result<Json<CountResponse>, ApiError>
where
  S: PeopleStore,
{
  let total = store.count().await.map_err(|e| {
    error!(error = %e, "count failed");
    ApiError::store(e)
  })?;
  Ok(Json(CountResponse { total }))
}
