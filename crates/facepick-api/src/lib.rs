//! JSON REST API for facepick.
//!
//! Exposes an axum [`Router`] backed by any [`facepick_core::store::PeopleStore`].
//! CORS, TLS and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", facepick_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod paths;
pub mod people;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use facepick_core::store::PeopleStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PeopleStore + 'static,
{
  Router::new()
    .route("/people", get(people::list::<S>))
    .route("/people/count", get(people::count::<S>))
    .route("/set-good-pic", post(paths::set_good_pic::<S>))
    .route("/delete-path", post(paths::delete_path::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
