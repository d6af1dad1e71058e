//! The `PeopleStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `facepick-store-sqlite`). The API layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{column::PathColumn, page::PageWindow, person::PersonRecord};

/// Lets callers tell a lost connection apart from every other failure.
///
/// The listing endpoint reconnects and retries once when
/// [`is_disconnect`](StoreFailure::is_disconnect) is `true`; any other error
/// is reported as-is.
pub trait StoreFailure {
  fn is_disconnect(&self) -> bool;
}

/// Abstraction over the `people_images` table.
///
/// Records are never created or deleted through this trait; only the four
/// path-bearing columns are written, one `id` at a time. There are no
/// transactions: concurrent writes to the same record are last-write-wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PeopleStore: Send + Sync {
  type Error: std::error::Error + StoreFailure + Send + Sync + 'static;

  /// Up to `window.limit` records starting at `window.offset`, in id order.
  fn list_page(
    &self,
    window: PageWindow,
  ) -> impl Future<Output = Result<Vec<PersonRecord>, Self::Error>> + Send + '_;

  /// Total number of records in the table.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Set `column` to `value` for the record `id`. Returns whether a record
  /// matched; a missing id is not an error.
  fn set_path(
    &self,
    id: i64,
    column: PathColumn,
    value: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Set `column` to NULL for the record `id`. Clearing an already-absent
  /// value succeeds.
  fn clear_path(
    &self,
    id: i64,
    column: PathColumn,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Drop the current connection and open a fresh one.
  fn reconnect(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
