//! Error type for `facepick-store-sqlite`.

use facepick_core::store::StoreFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("stored value out of range: {0}")]
  OutOfRange(String),
}

impl StoreFailure for Error {
  fn is_disconnect(&self) -> bool {
    matches!(self, Error::Database(tokio_rusqlite::Error::ConnectionClosed))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
