//! Error types for `facepick-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A column name that is not one of the four path-bearing columns.
  #[error("invalid column")]
  InvalidColumn(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
