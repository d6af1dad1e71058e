//! The closed set of path-bearing columns on `people_images`.
//!
//! Column identifiers never come from client input directly: a request names
//! a column as a string, [`PathColumn::parse`] maps it onto one of these
//! variants, and only [`PathColumn::as_str`] is ever written into SQL.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};

use crate::{Error, Result};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum PathColumn {
  /// Candidate photo from the 2021 batch.
  #[serde(rename = "gib_2021_numbers_only")]
  #[strum(serialize = "gib_2021_numbers_only")]
  Gib2021,
  /// Candidate photo from the 2020 batch.
  #[serde(rename = "old_pics_2020_numbers_only")]
  #[strum(serialize = "old_pics_2020_numbers_only")]
  OldPics2020,
  /// Additional candidate photo.
  #[serde(rename = "pics_stop_numbers_only")]
  #[strum(serialize = "pics_stop_numbers_only")]
  PicsStop,
  /// The canonical photo chosen by an operator.
  #[serde(rename = "good_pics")]
  #[strum(serialize = "good_pics")]
  GoodPics,
}

impl PathColumn {
  /// Parse a client-supplied column name. Anything outside the closed set is
  /// rejected with [`Error::InvalidColumn`].
  pub fn parse(name: &str) -> Result<Self> {
    Self::from_str(name).map_err(|_| Error::InvalidColumn(name.to_owned()))
  }

  /// The SQL identifier for this column.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn is_candidate(self) -> bool { !matches!(self, Self::GoodPics) }

  /// All four columns, candidates first.
  pub fn all() -> impl Iterator<Item = PathColumn> { Self::iter() }
}
