//! PersonRecord — one row of the `people_images` table.

use serde::{Deserialize, Serialize};

use crate::column::PathColumn;

/// A person with up to three candidate photo paths and at most one canonical
/// photo path. Field names match the table's column names exactly; they are
/// also the JSON wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
  pub id:                         i64,
  pub name:                       Option<String>,
  pub birth_date:                 Option<String>,
  pub death_date:                 Option<String>,
  pub gib_2021_numbers_only:      Option<String>,
  pub old_pics_2020_numbers_only: Option<String>,
  pub pics_stop_numbers_only:     Option<String>,
  pub good_pics:                  Option<String>,
}

impl PersonRecord {
  /// The value stored in a path-bearing column.
  pub fn path(&self, column: PathColumn) -> Option<&str> {
    match column {
      PathColumn::Gib2021 => self.gib_2021_numbers_only.as_deref(),
      PathColumn::OldPics2020 => self.old_pics_2020_numbers_only.as_deref(),
      PathColumn::PicsStop => self.pics_stop_numbers_only.as_deref(),
      PathColumn::GoodPics => self.good_pics.as_deref(),
    }
  }

  /// Overwrite a path-bearing column. `None` clears it.
  pub fn set_path(&mut self, column: PathColumn, value: Option<String>) {
    let slot = match column {
      PathColumn::Gib2021 => &mut self.gib_2021_numbers_only,
      PathColumn::OldPics2020 => &mut self.old_pics_2020_numbers_only,
      PathColumn::PicsStop => &mut self.pics_stop_numbers_only,
      PathColumn::GoodPics => &mut self.good_pics,
    };
    *slot = value;
  }
}
