//! [`SqliteStore`] — the SQLite implementation of [`PeopleStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use facepick_core::{
  column::PathColumn, page::PageWindow, person::PersonRecord, store::PeopleStore,
};
use tokio::sync::RwLock;

use crate::{
  Error, Result,
  schema::{PERSON_COLUMNS, SCHEMA},
};

// ─── Location ────────────────────────────────────────────────────────────────

/// Where [`PeopleStore::reconnect`] reopens the database from.
#[derive(Debug, Clone)]
enum Location {
  File(PathBuf),
  /// A reconnect yields a fresh, empty database.
  Memory,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The `people_images` table backed by a single SQLite file.
///
/// Every operation acquires the current connection handle for its own
/// duration; the handle is released when the operation returns, on success
/// or failure. [`reconnect`](PeopleStore::reconnect) swaps in a new handle
/// without disturbing operations already in flight.
///
/// Cloning is cheap: the handle slot is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  location: Location,
  conn:     Arc<RwLock<tokio_rusqlite::Connection>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::with_location(Location::File(path.as_ref().to_path_buf())).await
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    Self::with_location(Location::Memory).await
  }

  async fn with_location(location: Location) -> Result<Self> {
    let conn = connect(&location).await?;
    Ok(Self { location, conn: Arc::new(RwLock::new(conn)) })
  }

  /// Clone out the current connection handle.
  pub(crate) async fn acquire(&self) -> tokio_rusqlite::Connection {
    self.conn.read().await.clone()
  }

  /// Close the current connection. Later operations fail with a disconnect
  /// error until [`reconnect`](PeopleStore::reconnect) is called.
  pub async fn close(&self) -> Result<()> {
    self.acquire().await.close().await?;
    Ok(())
  }
}

async fn connect(location: &Location) -> Result<tokio_rusqlite::Connection> {
  let conn = match location {
    Location::File(path) => tokio_rusqlite::Connection::open(path).await?,
    Location::Memory => tokio_rusqlite::Connection::open_in_memory().await?,
  };
  conn
    .call(|conn| {
      conn.execute_batch(SCHEMA)?;
      Ok(())
    })
    .await?;
  Ok(conn)
}

fn person_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonRecord> {
  Ok(PersonRecord {
    id:                         row.get(0)?,
    name:                       row.get(1)?,
    birth_date:                 row.get(2)?,
    death_date:                 row.get(3)?,
    gib_2021_numbers_only:      row.get(4)?,
    old_pics_2020_numbers_only: row.get(5)?,
    pics_stop_numbers_only:     row.get(6)?,
    good_pics:                  row.get(7)?,
  })
}

/// SQLite binds integers as `i64`; a window past `i64::MAX` selects nothing
/// either way.
fn sql_int(n: u64) -> i64 { i64::try_from(n).unwrap_or(i64::MAX) }

// ─── PeopleStore impl ────────────────────────────────────────────────────────

impl PeopleStore for SqliteStore {
  type Error = Error;

  async fn list_page(&self, window: PageWindow) -> Result<Vec<PersonRecord>> {
    let limit  = sql_int(window.limit);
    let offset = sql_int(window.offset);

    let rows = self
      .acquire()
      .await
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM people_images
           ORDER BY id
           LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn count(&self) -> Result<u64> {
    let total: i64 = self
      .acquire()
      .await
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM people_images", [], |r| r.get(0))?)
      })
      .await?;

    u64::try_from(total).map_err(|_| Error::OutOfRange(format!("row count {total}")))
  }

  async fn set_path(&self, id: i64, column: PathColumn, value: String) -> Result<bool> {
    let sql = format!("UPDATE people_images SET {} = ?1 WHERE id = ?2", column.as_str());

    let changed = self
      .acquire()
      .await
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![value, id])?))
      .await?;

    Ok(changed > 0)
  }

  async fn clear_path(&self, id: i64, column: PathColumn) -> Result<bool> {
    let sql = format!("UPDATE people_images SET {} = NULL WHERE id = ?1", column.as_str());

    let changed = self
      .acquire()
      .await
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;

    Ok(changed > 0)
  }

  async fn reconnect(&self) -> Result<()> {
    let fresh = connect(&self.location).await?;
    *self.conn.write().await = fresh;
    Ok(())
  }
}
