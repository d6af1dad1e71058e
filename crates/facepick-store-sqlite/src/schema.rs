//! SQL schema for the facepick SQLite store.
//!
//! Records are loaded by an external process; the table is only created here
//! so a fresh database file is usable.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS people_images (
    id                         INTEGER PRIMARY KEY,
    name                       TEXT,
    birth_date                 TEXT,
    death_date                 TEXT,
    gib_2021_numbers_only      TEXT,   -- candidate path
    old_pics_2020_numbers_only TEXT,   -- candidate path
    pics_stop_numbers_only     TEXT,   -- candidate path
    good_pics                  TEXT    -- canonical path chosen by an operator
);
";

/// Column list shared by every `SELECT`; order matches [`crate::store`]'s
/// row mapping.
pub const PERSON_COLUMNS: &str = "id, name, birth_date, death_date, \
   gib_2021_numbers_only, old_pics_2020_numbers_only, pics_stop_numbers_only, \
   good_pics";
