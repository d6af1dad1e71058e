//! Core types and trait definitions for facepick.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store, API and client crates all speak in terms of the types defined here.

pub mod column;
pub mod error;
pub mod page;
pub mod person;
pub mod store;
pub mod wire;

pub use column::PathColumn;
pub use error::{Error, Result};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, PageWindow, total_pages};
pub use person::PersonRecord;
