//! SQLite backend for the Ember progress store.
//!
//! Stands in for the hosted remote store during development and testing.
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteProgressStore;
