//! SQLite backend for the thesis catalog.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs off the async
//! runtime. Every operation opens its own connection and closes it before
//! returning; nothing is pooled or shared between requests.

mod encode;
mod schema;
mod store;

pub mod config;
pub mod error;

pub use config::DatabaseConfig;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
