//! Error type for `gts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A statement failed, including constraint violations. Displays SQLite's
  /// message unchanged.
  #[error("{0}")]
  Database(#[from] rusqlite::Error),

  /// The background connection thread failed outside of a statement.
  #[error("connection error: {0}")]
  Connection(tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(e) => Error::Database(e),
      other => Error::Connection(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
