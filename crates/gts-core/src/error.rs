//! Error types for `gts-core`.

use thiserror::Error;

/// A write payload that failed validation before reaching the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("Missing required fields")]
  MissingFields,

  #[error("Invalid thesisYear")]
  InvalidYear,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
