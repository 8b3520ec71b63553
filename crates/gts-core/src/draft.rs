//! Field helpers shared by the write drafts.

use crate::{Error, Result};

/// Trim `value`; absent or blank is a missing required field.
pub(crate) fn required_str(value: Option<String>) -> Result<String> {
  optional_str(value).ok_or(Error::MissingFields)
}

/// Trim `value`; blank collapses to `None`.
pub(crate) fn optional_str(value: Option<String>) -> Option<String> {
  value
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
}

/// Foreign-key ids are required; zero counts as absent.
pub(crate) fn required_id(value: Option<i64>) -> Result<i64> {
  value.filter(|id| *id != 0).ok_or(Error::MissingFields)
}

/// Trim every entry and drop the blank ones.
pub(crate) fn tag_list(values: Option<Vec<String>>) -> Vec<String> {
  values
    .unwrap_or_default()
    .into_iter()
    .map(|s| s.trim().to_owned())
    .filter(|s| !s.is_empty())
    .collect()
}
