//! Location of the catalog database.

use std::path::PathBuf;

use serde::Deserialize;

/// Where the SQLite file lives and what the health check calls it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
  /// Database name; the file is `<dir>/<name>.sqlite3`.
  pub name: String,
  pub dir:  PathBuf,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self {
      name: "gtsdb".to_owned(),
      dir:  PathBuf::from("."),
    }
  }
}

impl DatabaseConfig {
  pub fn path(&self) -> PathBuf { self.dir.join(format!("{}.sqlite3", self.name)) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_path() {
    assert_eq!(DatabaseConfig::default().path(), PathBuf::from("./gtsdb.sqlite3"));
  }
}
