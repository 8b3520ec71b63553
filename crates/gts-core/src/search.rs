//! Search query types.

use serde::Deserialize;

/// Which column a search keyword is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
  /// Title or abstract.
  #[default]
  FreeText,
  /// Any topic of the thesis.
  Topic,
  /// Any keyword of the thesis.
  Keyword,
}

impl SearchMode {
  /// `"topic"` and `"keyword"` (case-insensitive, trimmed) select the tag
  /// modes; anything else, including nothing, is free text.
  pub fn parse(tag: Option<&str>) -> Self {
    match tag.map(|t| t.trim().to_lowercase()).as_deref() {
      Some("topic") => SearchMode::Topic,
      Some("keyword") => SearchMode::Keyword,
      _ => SearchMode::FreeText,
    }
  }
}

/// Raw `POST /search` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchDraft {
  pub keyword: Option<String>,
  pub r#type:  Option<String>,
}

/// Parameters for [`CatalogStore::search`](crate::store::CatalogStore::search).
///
/// Matching is a case-insensitive substring match; an empty keyword matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
  pub keyword: String,
  pub mode:    SearchMode,
}

impl SearchQuery {
  /// `LIKE` pattern for the keyword.
  pub fn pattern(&self) -> String { format!("%{}%", self.keyword) }
}

impl From<SearchDraft> for SearchQuery {
  fn from(draft: SearchDraft) -> Self {
    SearchQuery {
      keyword: draft.keyword.unwrap_or_default().trim().to_owned(),
      mode:    SearchMode::parse(draft.r#type.as_deref()),
    }
  }
}
