//! Thesis — the central catalog record, plus its topic and keyword tags.
//!
//! Reads come back in several shapes depending on the endpoint:
//!
//! | Type | Used by |
//! |------|---------|
//! | [`ThesisDetail`] | single-thesis fetch, with author/university/institute names and tags |
//! | [`ThesisListing`] | the thesis list and search results |
//! | [`ThesisSummary`] | theses of a university |
//! | [`PagedThesisSummary`] | theses of a person or an institute |
//! | [`CatalogRow`] | the server-rendered catalog page |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  Error, Result,
  draft::{optional_str, required_id, required_str, tag_list},
};

// ─── Read models ─────────────────────────────────────────────────────────────

/// Full thesis record with joined names and its distinct tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisDetail {
  pub id:              i64,
  pub title:           String,
  pub r#abstract:      String,
  pub author_id:       i64,
  pub author_name:     String,
  pub thesis_year:     Option<i32>,
  pub thesis_type:     String,
  pub university_id:   i64,
  pub university_name: String,
  pub institute_id:    i64,
  pub institute_name:  String,
  pub page_count:      Option<i64>,
  pub language:        String,
  pub submission_date: Option<NaiveDate>,
  /// Distinct topic names, unordered.
  pub topics:          Vec<String>,
  /// Distinct keywords, unordered.
  pub keywords:        Vec<String>,
}

/// A row of the thesis list and of search results.
///
/// Keeps the storage-style keys the catalog client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThesisListing {
  pub th_num:  i64,
  pub title:   String,
  pub th_year: Option<i32>,
  pub th_type: String,
  pub author:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisSummary {
  pub id:          i64,
  pub title:       String,
  pub thesis_year: Option<i32>,
  pub thesis_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedThesisSummary {
  #[serde(flatten)]
  pub summary:    ThesisSummary,
  pub page_count: Option<i64>,
}

/// One line of the HTML catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
  pub th_num:      i64,
  pub title:       String,
  pub th_type:     String,
  pub th_year:     Option<NaiveDate>,
  pub th_language: String,
  pub page_num:    Option<i64>,
  pub author_name: String,
}

// ─── Writes ──────────────────────────────────────────────────────────────────

/// Unvalidated create/update body for a thesis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThesisDraft {
  pub title:           Option<String>,
  pub r#abstract:      Option<String>,
  pub author_id:       Option<i64>,
  /// Integer or numeric string; see [`normalize_year`].
  pub thesis_year:     Option<Value>,
  pub thesis_type:     Option<String>,
  pub university_id:   Option<i64>,
  pub institute_id:    Option<i64>,
  pub page_count:      Option<i64>,
  pub language:        Option<String>,
  pub submission_date: Option<String>,
  pub topics:          Option<Vec<String>>,
  pub keywords:        Option<Vec<String>>,
}

/// A validated thesis ready to be written.
///
/// `topics` and `keywords` fully replace any existing tags on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewThesis {
  pub title:           String,
  pub r#abstract:      String,
  pub author_id:       i64,
  /// Always January 1st of the submitted year.
  pub thesis_year:     Option<NaiveDate>,
  pub thesis_type:     String,
  pub university_id:   i64,
  pub institute_id:    i64,
  pub page_count:      Option<i64>,
  pub language:        String,
  /// Passed through as submitted; the store rejects non-dates.
  pub submission_date: Option<String>,
  pub topics:          Vec<String>,
  pub keywords:        Vec<String>,
}

impl ThesisDraft {
  /// Required fields are checked before the year, so a payload missing both
  /// reports missing fields.
  pub fn validate(self) -> Result<NewThesis> {
    let title = required_str(self.title)?;
    let r#abstract = required_str(self.r#abstract)?;
    let author_id = required_id(self.author_id)?;
    let thesis_type = required_str(self.thesis_type)?;
    let university_id = required_id(self.university_id)?;
    let institute_id = required_id(self.institute_id)?;
    let language = required_str(self.language)?;

    let thesis_year = match &self.thesis_year {
      Some(value) => normalize_year(value)?,
      None => None,
    };

    Ok(NewThesis {
      title,
      r#abstract,
      author_id,
      thesis_year,
      thesis_type,
      university_id,
      institute_id,
      page_count: self.page_count,
      language,
      submission_date: optional_str(self.submission_date),
      topics: tag_list(self.topics),
      keywords: tag_list(self.keywords),
    })
  }
}

// ─── Year normalisation ──────────────────────────────────────────────────────

/// Turn a submitted `thesisYear` into the synthetic `YYYY-01-01` date.
///
/// Falsy values (`null`, `""`, `0`, `false`) mean "no year". Numbers are
/// truncated toward zero, strings are trimmed and parsed as integers.
/// Anything else, or a year outside 1..=9999, is [`Error::InvalidYear`].
pub fn normalize_year(value: &Value) -> Result<Option<NaiveDate>> {
  let year = match value {
    Value::Null | Value::Bool(false) => return Ok(None),
    Value::String(s) if s.is_empty() => return Ok(None),
    Value::String(s) => s.trim().parse::<i64>().map_err(|_| Error::InvalidYear)?,
    Value::Number(n) => match n.as_i64() {
      Some(i) => i,
      None => n.as_f64().map(|f| f.trunc() as i64).ok_or(Error::InvalidYear)?,
    },
    _ => return Err(Error::InvalidYear),
  };

  if year == 0 && !matches!(value, Value::String(_)) {
    return Ok(None);
  }

  i32::try_from(year)
    .ok()
    .filter(|y| (1..=9999).contains(y))
    .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    .map(Some)
    .ok_or(Error::InvalidYear)
}
