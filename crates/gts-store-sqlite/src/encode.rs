//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` text. Aggregated tag lists come back from
//! `json_group_array` as JSON text.

use chrono::NaiveDate;
use gts_core::{
  institute::Institute,
  person::Person,
  thesis::{CatalogRow, PagedThesisSummary, ThesisDetail, ThesisListing, ThesisSummary},
  university::University,
};
use rusqlite::Row;

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.as_deref().map(decode_date).transpose()
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn decode_tags(s: &str) -> Result<Vec<String>> { Ok(serde_json::from_str(s)?) }

// ─── Row mappers ─────────────────────────────────────────────────────────────
//
// Each mapper expects the column order of the SELECTs in `store.rs`.

pub fn person_row(row: &Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:           row.get(0)?,
    first_name:   row.get(1)?,
    second_name:  row.get(2)?,
    phone_number: row.get(3)?,
  })
}

pub fn university_row(row: &Row<'_>) -> rusqlite::Result<University> {
  Ok(University {
    id:              row.get(0)?,
    university_name: row.get(1)?,
    location:        row.get(2)?,
  })
}

/// `ins_id, ins_name, uni_id, uni_name`
pub fn institute_row(row: &Row<'_>) -> rusqlite::Result<Institute> {
  Ok(Institute {
    university_name: row.get(3)?,
    ..bare_institute_row(row)?
  })
}

/// `ins_id, ins_name, uni_id`
pub fn bare_institute_row(row: &Row<'_>) -> rusqlite::Result<Institute> {
  Ok(Institute {
    id:              row.get(0)?,
    institute_name:  row.get(1)?,
    university_id:   row.get(2)?,
    university_name: None,
  })
}

pub fn listing_row(row: &Row<'_>) -> rusqlite::Result<ThesisListing> {
  Ok(ThesisListing {
    th_num:  row.get(0)?,
    title:   row.get(1)?,
    th_year: row.get(2)?,
    th_type: row.get(3)?,
    author:  row.get(4)?,
  })
}

pub fn summary_row(row: &Row<'_>) -> rusqlite::Result<ThesisSummary> {
  Ok(ThesisSummary {
    id:          row.get(0)?,
    title:       row.get(1)?,
    thesis_year: row.get(2)?,
    thesis_type: row.get(3)?,
  })
}

pub fn paged_summary_row(row: &Row<'_>) -> rusqlite::Result<PagedThesisSummary> {
  Ok(PagedThesisSummary {
    summary:    summary_row(row)?,
    page_count: row.get(4)?,
  })
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A thesis detail row before date and tag decoding.
pub struct RawThesisDetail {
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
  pub submission_date: Option<String>,
  pub topics:          String,
  pub keywords:        String,
}

impl RawThesisDetail {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      title:           row.get(1)?,
      r#abstract:      row.get(2)?,
      author_id:       row.get(3)?,
      author_name:     row.get(4)?,
      thesis_year:     row.get(5)?,
      thesis_type:     row.get(6)?,
      university_id:   row.get(7)?,
      university_name: row.get(8)?,
      institute_id:    row.get(9)?,
      institute_name:  row.get(10)?,
      page_count:      row.get(11)?,
      language:        row.get(12)?,
      submission_date: row.get(13)?,
      topics:          row.get(14)?,
      keywords:        row.get(15)?,
    })
  }

  pub fn into_detail(self) -> Result<ThesisDetail> {
    Ok(ThesisDetail {
      id:              self.id,
      title:           self.title,
      r#abstract:      self.r#abstract,
      author_id:       self.author_id,
      author_name:     self.author_name,
      thesis_year:     self.thesis_year,
      thesis_type:     self.thesis_type,
      university_id:   self.university_id,
      university_name: self.university_name,
      institute_id:    self.institute_id,
      institute_name:  self.institute_name,
      page_count:      self.page_count,
      language:        self.language,
      submission_date: decode_opt_date(self.submission_date)?,
      topics:          decode_tags(&self.topics)?,
      keywords:        decode_tags(&self.keywords)?,
    })
  }
}

/// A catalog page row before date decoding.
pub struct RawCatalogRow {
  pub th_num:      i64,
  pub title:       String,
  pub th_type:     String,
  pub th_year:     Option<String>,
  pub th_language: String,
  pub page_num:    Option<i64>,
  pub author_name: String,
}

impl RawCatalogRow {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      th_num:      row.get(0)?,
      title:       row.get(1)?,
      th_type:     row.get(2)?,
      th_year:     row.get(3)?,
      th_language: row.get(4)?,
      page_num:    row.get(5)?,
      author_name: row.get(6)?,
    })
  }

  pub fn into_row(self) -> Result<CatalogRow> {
    Ok(CatalogRow {
      th_num:      self.th_num,
      title:       self.title,
      th_type:     self.th_type,
      th_year:     decode_opt_date(self.th_year)?,
      th_language: self.th_language,
      page_num:    self.page_num,
      author_name: self.author_name,
    })
  }
}
