//! Handler for `GET /`: the server-rendered thesis catalog.
//!
//! Generated with `quick-xml`'s writer so every title and name is escaped.

use std::{io::Cursor, sync::Arc};

use axum::{extract::State, response::Html};
use chrono::Datelike;
use gts_core::{store::CatalogStore, thesis::CatalogRow};
use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::ApiError;

const COLUMNS: [&str; 7] = ["No", "Title", "Author", "Type", "Year", "Language", "Pages"];

/// `GET /`
pub async fn page<S>(State(store): State<Arc<S>>) -> Result<Html<String>, ApiError>
where
  S: CatalogStore,
{
  let rows = store.catalog_rows().await.map_err(ApiError::store)?;
  Ok(Html(render(&rows)?))
}

// ─── Rendering ────────────────────────────────────────────────────────────────

type Out = Writer<Cursor<Vec<u8>>>;

pub fn render(rows: &[CatalogRow]) -> Result<String, ApiError> {
  let mut w = Writer::new(Cursor::new(Vec::new()));

  emit(&mut w, Event::DocType(BytesText::from_escaped("html")))?;
  start(&mut w, "html")?;

  start(&mut w, "head")?;
  emit(
    &mut w,
    Event::Empty(BytesStart::new("meta").with_attributes([("charset", "utf-8")])),
  )?;
  text_elem(&mut w, "title", "Graduate Thesis System")?;
  end(&mut w, "head")?;

  start(&mut w, "body")?;
  text_elem(&mut w, "h1", "Theses")?;
  start(&mut w, "table")?;

  start(&mut w, "thead")?;
  start(&mut w, "tr")?;
  for column in COLUMNS {
    text_elem(&mut w, "th", column)?;
  }
  end(&mut w, "tr")?;
  end(&mut w, "thead")?;

  start(&mut w, "tbody")?;
  for row in rows {
    write_row(&mut w, row)?;
  }
  end(&mut w, "tbody")?;

  end(&mut w, "table")?;
  end(&mut w, "body")?;
  end(&mut w, "html")?;

  String::from_utf8(w.into_inner().into_inner()).map_err(|e| ApiError::Render(e.to_string()))
}

fn write_row(w: &mut Out, row: &CatalogRow) -> Result<(), ApiError> {
  let year = row.th_year.map(|d| d.year().to_string()).unwrap_or_default();
  let pages = row.page_num.map(|n| n.to_string()).unwrap_or_default();

  start(w, "tr")?;
  text_elem(w, "td", &row.th_num.to_string())?;
  text_elem(w, "td", &row.title)?;
  text_elem(w, "td", &row.author_name)?;
  text_elem(w, "td", &row.th_type)?;
  text_elem(w, "td", &year)?;
  text_elem(w, "td", &row.th_language)?;
  text_elem(w, "td", &pages)?;
  end(w, "tr")
}

fn emit(w: &mut Out, event: Event<'_>) -> Result<(), ApiError> {
  w.write_event(event).map_err(|e| ApiError::Render(e.to_string()))
}

fn start(w: &mut Out, tag: &str) -> Result<(), ApiError> {
  emit(w, Event::Start(BytesStart::new(tag)))
}

fn end(w: &mut Out, tag: &str) -> Result<(), ApiError> {
  emit(w, Event::End(BytesEnd::new(tag)))
}

fn text_elem(w: &mut Out, tag: &str, text: &str) -> Result<(), ApiError> {
  start(w, tag)?;
  if !text.is_empty() {
    emit(w, Event::Text(BytesText::new(text)))?;
  }
  end(w, tag)
}
