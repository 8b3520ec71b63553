//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::{path::PathBuf, time::Duration};

use gts_core::{
  institute::{Institute, NewInstitute},
  person::{NewPerson, Person},
  search::{SearchMode, SearchQuery},
  store::CatalogStore,
  thesis::{
    CatalogRow, NewThesis, PagedThesisSummary, ThesisDetail, ThesisListing,
    ThesisSummary,
  },
  university::{NewUniversity, University},
};
use rusqlite::{OptionalExtension as _, functions::FunctionFlags};

use crate::{
  DatabaseConfig, Result,
  encode::{
    RawCatalogRow, RawThesisDetail, bare_institute_row, encode_date, institute_row,
    listing_row, paged_summary_row, person_row, summary_row, university_row,
  },
  schema::SCHEMA,
};

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Columns of [`ThesisListing`], shared by the thesis list and every search
/// mode. Expects `thesis T JOIN person P`.
const LISTING_COLUMNS: &str = "
  T.th_num,
  T.title,
  CAST(strftime('%Y', T.th_year) AS INTEGER) AS th_year,
  T.th_type,
  P.first_name || ' ' || P.second_name AS author";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A thesis catalog backed by a single SQLite file.
///
/// Holds no connection: each call opens one, uses it, and closes it.
#[derive(Clone, Debug)]
pub struct SqliteStore {
  path: PathBuf,
  name: String,
}

impl SqliteStore {
  /// Point the store at the configured file, creating it and its tables if
  /// needed.
  pub async fn open(config: &DatabaseConfig) -> Result<Self> {
    let store = Self {
      path: config.path(),
      name: config.name.clone(),
    };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .with_conn(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run `f` on a fresh connection, then close it whatever the outcome.
  ///
  /// Writes open a [`rusqlite::Transaction`] inside `f`; one dropped without
  /// `commit()` rolls back.
  async fn with_conn<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    tracing::debug!(path = %self.path.display(), "opening database connection");
    let conn = tokio_rusqlite::Connection::open(&self.path).await?;

    let result = conn
      .call(move |conn| {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        register_functions(conn)?;
        f(conn)
      })
      .await;

    if let Err(e) = conn.close().await {
      tracing::warn!(error = %e, "failed to close database connection");
    }

    Ok(result?)
  }

  /// Run a single-row write by id in its own transaction; report whether a
  /// row matched.
  async fn write_by_id<P>(&self, sql: &'static str, params: P) -> Result<bool>
  where
    P: rusqlite::Params + Send + 'static,
  {
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        if tx.execute(sql, params)? == 0 {
          return Ok(false);
        }
        tx.commit()?;
        Ok(true)
      })
      .await
  }

  /// Run a single insert in its own transaction and return the new row id.
  async fn insert<P>(&self, sql: &'static str, params: P) -> Result<i64>
  where
    P: rusqlite::Params + Send + 'static,
  {
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(sql, params)?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await
  }

  /// Run a parameterised SELECT and map every row.
  async fn query_all<T, P>(
    &self,
    sql: String,
    params: P,
    map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
  ) -> Result<Vec<T>>
  where
    T: Send + 'static,
    P: rusqlite::Params + Send + 'static,
  {
    self
      .with_conn(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params, map)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  /// Run a parameterised SELECT expected to match at most one row.
  async fn query_one<T>(
    &self,
    sql: &'static str,
    id: i64,
    map: fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
  ) -> Result<Option<T>>
  where
    T: Send + 'static,
  {
    self
      .with_conn(move |conn| {
        Ok(conn.query_row(sql, rusqlite::params![id], map).optional()?)
      })
      .await
  }
}

/// SQLite's `LIKE` only folds ASCII case; searches compare through
/// `unicode_lower` on both sides instead.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "unicode_lower",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}

// ─── Thesis helpers ──────────────────────────────────────────────────────────

/// Insert one row per topic and per keyword for `th_num`.
fn insert_tags(
  conn: &rusqlite::Connection,
  th_num: i64,
  topics: &[String],
  keywords: &[String],
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare("INSERT INTO topic (th_num, topic_name) VALUES (?1, ?2)")?;
  for topic in topics {
    stmt.execute(rusqlite::params![th_num, topic])?;
  }

  let mut stmt = conn.prepare("INSERT INTO keyword (th_num, keyword) VALUES (?1, ?2)")?;
  for keyword in keywords {
    stmt.execute(rusqlite::params![th_num, keyword])?;
  }
  Ok(())
}

/// Column values of a thesis row, in `INSERT`/`UPDATE` parameter order.
struct ThesisColumns {
  title:           String,
  r#abstract:      String,
  author_id:       i64,
  th_year:         Option<String>,
  th_type:         String,
  uni_id:          i64,
  ins_id:          i64,
  page_num:        Option<i64>,
  th_language:     String,
  submission_date: Option<String>,
}

fn split_thesis(thesis: NewThesis) -> (ThesisColumns, Vec<String>, Vec<String>) {
  let columns = ThesisColumns {
    title:           thesis.title,
    r#abstract:      thesis.r#abstract,
    author_id:       thesis.author_id,
    th_year:         thesis.thesis_year.map(encode_date),
    th_type:         thesis.thesis_type,
    uni_id:          thesis.university_id,
    ins_id:          thesis.institute_id,
    page_num:        thesis.page_count,
    th_language:     thesis.language,
    submission_date: thesis.submission_date,
  };
  (columns, thesis.topics, thesis.keywords)
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Health ────────────────────────────────────────────────────────────────

  fn database_name(&self) -> &str { &self.name }

  async fn ping(&self) -> Result<i64> {
    self
      .with_conn(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get(0))?))
      .await
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn list_persons(&self) -> Result<Vec<Person>> {
    self
      .query_all(
        "SELECT per_id, first_name, second_name, phone_num
         FROM person
         ORDER BY per_id"
          .to_owned(),
        [],
        person_row,
      )
      .await
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    self
      .query_one(
        "SELECT per_id, first_name, second_name, phone_num
         FROM person
         WHERE per_id = ?1",
        id,
        person_row,
      )
      .await
  }

  async fn create_person(&self, person: NewPerson) -> Result<i64> {
    self
      .insert(
        "INSERT INTO person (first_name, second_name, phone_num) VALUES (?1, ?2, ?3)",
        (person.first_name, person.second_name, person.phone_number),
      )
      .await
  }

  async fn update_person(&self, id: i64, person: NewPerson) -> Result<bool> {
    self
      .write_by_id(
        "UPDATE person
         SET first_name = ?1,
             second_name = ?2,
             phone_num = ?3
         WHERE per_id = ?4",
        (person.first_name, person.second_name, person.phone_number, id),
      )
      .await
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    self
      .write_by_id("DELETE FROM person WHERE per_id = ?1", (id,))
      .await
  }

  async fn person_theses(&self, id: i64) -> Result<Vec<PagedThesisSummary>> {
    self
      .query_all(
        "SELECT th_num, title, CAST(strftime('%Y', th_year) AS INTEGER), th_type, page_num
         FROM thesis
         WHERE author_id = ?1
         ORDER BY th_num"
          .to_owned(),
        (id,),
        paged_summary_row,
      )
      .await
  }

  // ── Universities ──────────────────────────────────────────────────────────

  async fn list_universities(&self) -> Result<Vec<University>> {
    self
      .query_all(
        "SELECT uni_id, uni_name, uni_location
         FROM university
         ORDER BY uni_id"
          .to_owned(),
        [],
        university_row,
      )
      .await
  }

  async fn get_university(&self, id: i64) -> Result<Option<University>> {
    self
      .query_one(
        "SELECT uni_id, uni_name, uni_location
         FROM university
         WHERE uni_id = ?1",
        id,
        university_row,
      )
      .await
  }

  async fn create_university(&self, university: NewUniversity) -> Result<i64> {
    self
      .insert(
        "INSERT INTO university (uni_name, uni_location) VALUES (?1, ?2)",
        (university.university_name, university.location),
      )
      .await
  }

  async fn update_university(&self, id: i64, university: NewUniversity) -> Result<bool> {
    self
      .write_by_id(
        "UPDATE university
         SET uni_name = ?1,
             uni_location = ?2
         WHERE uni_id = ?3",
        (university.university_name, university.location, id),
      )
      .await
  }

  async fn delete_university(&self, id: i64) -> Result<bool> {
    self
      .write_by_id("DELETE FROM university WHERE uni_id = ?1", (id,))
      .await
  }

  async fn university_institutes(&self, id: i64) -> Result<Vec<Institute>> {
    self
      .query_all(
        "SELECT ins_id, ins_name, uni_id
         FROM institute
         WHERE uni_id = ?1
         ORDER BY ins_id"
          .to_owned(),
        (id,),
        bare_institute_row,
      )
      .await
  }

  async fn university_theses(&self, id: i64) -> Result<Vec<ThesisSummary>> {
    self
      .query_all(
        "SELECT th_num, title, CAST(strftime('%Y', th_year) AS INTEGER), th_type
         FROM thesis
         WHERE uni_id = ?1
         ORDER BY th_num"
          .to_owned(),
        (id,),
        summary_row,
      )
      .await
  }

  // ── Institutes ────────────────────────────────────────────────────────────

  async fn list_institutes(&self) -> Result<Vec<Institute>> {
    self
      .query_all(
        "SELECT I.ins_id, I.ins_name, I.uni_id, U.uni_name
         FROM institute I
         JOIN university U ON I.uni_id = U.uni_id
         ORDER BY I.ins_id"
          .to_owned(),
        [],
        institute_row,
      )
      .await
  }

  async fn get_institute(&self, id: i64) -> Result<Option<Institute>> {
    self
      .query_one(
        "SELECT I.ins_id, I.ins_name, I.uni_id, U.uni_name
         FROM institute I
         JOIN university U ON I.uni_id = U.uni_id
         WHERE I.ins_id = ?1",
        id,
        institute_row,
      )
      .await
  }

  async fn create_institute(&self, institute: NewInstitute) -> Result<i64> {
    self
      .insert(
        "INSERT INTO institute (ins_name, uni_id) VALUES (?1, ?2)",
        (institute.institute_name, institute.university_id),
      )
      .await
  }

  async fn update_institute(&self, id: i64, institute: NewInstitute) -> Result<bool> {
    self
      .write_by_id(
        "UPDATE institute
         SET ins_name = ?1,
             uni_id = ?2
         WHERE ins_id = ?3",
        (institute.institute_name, institute.university_id, id),
      )
      .await
  }

  async fn delete_institute(&self, id: i64) -> Result<bool> {
    self
      .write_by_id("DELETE FROM institute WHERE ins_id = ?1", (id,))
      .await
  }

  async fn institute_theses(&self, id: i64) -> Result<Vec<PagedThesisSummary>> {
    self
      .query_all(
        "SELECT th_num, title, CAST(strftime('%Y', th_year) AS INTEGER), th_type, page_num
         FROM thesis
         WHERE ins_id = ?1
         ORDER BY th_num"
          .to_owned(),
        (id,),
        paged_summary_row,
      )
      .await
  }

  // ── Theses ────────────────────────────────────────────────────────────────

  async fn list_theses(&self) -> Result<Vec<ThesisListing>> {
    self
      .query_all(
        format!(
          "SELECT {LISTING_COLUMNS}
           FROM thesis T
           JOIN person P ON T.author_id = P.per_id
           ORDER BY T.th_num"
        ),
        [],
        listing_row,
      )
      .await
  }

  async fn catalog_rows(&self) -> Result<Vec<CatalogRow>> {
    let raws = self
      .query_all(
        "SELECT T.th_num, T.title, T.th_type, T.th_year, T.th_language,
                T.page_num, P.first_name || ' ' || P.second_name AS author_name
         FROM thesis T
         JOIN person P ON T.author_id = P.per_id
         ORDER BY T.th_num"
          .to_owned(),
        [],
        RawCatalogRow::from_row,
      )
      .await?;

    raws.into_iter().map(RawCatalogRow::into_row).collect()
  }

  async fn get_thesis(&self, id: i64) -> Result<Option<ThesisDetail>> {
    let raw = self
      .query_one(
        "SELECT
           T.th_num,
           T.title,
           T.abstract,
           T.author_id,
           P.first_name || ' ' || P.second_name,
           CAST(strftime('%Y', T.th_year) AS INTEGER),
           T.th_type,
           T.uni_id,
           U.uni_name,
           T.ins_id,
           I.ins_name,
           T.page_num,
           T.th_language,
           T.submission_date,
           (SELECT json_group_array(DISTINCT TP.topic_name)
              FROM topic TP WHERE TP.th_num = T.th_num),
           (SELECT json_group_array(DISTINCT K.keyword)
              FROM keyword K WHERE K.th_num = T.th_num)
         FROM thesis T
         JOIN person P ON T.author_id = P.per_id
         JOIN university U ON T.uni_id = U.uni_id
         JOIN institute I ON T.ins_id = I.ins_id
         WHERE T.th_num = ?1",
        id,
        RawThesisDetail::from_row,
      )
      .await?;

    raw.map(RawThesisDetail::into_detail).transpose()
  }

  async fn create_thesis(&self, thesis: NewThesis) -> Result<i64> {
    let (t, topics, keywords) = split_thesis(thesis);

    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO thesis (
             title, abstract, author_id, th_year, th_type, uni_id, ins_id,
             page_num, th_language, submission_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            t.title,
            t.r#abstract,
            t.author_id,
            t.th_year,
            t.th_type,
            t.uni_id,
            t.ins_id,
            t.page_num,
            t.th_language,
            t.submission_date,
          ],
        )?;
        let th_num = tx.last_insert_rowid();

        insert_tags(&tx, th_num, &topics, &keywords)?;

        tx.commit()?;
        Ok(th_num)
      })
      .await
  }

  async fn update_thesis(&self, id: i64, thesis: NewThesis) -> Result<bool> {
    let (t, topics, keywords) = split_thesis(thesis);

    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        let updated = tx.execute(
          "UPDATE thesis
           SET title = ?1,
               abstract = ?2,
               author_id = ?3,
               th_year = ?4,
               th_type = ?5,
               uni_id = ?6,
               ins_id = ?7,
               page_num = ?8,
               th_language = ?9,
               submission_date = ?10
           WHERE th_num = ?11",
          rusqlite::params![
            t.title,
            t.r#abstract,
            t.author_id,
            t.th_year,
            t.th_type,
            t.uni_id,
            t.ins_id,
            t.page_num,
            t.th_language,
            t.submission_date,
            id,
          ],
        )?;
        if updated == 0 {
          return Ok(false);
        }

        // Full replace: prior tags never survive an update.
        tx.execute("DELETE FROM topic WHERE th_num = ?1", [id])?;
        tx.execute("DELETE FROM keyword WHERE th_num = ?1", [id])?;
        insert_tags(&tx, id, &topics, &keywords)?;

        tx.commit()?;
        Ok(true)
      })
      .await
  }

  async fn delete_thesis(&self, id: i64) -> Result<bool> {
    self
      .with_conn(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM keyword WHERE th_num = ?1", [id])?;
        tx.execute("DELETE FROM topic WHERE th_num = ?1", [id])?;
        if tx.execute("DELETE FROM thesis WHERE th_num = ?1", [id])? == 0 {
          return Ok(false);
        }
        tx.commit()?;
        Ok(true)
      })
      .await
  }

  async fn search(&self, query: &SearchQuery) -> Result<Vec<ThesisListing>> {
    let pattern = query.pattern();

    let sql = match query.mode {
      SearchMode::Topic => format!(
        "SELECT DISTINCT {LISTING_COLUMNS}
         FROM thesis T
         JOIN person P ON T.author_id = P.per_id
         JOIN topic TP ON TP.th_num = T.th_num
         WHERE unicode_lower(TP.topic_name) LIKE unicode_lower(?1)
         ORDER BY T.th_num"
      ),
      SearchMode::Keyword => format!(
        "SELECT DISTINCT {LISTING_COLUMNS}
         FROM thesis T
         JOIN person P ON T.author_id = P.per_id
         JOIN keyword K ON K.th_num = T.th_num
         WHERE unicode_lower(K.keyword) LIKE unicode_lower(?1)
         ORDER BY T.th_num"
      ),
      SearchMode::FreeText => format!(
        "SELECT {LISTING_COLUMNS}
         FROM thesis T
         JOIN person P ON T.author_id = P.per_id
         WHERE unicode_lower(T.title) LIKE unicode_lower(?1)
            OR unicode_lower(T.abstract) LIKE unicode_lower(?1)
         ORDER BY T.th_num"
      ),
    };

    self.query_all(sql, (pattern,), listing_row).await
  }
}
