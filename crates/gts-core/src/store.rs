//! The `CatalogStore` trait.
//!
//! Implemented by storage backends (e.g. `gts-store-sqlite`). The HTTP layer
//! depends on this abstraction, not on any concrete backend.
//!
//! Conventions shared by every entity:
//!
//! - `list_*` returns all rows ascending by primary key.
//! - `get_*` returns `None` when the id does not exist.
//! - `create_*` returns the generated id.
//! - `update_*` / `delete_*` return `false` when no row matched; nothing is
//!   committed in that case.

use std::future::Future;

use crate::{
  institute::{Institute, NewInstitute},
  person::{NewPerson, Person},
  search::SearchQuery,
  thesis::{
    CatalogRow, NewThesis, PagedThesisSummary, ThesisDetail, ThesisListing,
    ThesisSummary,
  },
  university::{NewUniversity, University},
};

/// Abstraction over a thesis catalog backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Health ────────────────────────────────────────────────────────────

  /// Name of the underlying database, reported by the health check.
  fn database_name(&self) -> &str;

  /// Run a trivial query and return its value.
  fn ping(&self) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  // ── Persons ───────────────────────────────────────────────────────────

  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn create_person(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_person(
    &self,
    id: i64,
    person: NewPerson,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Theses authored by a person. The person's existence is not checked.
  fn person_theses(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Vec<PagedThesisSummary>, Self::Error>> + Send + '_;

  // ── Universities ──────────────────────────────────────────────────────

  fn list_universities(
    &self,
  ) -> impl Future<Output = Result<Vec<University>, Self::Error>> + Send + '_;

  fn get_university(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<University>, Self::Error>> + Send + '_;

  fn create_university(
    &self,
    university: NewUniversity,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_university(
    &self,
    id: i64,
    university: NewUniversity,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_university(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Institutes of a university, without the joined university name.
  fn university_institutes(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Vec<Institute>, Self::Error>> + Send + '_;

  fn university_theses(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Vec<ThesisSummary>, Self::Error>> + Send + '_;

  // ── Institutes ────────────────────────────────────────────────────────

  /// All institutes with their university name joined in.
  fn list_institutes(
    &self,
  ) -> impl Future<Output = Result<Vec<Institute>, Self::Error>> + Send + '_;

  fn get_institute(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Institute>, Self::Error>> + Send + '_;

  fn create_institute(
    &self,
    institute: NewInstitute,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  fn update_institute(
    &self,
    id: i64,
    institute: NewInstitute,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn delete_institute(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn institute_theses(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Vec<PagedThesisSummary>, Self::Error>> + Send + '_;

  // ── Theses ────────────────────────────────────────────────────────────

  fn list_theses(
    &self,
  ) -> impl Future<Output = Result<Vec<ThesisListing>, Self::Error>> + Send + '_;

  /// Rows for the server-rendered catalog page.
  fn catalog_rows(
    &self,
  ) -> impl Future<Output = Result<Vec<CatalogRow>, Self::Error>> + Send + '_;

  fn get_thesis(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<ThesisDetail>, Self::Error>> + Send + '_;

  /// Insert the thesis and all of its tags atomically.
  fn create_thesis(
    &self,
    thesis: NewThesis,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Overwrite the thesis row and replace all of its tags atomically.
  ///
  /// Tags are left untouched when the thesis does not exist.
  fn update_thesis(
    &self,
    id: i64,
    thesis: NewThesis,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete keywords, topics and then the thesis itself atomically.
  fn delete_thesis(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Distinct matching theses, ascending by number.
  fn search<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<Vec<ThesisListing>, Self::Error>> + Send + 'a;
}
