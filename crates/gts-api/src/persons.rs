//! Handlers for `/persons` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/persons` | All persons by id |
//! | `POST`   | `/persons` | Body: `{"firstName","secondName","phoneNumber"?}`; 201 + `{"id"}` |
//! | `GET`    | `/persons/:id` | 404 if not found |
//! | `PUT`    | `/persons/:id` | Full overwrite; 404 if not found |
//! | `DELETE` | `/persons/:id` | 404 if not found |
//! | `GET`    | `/persons/:id/theses` | Theses authored by the person |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use gts_core::{
  person::{Person, PersonDraft},
  store::CatalogStore,
  thesis::PagedThesisSummary,
};
use serde_json::{Value, json};

use crate::{
  body,
  error::{ApiError, write_failed},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Person>>, ApiError>
where
  S: CatalogStore,
{
  let persons = store.list_persons().await.map_err(ApiError::store)?;
  Ok(Json(persons))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  raw: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let person = body::parse::<PersonDraft>(&raw)?.validate()?;
  let id = store
    .create_person(person)
    .await
    .map_err(write_failed("create person"))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Person>, ApiError>
where
  S: CatalogStore,
{
  let person = store
    .get_person(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("Person"))?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /persons/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  raw: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let person = body::parse::<PersonDraft>(&raw)?.validate()?;
  let found = store
    .update_person(id, person)
    .await
    .map_err(write_failed("update person"))?;
  if !found {
    tracing::debug!(id, "update of missing person");
    return Err(ApiError::not_found("Person"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /persons/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let found = store
    .delete_person(id)
    .await
    .map_err(write_failed("delete person"))?;
  if !found {
    return Err(ApiError::not_found("Person"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Relationships ────────────────────────────────────────────────────────────

/// `GET /persons/:id/theses` — empty when the person has none or does not
/// exist.
pub async fn theses<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<PagedThesisSummary>>, ApiError>
where
  S: CatalogStore,
{
  let theses = store.person_theses(id).await.map_err(ApiError::store)?;
  Ok(Json(theses))
}
