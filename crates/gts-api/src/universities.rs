//! Handlers for `/universities` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/universities` | All universities by id |
//! | `POST`   | `/universities` | Body: `{"universityName","location"}`; 201 + `{"id"}` |
//! | `GET`    | `/universities/:id` | 404 if not found |
//! | `PUT`    | `/universities/:id` | Full overwrite; 404 if not found |
//! | `DELETE` | `/universities/:id` | 404 if not found |
//! | `GET`    | `/universities/:id/institutes` | Without `universityName` |
//! | `GET`    | `/universities/:id/theses` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use gts_core::{
  institute::Institute,
  store::CatalogStore,
  thesis::ThesisSummary,
  university::{University, UniversityDraft},
};
use serde_json::{Value, json};

use crate::{
  body,
  error::{ApiError, write_failed},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /universities`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<University>>, ApiError>
where
  S: CatalogStore,
{
  let universities = store.list_universities().await.map_err(ApiError::store)?;
  Ok(Json(universities))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /universities`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  raw: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let university = body::parse::<UniversityDraft>(&raw)?.validate()?;
  let id = store
    .create_university(university)
    .await
    .map_err(write_failed("create university"))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /universities/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<University>, ApiError>
where
  S: CatalogStore,
{
  let university = store
    .get_university(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("University"))?;
  Ok(Json(university))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /universities/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  raw: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let university = body::parse::<UniversityDraft>(&raw)?.validate()?;
  let found = store
    .update_university(id, university)
    .await
    .map_err(write_failed("update university"))?;
  if !found {
    tracing::debug!(id, "update of missing university");
    return Err(ApiError::not_found("University"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /universities/:id` — fails with 400 while institutes or theses
/// still reference the university.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let found = store
    .delete_university(id)
    .await
    .map_err(write_failed("delete university"))?;
  if !found {
    return Err(ApiError::not_found("University"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Relationships ────────────────────────────────────────────────────────────

/// `GET /universities/:id/institutes`
pub async fn institutes<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Institute>>, ApiError>
where
  S: CatalogStore,
{
  let institutes = store.university_institutes(id).await.map_err(ApiError::store)?;
  Ok(Json(institutes))
}

/// `GET /universities/:id/theses`
pub async fn theses<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<ThesisSummary>>, ApiError>
where
  S: CatalogStore,
{
  let theses = store.university_theses(id).await.map_err(ApiError::store)?;
  Ok(Json(theses))
}
