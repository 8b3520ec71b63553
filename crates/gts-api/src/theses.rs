//! Handlers for `/theses` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/theses` | [`ThesisListing`] rows by number |
//! | `POST`   | `/theses` | Body: [`ThesisDraft`]; 201 + `{"id"}` |
//! | `GET`    | `/theses/:id` | [`ThesisDetail`] with topics and keywords; 404 if not found |
//! | `PUT`    | `/theses/:id` | Full overwrite, tags replaced; 404 if not found |
//! | `DELETE` | `/theses/:id` | Removes tags too; 404 if not found |
//!
//! The thesis's institute is not checked against its university.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use gts_core::{
  store::CatalogStore,
  thesis::{ThesisDetail, ThesisDraft, ThesisListing},
};
use serde_json::{Value, json};

use crate::{
  body,
  error::{ApiError, write_failed},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /theses`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<ThesisListing>>, ApiError>
where
  S: CatalogStore,
{
  let theses = store.list_theses().await.map_err(ApiError::store)?;
  Ok(Json(theses))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /theses`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  raw: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let thesis = body::parse::<ThesisDraft>(&raw)?.validate()?;
  let id = store
    .create_thesis(thesis)
    .await
    .map_err(write_failed("create thesis"))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /theses/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<ThesisDetail>, ApiError>
where
  S: CatalogStore,
{
  let thesis = store
    .get_thesis(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("Thesis"))?;
  Ok(Json(thesis))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /theses/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  raw: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let thesis = body::parse::<ThesisDraft>(&raw)?.validate()?;
  let found = store
    .update_thesis(id, thesis)
    .await
    .map_err(write_failed("update thesis"))?;
  if !found {
    tracing::debug!(id, "update of missing thesis rolled back");
    return Err(ApiError::not_found("Thesis"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /theses/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let found = store
    .delete_thesis(id)
    .await
    .map_err(write_failed("delete thesis"))?;
  if !found {
    return Err(ApiError::not_found("Thesis"));
  }
  Ok(Json(json!({ "ok": true })))
}
