//! Handlers for `/institutes` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/institutes` | With joined `universityName` |
//! | `POST`   | `/institutes` | Body: `{"instituteName","universityId"}`; 201 + `{"id"}` |
//! | `GET`    | `/institutes/:id` | 404 if not found |
//! | `PUT`    | `/institutes/:id` | Full overwrite; 404 if not found |
//! | `DELETE` | `/institutes/:id` | 404 if not found |
//! | `GET`    | `/institutes/:id/theses` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use gts_core::{
  institute::{Institute, InstituteDraft},
  store::CatalogStore,
  thesis::PagedThesisSummary,
};
use serde_json::{Value, json};

use crate::{
  body,
  error::{ApiError, write_failed},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /institutes`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Institute>>, ApiError>
where
  S: CatalogStore,
{
  let institutes = store.list_institutes().await.map_err(ApiError::store)?;
  Ok(Json(institutes))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /institutes`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  raw: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let institute = body::parse::<InstituteDraft>(&raw)?.validate()?;
  let id = store
    .create_institute(institute)
    .await
    .map_err(write_failed("create institute"))?;
  Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /institutes/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Institute>, ApiError>
where
  S: CatalogStore,
{
  let institute = store
    .get_institute(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("Institute"))?;
  Ok(Json(institute))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /institutes/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  raw: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let institute = body::parse::<InstituteDraft>(&raw)?.validate()?;
  let found = store
    .update_institute(id, institute)
    .await
    .map_err(write_failed("update institute"))?;
  if !found {
    tracing::debug!(id, "update of missing institute");
    return Err(ApiError::not_found("Institute"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /institutes/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let found = store
    .delete_institute(id)
    .await
    .map_err(write_failed("delete institute"))?;
  if !found {
    return Err(ApiError::not_found("Institute"));
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Relationships ────────────────────────────────────────────────────────────

/// `GET /institutes/:id/theses`
pub async fn theses<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<PagedThesisSummary>>, ApiError>
where
  S: CatalogStore,
{
  let theses = store.institute_theses(id).await.map_err(ApiError::store)?;
  Ok(Json(theses))
}
