//! Handler for `POST /search`.
//!
//! Body: `{"keyword": "...", "type": "topic" | "keyword" | <anything else>}`.
//! Any other `type` searches title and abstract.

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use gts_core::{
  search::{SearchDraft, SearchQuery},
  store::CatalogStore,
  thesis::ThesisListing,
};

use crate::{body, error::ApiError};

/// `POST /search`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  raw: Bytes,
) -> Result<Json<Vec<ThesisListing>>, ApiError>
where
  S: CatalogStore,
{
  let query = SearchQuery::from(body::parse::<SearchDraft>(&raw)?);
  let theses = store.search(&query).await.map_err(ApiError::store)?;
  Ok(Json(theses))
}
