//! Handler for `GET /health`.
//!
//! Store failures are not caught here: an unreachable database surfaces as a
//! 500 from the error layer.

use std::sync::Arc;

use axum::{Json, extract::State};
use gts_core::store::CatalogStore;
use serde_json::{Value, json};

use crate::error::ApiError;

/// `GET /health` — `{"ok": true, "db": <name>, "test": 1}`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError>
where
  S: CatalogStore,
{
  let probe = store.ping().await.map_err(ApiError::store)?;
  Ok(Json(json!({
    "ok": true,
    "db": store.database_name(),
    "test": probe,
  })))
}
