//! JSON REST API and catalog page for the thesis catalog.
//!
//! Exposes an axum [`Router`] backed by any [`gts_core::store::CatalogStore`].
//! TLS, CORS and request tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = gts_api::router(Arc::new(store));
//! ```

pub mod body;
pub mod error;
pub mod health;
pub mod home;
pub mod institutes;
pub mod persons;
pub mod search;
pub mod theses;
pub mod universities;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use gts_core::store::CatalogStore;

pub use error::ApiError;

/// The catalog page at `/` plus the JSON API under `/api`.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/", get(home::page::<S>))
    .with_state(store.clone())
    .nest("/api", api_router(store))
}

/// Build the JSON API router for `store`, without the `/api` prefix.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    // Theses
    .route("/theses", get(theses::list::<S>).post(theses::create::<S>))
    .route(
      "/theses/{id}",
      get(theses::get_one::<S>)
        .put(theses::update::<S>)
        .delete(theses::delete::<S>),
    )
    // Persons
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route(
      "/persons/{id}",
      get(persons::get_one::<S>)
        .put(persons::update::<S>)
        .delete(persons::delete::<S>),
    )
    .route("/persons/{id}/theses", get(persons::theses::<S>))
    // Universities
    .route(
      "/universities",
      get(universities::list::<S>).post(universities::create::<S>),
    )
    .route(
      "/universities/{id}",
      get(universities::get_one::<S>)
        .put(universities::update::<S>)
        .delete(universities::delete::<S>),
    )
    .route("/universities/{id}/institutes", get(universities::institutes::<S>))
    .route("/universities/{id}/theses", get(universities::theses::<S>))
    // Institutes
    .route("/institutes", get(institutes::list::<S>).post(institutes::create::<S>))
    .route(
      "/institutes/{id}",
      get(institutes::get_one::<S>)
        .put(institutes::update::<S>)
        .delete(institutes::delete::<S>),
    )
    .route("/institutes/{id}/theses", get(institutes::theses::<S>))
    // Search
    .route("/search", post(search::handler::<S>))
    .with_state(store)
}
