//! Thesis catalog HTTP server: configuration loading and app assembly.
//!
//! The binary in `main.rs` wires these together; they live here so they can
//! be tested without binding a socket.

use std::{collections::HashMap, path::Path, sync::Arc};

use axum::Router;
use config::{Config, ConfigError, Environment, File};
use gts_core::store::CatalogStore;
use gts_store_sqlite::DatabaseConfig;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Server configuration (loaded from a TOML file and `GTS_*` variables).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:     String,
  pub port:     u16,
  /// Add a permissive CORS layer for browser clients on another origin.
  pub cors:     bool,
  pub database: DatabaseConfig,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration: defaults, then `path` if it exists, then the
/// environment (`GTS_PORT`, `GTS_DATABASE__NAME`, ...).
pub fn load(path: &Path) -> Result<ServerConfig, ConfigError> {
  load_with_env(path, None)
}

fn load_with_env(
  path: &Path,
  env: Option<HashMap<String, String>>,
) -> Result<ServerConfig, ConfigError> {
  let database = DatabaseConfig::default();

  Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5001_i64)?
    .set_default("cors", false)?
    .set_default("database.name", database.name)?
    .set_default("database.dir", database.dir.to_string_lossy().into_owned())?
    .add_source(File::from(path).required(false))
    .add_source(
      Environment::with_prefix("GTS")
        .prefix_separator("_")
        .separator("__")
        .source(env),
    )
    .build()?
    .try_deserialize()
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// The catalog router with request tracing and, if enabled, CORS.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: CatalogStore + 'static,
{
  let app = gts_api::router(store).layer(TraceLayer::new_for_http());
  if config.cors {
    app.layer(CorsLayer::permissive())
  } else {
    app
  }
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    match tokio::signal::ctrl_c().await {
      Ok(()) => tracing::info!("received Ctrl-C, shutting down"),
      Err(e) => {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
        tracing::info!("received SIGTERM, shutting down");
      }
      Err(e) => {
        tracing::warn!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
}
