//! HTTP layer for the ouvi intake service.
//!
//! Exposes an axum [`Router`] over any
//! [`SubmissionStore`](ouvi_core::store::SubmissionStore) /
//! [`MediaStore`](ouvi_core::media::MediaStore) /
//! [`Classifier`](ouvi_core::classify::Classifier) trio. CORS, TLS, auth and
//! static serving of uploaded files are the caller's responsibility.

pub mod error;
pub mod media;
pub mod submissions;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use ouvi_core::{
  IntakeWorkflow, classify::Classifier, media::MediaStore, store::SubmissionStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use media::FsMediaStore;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised once at startup from
/// `config.toml` and `OUVI_*` environment variables. Passed by reference from
/// then on; there is no global settings singleton.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite database file.
  pub db_path:    PathBuf,
  /// Root directory for uploaded attachments.
  pub upload_dir: PathBuf,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, M, C> {
  pub workflow: Arc<IntakeWorkflow<S, M, C>>,
}

// Manual impl: the derive would demand Clone on S/M/C, which the Arc makes
// unnecessary.
impl<S, M, C> Clone for AppState<S, M, C> {
  fn clone(&self) -> Self {
    Self { workflow: Arc::clone(&self.workflow) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised router for the intake API.
pub fn router<S, M, C>(state: AppState<S, M, C>) -> Router
where
  S: SubmissionStore + Send + Sync + 'static,
  M: MediaStore + Send + Sync + 'static,
  C: Classifier + Send + Sync + 'static,
{
  Router::new()
    .route("/api/submissions", post(submissions::create::<S, M, C>))
    .route(
      "/api/submissions/{protocol}",
      get(submissions::get_one::<S, M, C>),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
