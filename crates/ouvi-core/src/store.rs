//! The `SubmissionStore` trait.
//!
//! Implemented by storage backends (e.g. `ouvi-store-sqlite`). The intake
//! workflow and the HTTP layer depend on this abstraction, not on any
//! concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::submission::{NewSubmission, Submission};

pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new submission and return the stored record.
  ///
  /// The store assigns `id` and `created_at`; everything else is taken from
  /// `new` verbatim. The backend must enforce protocol uniqueness — a
  /// duplicate protocol is an error, never an overwrite.
  fn create(
    &self,
    new: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Look up a submission by its tracking code. Returns `None` if unknown.
  fn get_by_protocol<'a>(
    &'a self,
    protocol: &'a str,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + 'a;
}
