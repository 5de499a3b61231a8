//! The intake workflow — the one orchestration path in the system.
//!
//! Order matters and each step may fail independently:
//!
//! 1. validate input (no side effects yet)
//! 2. generate protocol (infallible)
//! 3. persist attachment, if any (failure aborts before any DB write)
//! 4. classify body text (failure degrades to a neutral placeholder)
//! 5. redact identity fields when anonymous (in memory, before persistence)
//! 6. persist the record (failure leaves any written attachment orphaned)
//!
//! No step is retried; every step runs at most once per call.

use thiserror::Error;

use crate::{
  classify::{Analysis, Classifier},
  media::{Attachment, MediaStore},
  protocol::generate_protocol,
  store::SubmissionStore,
  submission::{NewSubmission, Submission, SubmissionInput, SubmissionStatus},
};

/// Why an intake call was refused. Maps onto the transport layer's response
/// taxonomy: `Validation` is the caller's fault, the rest are server-side.
#[derive(Debug, Error)]
pub enum IntakeError {
  #[error("invalid submission: {0}")]
  Validation(#[from] crate::Error),

  #[error("attachment storage failed: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("submission could not be persisted: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Orchestrates one submission from raw input to persisted record.
///
/// Generic over its three collaborators so the HTTP layer wires in the real
/// backends and tests wire in doubles. Holds no mutable state; concurrent
/// calls share nothing but the collaborators themselves.
#[derive(Debug, Clone)]
pub struct IntakeWorkflow<S, M, C> {
  store:      S,
  media:      M,
  classifier: C,
}

impl<S, M, C> IntakeWorkflow<S, M, C>
where
  S: SubmissionStore,
  M: MediaStore,
  C: Classifier,
{
  pub fn new(store: S, media: M, classifier: C) -> Self {
    Self { store, media, classifier }
  }

  /// The underlying store, for read paths that bypass the workflow.
  pub fn store(&self) -> &S {
    &self.store
  }

  /// Run one intake call end to end.
  pub async fn submit(
    &self,
    mut input: SubmissionInput,
    attachment: Option<Attachment>,
  ) -> Result<Submission, IntakeError> {
    input.validate()?;

    let protocol = generate_protocol();

    let stored_media = match &attachment {
      Some(att) => Some(
        self
          .media
          .store(&protocol, att)
          .await
          .map_err(|e| IntakeError::Storage(Box::new(e)))?,
      ),
      None => None,
    };

    let analysis = match self.classifier.classify(&input.body_text).await {
      Ok(analysis) => analysis,
      Err(e) => {
        // A classifier outage must never cost us the submission itself.
        tracing::warn!(
          %protocol,
          error = %e,
          "classifier failed; storing neutral placeholder analysis"
        );
        Analysis::neutral_placeholder("degraded")
      }
    };

    if input.is_anonymous {
      input.citizen_name = None;
      input.email = None;
      input.phone = None;
      input.tax_id = None;
    }

    let (media_path, media_type) = match stored_media {
      Some(m) => (Some(m.path), Some(m.kind)),
      None => (None, None),
    };

    let new = NewSubmission {
      protocol: protocol.clone(),
      input,
      media_path: media_path.clone(),
      media_type,
      status: SubmissionStatus::Received,
      ai_analysis: Some(analysis),
    };

    let submission = self.store.create(new).await.map_err(|e| {
      if let Some(path) = &media_path {
        // No compensating deletion in current scope; leave a trail for
        // operators to sweep the orphan.
        tracing::warn!(%protocol, %path, "persistence failed; attachment orphaned");
      }
      IntakeError::Persistence(Box::new(e))
    })?;

    tracing::info!(
      protocol = %submission.protocol,
      id = submission.id,
      "submission received"
    );
    Ok(submission)
  }
}
