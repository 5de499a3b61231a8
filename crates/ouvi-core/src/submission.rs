//! Submission — one citizen complaint/report record.
//!
//! A submission is written exactly once per intake call and never mutated or
//! deleted by this core. Administrative tooling that edits records lives
//! outside this workspace.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  classify::Analysis,
  media::MediaKind,
};

/// Processing status of a submission.
///
/// Only `Received` is ever assigned by the intake path; further transitions
/// belong to administrative tooling outside this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
  #[default]
  Received,
}

/// The caller-supplied portion of a submission, before the workflow has
/// assigned a protocol or run classification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
  pub category:            String,
  pub subject:             String,
  pub body_text:           String,
  #[serde(default)]
  pub is_anonymous:        bool,

  pub citizen_name:        Option<String>,
  pub email:               Option<String>,
  pub phone:               Option<String>,
  pub tax_id:              Option<String>,

  pub occurrence_location: Option<String>,
  pub occurrence_date:     Option<NaiveDate>,
}

impl SubmissionInput {
  /// Reject inputs with missing required fields or a malformed email.
  ///
  /// Runs before any side effect in the workflow, so a rejected request
  /// leaves no protocol, no file, and no row behind.
  pub fn validate(&self) -> Result<()> {
    if self.category.trim().is_empty() {
      return Err(Error::MissingField("category"));
    }
    if self.subject.trim().is_empty() {
      return Err(Error::MissingField("subject"));
    }
    if self.body_text.trim().is_empty() {
      return Err(Error::MissingField("body_text"));
    }
    if let Some(email) = &self.email {
      // Intentionally shallow: one '@' with text on both sides. Anything
      // stricter belongs to a mail-delivery layer, not intake.
      let ok = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
      if !ok {
        return Err(Error::MalformedEmail(email.clone()));
      }
    }
    Ok(())
  }
}

/// A fully-assembled submission ready for persistence: input plus everything
/// the workflow computed. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewSubmission {
  pub protocol:    String,
  pub input:       SubmissionInput,
  pub media_path:  Option<String>,
  pub media_type:  Option<MediaKind>,
  pub status:      SubmissionStatus,
  pub ai_analysis: Option<Analysis>,
}

/// The persisted record, as returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
  pub id:                  i64,
  pub protocol:            String,
  pub category:            String,
  pub subject:             String,
  pub body_text:           String,
  pub is_anonymous:        bool,

  pub citizen_name:        Option<String>,
  pub email:               Option<String>,
  pub phone:               Option<String>,
  pub tax_id:              Option<String>,

  pub occurrence_location: Option<String>,
  pub occurrence_date:     Option<NaiveDate>,

  pub media_path:          Option<String>,
  pub media_type:          Option<MediaKind>,
  pub status:              SubmissionStatus,
  pub ai_analysis:         Option<Analysis>,
  pub created_at:          DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn valid_input() -> SubmissionInput {
    SubmissionInput {
      category: "Denuncia".into(),
      subject: "Saude".into(),
      body_text: "atendimento ruim".into(),
      ..Default::default()
    }
  }

  #[test]
  fn valid_input_passes() {
    assert!(valid_input().validate().is_ok());
  }

  #[test]
  fn blank_required_field_is_rejected() {
    let mut input = valid_input();
    input.subject = "   ".into();
    assert!(matches!(
      input.validate(),
      Err(Error::MissingField("subject"))
    ));
  }

  #[test]
  fn malformed_email_is_rejected() {
    let mut input = valid_input();
    input.email = Some("not-an-address".into());
    assert!(matches!(input.validate(), Err(Error::MalformedEmail(_))));
  }

  #[test]
  fn plausible_email_passes() {
    let mut input = valid_input();
    input.email = Some("ana@example.com".into());
    assert!(input.validate().is_ok());
  }
}
