//! Handlers for `/api/submissions`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/submissions` | Multipart form, optional `attachment` part |
//! | `GET`  | `/api/submissions/:protocol` | 404 if unknown |

use axum::{
  Json,
  extract::{Multipart, Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use ouvi_core::{
  classify::Classifier,
  media::{Attachment, MediaStore},
  store::SubmissionStore,
  submission::{Submission, SubmissionInput},
};

use crate::{AppState, error::ApiError};

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /api/submissions` — multipart form fields per [`SubmissionInput`],
/// plus an optional `attachment` file part.
pub async fn create<S, M, C>(
  State(state): State<AppState<S, M, C>>,
  multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore,
  M: MediaStore,
  C: Classifier,
{
  let (input, attachment) = parse_form(multipart).await?;
  let submission = state.workflow.submit(input, attachment).await?;
  Ok((StatusCode::CREATED, Json(submission)))
}

/// Fold the multipart fields into a [`SubmissionInput`] and an optional
/// attachment. Unknown fields are ignored; empty text fields count as absent.
async fn parse_form(
  mut multipart: Multipart,
) -> Result<(SubmissionInput, Option<Attachment>), ApiError> {
  let mut input = SubmissionInput::default();
  let mut attachment = None;

  while let Some(field) = multipart.next_field().await? {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };

    if name == "attachment" {
      // Capture metadata before `bytes()` consumes the field.
      let filename = field
        .file_name()
        .map(str::to_owned)
        .unwrap_or_else(|| "attachment".to_owned());
      let content_type = field.content_type().map(str::to_owned);
      let bytes = field.bytes().await?;
      attachment = Some(Attachment { filename, content_type, bytes });
      continue;
    }

    let value = field.text().await?;
    match name.as_str() {
      "category" => input.category = value,
      "subject" => input.subject = value,
      "body_text" => input.body_text = value,
      "is_anonymous" => input.is_anonymous = parse_bool(&value),
      "citizen_name" => input.citizen_name = non_empty(value),
      "email" => input.email = non_empty(value),
      "phone" => input.phone = non_empty(value),
      "tax_id" => input.tax_id = non_empty(value),
      "occurrence_location" => input.occurrence_location = non_empty(value),
      "occurrence_date" => {
        input.occurrence_date = match non_empty(value) {
          Some(raw) => Some(parse_date(&raw)?),
          None => None,
        }
      }
      _ => {}
    }
  }

  Ok((input, attachment))
}

fn non_empty(value: String) -> Option<String> {
  if value.trim().is_empty() { None } else { Some(value) }
}

fn parse_bool(value: &str) -> bool {
  matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on")
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map_err(|_| ApiError::BadRequest(format!("malformed occurrence_date: {raw:?}")))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /api/submissions/:protocol`
pub async fn get_one<S, M, C>(
  State(state): State<AppState<S, M, C>>,
  Path(protocol): Path<String>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore,
  M: MediaStore,
  C: Classifier,
{
  let submission = state
    .workflow
    .store()
    .get_by_protocol(&protocol)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("submission {protocol} not found")))?;
  Ok(Json(submission))
}
