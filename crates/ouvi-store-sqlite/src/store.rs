//! [`SqliteStore`] — the SQLite implementation of
//! [`SubmissionStore`](ouvi_core::store::SubmissionStore).

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use ouvi_core::{
  store::SubmissionStore,
  submission::{NewSubmission, Submission},
};

use crate::{
  Error, Result,
  encode::{
    RawSubmission, encode_analysis, encode_date, encode_dt, encode_media_kind,
    encode_status,
  },
  schema::SCHEMA,
};

/// Select list shared by every read; order must match
/// [`RawSubmission::from_row`].
const COLUMNS: &str = "id, protocol, category, subject, body_text, \
                       is_anonymous, citizen_name, email, phone, tax_id, \
                       occurrence_location, occurrence_date, media_path, \
                       media_type, status, ai_analysis, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A submission store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. SQLite's own
/// transactional isolation is the only concurrency control; the intake path
/// takes no locks of its own.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// This is the one explicit migration step in the system: call it once at
  /// process start, never from a request handler.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn get_by_id(&self, id: i64) -> Result<Option<Submission>> {
    let raw: Option<RawSubmission> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM submissions WHERE id = ?1"),
              rusqlite::params![id],
              RawSubmission::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }
}

/// True if the error is SQLite's UNIQUE-constraint failure.
fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn create(&self, new: NewSubmission) -> Result<Submission> {
    let created_at = Utc::now();

    let protocol        = new.protocol.clone();
    let category        = new.input.category;
    let subject         = new.input.subject;
    let body_text       = new.input.body_text;
    let is_anonymous    = new.input.is_anonymous;
    let citizen_name    = new.input.citizen_name;
    let email           = new.input.email;
    let phone           = new.input.phone;
    let tax_id          = new.input.tax_id;
    let location        = new.input.occurrence_location;
    let date_str        = new.input.occurrence_date.map(encode_date);
    let media_path      = new.media_path;
    let media_type_str  = new.media_type.map(encode_media_kind).map(str::to_owned);
    let status_str      = encode_status(new.status).to_owned();
    let analysis_str    = new.ai_analysis.as_ref().map(encode_analysis).transpose()?;
    let created_at_str  = encode_dt(created_at);

    let insert_protocol = protocol.clone();
    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO submissions (
             protocol, category, subject, body_text, is_anonymous,
             citizen_name, email, phone, tax_id,
             occurrence_location, occurrence_date,
             media_path, media_type, status, ai_analysis, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
          rusqlite::params![
            insert_protocol,
            category,
            subject,
            body_text,
            is_anonymous,
            citizen_name,
            email,
            phone,
            tax_id,
            location,
            date_str,
            media_path,
            media_type_str,
            status_str,
            analysis_str,
            created_at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          Error::ProtocolTaken(protocol.clone())
        } else {
          Error::Database(e)
        }
      })?;

    // Read the row back so the caller sees exactly what was persisted.
    self.get_by_id(id).await?.ok_or(Error::MissingRow(id))
  }

  async fn get_by_protocol(&self, protocol: &str) -> Result<Option<Submission>> {
    let protocol = protocol.to_owned();

    let raw: Option<RawSubmission> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM submissions WHERE protocol = ?1"),
              rusqlite::params![protocol],
              RawSubmission::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }
}
