//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, dates as ISO 8601 strings,
//! enums as their lowercase/SCREAMING discriminants, and the analysis blob as
//! compact JSON.

use chrono::{DateTime, NaiveDate, Utc};
use ouvi_core::{
  classify::Analysis,
  media::MediaKind,
  submission::{Submission, SubmissionStatus},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

// ─── SubmissionStatus ────────────────────────────────────────────────────────

pub fn encode_status(s: SubmissionStatus) -> &'static str {
  match s {
    SubmissionStatus::Received => "RECEIVED",
  }
}

pub fn decode_status(s: &str) -> Result<SubmissionStatus> {
  match s {
    "RECEIVED" => Ok(SubmissionStatus::Received),
    other => Err(Error::Core(ouvi_core::Error::UnknownStatus(other.to_owned()))),
  }
}

// ─── MediaKind ───────────────────────────────────────────────────────────────

pub fn encode_media_kind(k: MediaKind) -> &'static str { k.as_str() }

pub fn decode_media_kind(s: &str) -> Result<MediaKind> {
  match s {
    "audio" => Ok(MediaKind::Audio),
    "video" => Ok(MediaKind::Video),
    "image" => Ok(MediaKind::Image),
    "file" => Ok(MediaKind::File),
    other => {
      Err(Error::Core(ouvi_core::Error::UnknownMediaKind(other.to_owned())))
    }
  }
}

// ─── Analysis ────────────────────────────────────────────────────────────────

pub fn encode_analysis(a: &Analysis) -> Result<String> {
  Ok(serde_json::to_string(a)?)
}

pub fn decode_analysis(s: &str) -> Result<Analysis> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

/// One `submissions` row as it comes off rusqlite, before any domain-type
/// decoding has happened.
pub struct RawSubmission {
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
  pub occurrence_date:     Option<String>,
  pub media_path:          Option<String>,
  pub media_type:          Option<String>,
  pub status:              String,
  pub ai_analysis:         Option<String>,
  pub created_at:          String,
}

impl RawSubmission {
  /// Read all seventeen columns, in the order `store::COLUMNS` selects them.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawSubmission {
      id:                  row.get(0)?,
      protocol:            row.get(1)?,
      category:            row.get(2)?,
      subject:             row.get(3)?,
      body_text:           row.get(4)?,
      is_anonymous:        row.get(5)?,
      citizen_name:        row.get(6)?,
      email:               row.get(7)?,
      phone:               row.get(8)?,
      tax_id:              row.get(9)?,
      occurrence_location: row.get(10)?,
      occurrence_date:     row.get(11)?,
      media_path:          row.get(12)?,
      media_type:          row.get(13)?,
      status:              row.get(14)?,
      ai_analysis:         row.get(15)?,
      created_at:          row.get(16)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:                  self.id,
      protocol:            self.protocol,
      category:            self.category,
      subject:             self.subject,
      body_text:           self.body_text,
      is_anonymous:        self.is_anonymous,
      citizen_name:        self.citizen_name,
      email:               self.email,
      phone:               self.phone,
      tax_id:              self.tax_id,
      occurrence_location: self.occurrence_location,
      occurrence_date:     self
        .occurrence_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      media_path:          self.media_path,
      media_type:          self
        .media_type
        .as_deref()
        .map(decode_media_kind)
        .transpose()?,
      status:              decode_status(&self.status)?,
      ai_analysis:         self
        .ai_analysis
        .as_deref()
        .map(decode_analysis)
        .transpose()?,
      created_at:          decode_dt(&self.created_at)?,
    })
  }
}
