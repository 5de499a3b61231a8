//! Error type for `ouvi-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] ouvi_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The protocol column's UNIQUE constraint fired. With 36^6 random
  /// suffixes per year this is overwhelmingly a re-submission bug, not a
  /// genuine collision, but either way the row was not written.
  #[error("protocol already taken: {0}")]
  ProtocolTaken(String),

  #[error("row {0} not found after insert")]
  MissingRow(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
