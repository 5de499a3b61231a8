//! Error types for `ouvi-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("malformed email address: {0:?}")]
  MalformedEmail(String),

  #[error("unknown media kind discriminant: {0:?}")]
  UnknownMediaKind(String),

  #[error("unknown submission status: {0:?}")]
  UnknownStatus(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
