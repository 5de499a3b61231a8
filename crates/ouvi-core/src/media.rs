//! Attachments and their coarse media classification.

use std::future::Future;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Coarse attachment classification derived from the declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
  Audio,
  Video,
  Image,
  File,
}

impl MediaKind {
  /// Classify by MIME type prefix. An attachment with no declared type is
  /// still a `File`: `media_path` and `media_type` are always set together.
  pub fn from_mime(content_type: Option<&str>) -> Self {
    match content_type {
      Some(ct) if ct.starts_with("audio/") => MediaKind::Audio,
      Some(ct) if ct.starts_with("video/") => MediaKind::Video,
      Some(ct) if ct.starts_with("image/") => MediaKind::Image,
      _ => MediaKind::File,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      MediaKind::Audio => "audio",
      MediaKind::Video => "video",
      MediaKind::Image => "image",
      MediaKind::File => "file",
    }
  }
}

/// An uploaded file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct Attachment {
  pub filename:     String,
  pub content_type: Option<String>,
  pub bytes:        Bytes,
}

/// Where and what a persisted attachment ended up as.
#[derive(Debug, Clone)]
pub struct StoredMedia {
  pub path: String,
  pub kind: MediaKind,
}

/// Abstraction over durable attachment storage.
///
/// Implemented by `FsMediaStore` in the API crate; the workflow depends only
/// on this trait so tests can substitute an in-memory double.
pub trait MediaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist the attachment under a name derived from
  /// `{protocol}_{filename}`. The protocol prefix keeps concurrent
  /// submissions from colliding on filename alone.
  fn store<'a>(
    &'a self,
    protocol: &'a str,
    attachment: &'a Attachment,
  ) -> impl Future<Output = Result<StoredMedia, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mime_prefixes_map_to_kinds() {
    assert_eq!(MediaKind::from_mime(Some("audio/ogg")), MediaKind::Audio);
    assert_eq!(MediaKind::from_mime(Some("video/mp4")), MediaKind::Video);
    assert_eq!(MediaKind::from_mime(Some("image/png")), MediaKind::Image);
    assert_eq!(
      MediaKind::from_mime(Some("application/pdf")),
      MediaKind::File
    );
  }

  #[test]
  fn missing_mime_is_a_plain_file() {
    assert_eq!(MediaKind::from_mime(None), MediaKind::File);
  }
}
