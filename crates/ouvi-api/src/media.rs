//! Filesystem-backed attachment storage.

use std::path::PathBuf;

use ouvi_core::media::{Attachment, MediaKind, MediaStore, StoredMedia};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to write attachment {path:?}: {source}")]
pub struct FsMediaError {
  path:   PathBuf,
  source: std::io::Error,
}

/// Writes attachments under a configured upload root as
/// `{protocol}_{filename}`.
#[derive(Debug, Clone)]
pub struct FsMediaStore {
  root: PathBuf,
}

impl FsMediaStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }
}

impl MediaStore for FsMediaStore {
  type Error = FsMediaError;

  async fn store(
    &self,
    protocol: &str,
    attachment: &Attachment,
  ) -> Result<StoredMedia, FsMediaError> {
    // Keep only the final path component of the client-supplied name;
    // anything else would let the upload escape the root.
    let filename = std::path::Path::new(&attachment.filename)
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "attachment".to_owned());

    let path = self.root.join(format!("{protocol}_{filename}"));

    tokio::fs::create_dir_all(&self.root)
      .await
      .map_err(|source| FsMediaError { path: self.root.clone(), source })?;
    tokio::fs::write(&path, &attachment.bytes)
      .await
      .map_err(|source| FsMediaError { path: path.clone(), source })?;

    Ok(StoredMedia {
      path: path.to_string_lossy().into_owned(),
      kind: MediaKind::from_mime(attachment.content_type.as_deref()),
    })
  }
}

#[cfg(test)]
mod tests {
  use bytes::Bytes;

  use super::*;

  fn temp_root(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ouvi-media-{tag}-{}", std::process::id()))
  }

  #[tokio::test]
  async fn writes_bytes_under_protocol_prefixed_name() {
    let root = temp_root("write");
    let store = FsMediaStore::new(&root);

    let stored = store
      .store(
        "OUV-2026-ABC123",
        &Attachment {
          filename:     "foto.png".into(),
          content_type: Some("image/png".into()),
          bytes:        Bytes::from_static(b"\x89PNG"),
        },
      )
      .await
      .unwrap();

    assert_eq!(stored.kind, MediaKind::Image);
    assert!(stored.path.ends_with("OUV-2026-ABC123_foto.png"));
    let on_disk = tokio::fs::read(&stored.path).await.unwrap();
    assert_eq!(on_disk, b"\x89PNG");

    tokio::fs::remove_dir_all(&root).await.ok();
  }

  #[tokio::test]
  async fn strips_directory_components_from_filenames() {
    let root = temp_root("traversal");
    let store = FsMediaStore::new(&root);

    let stored = store
      .store(
        "OUV-2026-DEF456",
        &Attachment {
          filename:     "../../etc/passwd".into(),
          content_type: None,
          bytes:        Bytes::from_static(b"x"),
        },
      )
      .await
      .unwrap();

    assert!(stored.path.ends_with("OUV-2026-DEF456_passwd"));
    assert_eq!(stored.kind, MediaKind::File);

    tokio::fs::remove_dir_all(&root).await.ok();
  }
}
