//! Filesystem backend for attachment storage.
//!
//! Each blob is a file named by its key inside a single directory. A CDN or
//! static file server in front of that directory provides the public URLs.

pub mod error;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use bytes::Bytes;
use newsdesk_core::store::BlobStore;

/// Attachment storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
  root: PathBuf,
}

impl FsBlobStore {
  /// Use `root` as the blob directory, creating it if needed.
  pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
    let root = root.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&root)
      .await
      .map_err(|source| Error::Io {
        path: root.clone(),
        source,
      })?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path { &self.root }

  fn path_for(&self, key: &str) -> Result<PathBuf> {
    let safe = !key.is_empty()
      && !key.starts_with('.')
      && !key.contains(['/', '\\', '\0'])
      && !key.contains("..");
    if safe {
      Ok(self.root.join(key))
    } else {
      Err(Error::InvalidKey(key.to_owned()))
    }
  }
}

impl BlobStore for FsBlobStore {
  type Error = Error;

  async fn put(
    &self,
    key: String,
    data: Bytes,
    _content_type: Option<String>,
  ) -> Result<()> {
    let path = self.path_for(&key)?;
    let tmp = self.root.join(format!(".{key}.part"));

    let io = |path: &Path| {
      let path = path.to_path_buf();
      move |source: std::io::Error| Error::Io { path, source }
    };

    tokio::fs::write(&tmp, &data).await.map_err(io(&tmp))?;
    tokio::fs::rename(&tmp, &path).await.map_err(io(&path))?;

    tracing::debug!(key = %key, bytes = data.len(), "stored attachment");
    Ok(())
  }
}
