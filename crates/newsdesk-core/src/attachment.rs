//! Attachment naming and public URL construction.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore as _};

/// Extension used when neither the file name nor the content type gives one.
pub const DEFAULT_EXTENSION: &str = "jpg";

const SUFFIX_BYTES: usize = 6;

/// An uploaded binary as received from the client.
#[derive(Debug, Clone, Default)]
pub struct Upload {
  pub file_name:    Option<String>,
  pub content_type: Option<String>,
  pub data:         Bytes,
}

impl Upload {
  pub fn is_empty(&self) -> bool { self.data.is_empty() }

  /// Lowercase extension for the stored key.
  ///
  /// Prefers the client file name, then the content type, then
  /// [`DEFAULT_EXTENSION`].
  pub fn extension(&self) -> String {
    self
      .file_name
      .as_deref()
      .and_then(extension_from_file_name)
      .or_else(|| {
        self.content_type.as_deref().and_then(extension_from_mime)
      })
      .unwrap_or(DEFAULT_EXTENSION)
      .to_ascii_lowercase()
  }
}

fn extension_from_file_name(name: &str) -> Option<&str> {
  let (_, ext) = name.rsplit_once('.')?;
  let plausible = (1..=5).contains(&ext.len())
    && ext.chars().all(|c| c.is_ascii_alphanumeric());
  plausible.then_some(ext)
}

fn extension_from_mime(mime: &str) -> Option<&'static str> {
  let essence = mime.split(';').next()?.trim();
  match essence.to_ascii_lowercase().as_str() {
    "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
    "image/png" => Some("png"),
    "image/gif" => Some("gif"),
    "image/webp" => Some("webp"),
    "image/avif" => Some("avif"),
    "image/svg+xml" => Some("svg"),
    _ => None,
  }
}

/// A collision-resistant storage key: `<unix-millis>-<random hex>.<ext>`.
pub fn attachment_key(now: DateTime<Utc>, extension: &str) -> String {
  let mut suffix = [0u8; SUFFIX_BYTES];
  OsRng.fill_bytes(&mut suffix);
  format!(
    "{}-{}.{extension}",
    now.timestamp_millis(),
    hex::encode(suffix)
  )
}

/// Build the public URL of `key` from the configured media base.
///
/// A `{key}` placeholder in `base` is substituted; otherwise the key is
/// appended after exactly one `/`.
pub fn public_url(base: &str, key: &str) -> String {
  if base.contains("{key}") {
    base.replace("{key}", key)
  } else {
    format!("{}/{key}", base.trim_end_matches('/'))
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn upload(file_name: Option<&str>, content_type: Option<&str>) -> Upload {
    Upload {
      file_name:    file_name.map(str::to_owned),
      content_type: content_type.map(str::to_owned),
      data:         Bytes::from_static(b"\xff\xd8\xff"),
    }
  }

  #[test]
  fn extension_prefers_file_name() {
    assert_eq!(upload(Some("Photo.PNG"), Some("image/jpeg")).extension(), "png");
  }

  #[test]
  fn extension_falls_back_to_mime_then_default() {
    assert_eq!(upload(None, Some("image/webp")).extension(), "webp");
    assert_eq!(upload(Some("blob"), Some("image/gif; x=1")).extension(), "gif");
    assert_eq!(upload(Some("a.tar.gz/../x"), None).extension(), "jpg");
    assert_eq!(upload(None, Some("application/octet-stream")).extension(), "jpg");
  }

  #[test]
  fn key_embeds_timestamp_suffix_and_extension() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let key = attachment_key(now, "jpg");
    let (stem, ext) = key.rsplit_once('.').unwrap();
    assert_eq!(ext, "jpg");
    let (millis, suffix) = stem.split_once('-').unwrap();
    assert_eq!(millis, "1700000000123");
    assert_eq!(suffix.len(), SUFFIX_BYTES * 2);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn keys_in_the_same_millisecond_differ() {
    let now = Utc::now();
    assert_ne!(attachment_key(now, "jpg"), attachment_key(now, "jpg"));
  }

  #[test]
  fn url_joins_or_templates() {
    assert_eq!(
      public_url("https://cdn.example.com/news/", "k.jpg"),
      "https://cdn.example.com/news/k.jpg"
    );
    assert_eq!(
      public_url("https://cdn.example.com", "k.jpg"),
      "https://cdn.example.com/k.jpg"
    );
    assert_eq!(
      public_url("https://img.example.com/{key}?v=1", "k.jpg"),
      "https://img.example.com/k.jpg?v=1"
    );
  }
}
