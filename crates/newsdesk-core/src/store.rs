//! The `NewsStore` and `BlobStore` traits.
//!
//! Storage backends implement these (e.g. `newsdesk-store-sqlite`,
//! `newsdesk-blob-fs`). The HTTP layer depends only on the traits, so tests
//! can substitute in-memory fakes.

use std::future::Future;

use bytes::Bytes;

use crate::news::{NewNews, NewsRecord};

/// Append-only persistence for news records.
///
/// Records are never updated or deleted through this trait.
pub trait NewsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a record and return it with its store-assigned `id`.
  ///
  /// Ids are strictly increasing and never reused.
  fn insert(
    &self,
    news: NewNews,
  ) -> impl Future<Output = Result<NewsRecord, Self::Error>> + Send + '_;

  /// Return at most `limit` records ordered by `date` descending, then `id`
  /// descending.
  fn list_recent(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<NewsRecord>, Self::Error>> + Send + '_;
}

/// Write-only binary storage for attachments.
pub trait BlobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store `data` under `key`. Keys are unique per upload.
  fn put(
    &self,
    key: String,
    data: Bytes,
    content_type: Option<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
