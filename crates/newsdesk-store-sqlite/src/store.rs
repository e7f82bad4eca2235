//! [`SqliteStore`]: the SQLite implementation of [`NewsStore`].

use std::path::Path;

use newsdesk_core::{
  news::{NewNews, NewsRecord},
  store::NewsStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A news store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
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
    tracing::debug!("news schema ready");
    Ok(())
  }
}

fn read_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<NewsRecord> {
  Ok(NewsRecord {
    id:        row.get(0)?,
    title:     row.get(1)?,
    content:   row.get(2)?,
    date:      row.get(3)?,
    image_url: row.get(4)?,
  })
}

// ─── NewsStore impl ──────────────────────────────────────────────────────────

impl NewsStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, news: NewNews) -> Result<NewsRecord> {
    let NewNews {
      title,
      content,
      date,
      image_url,
    } = news;

    let record = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO news (title, content, date, image_url)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![title, content, date, image_url],
        )?;
        Ok(NewsRecord {
          id: conn.last_insert_rowid(),
          title,
          content,
          date,
          image_url,
        })
      })
      .await?;

    Ok(record)
  }

  async fn list_recent(&self, limit: usize) -> Result<Vec<NewsRecord>> {
    let limit = i64::try_from(limit).map_err(|_| Error::LimitOutOfRange(limit))?;

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "SELECT id, title, content, date, image_url
           FROM news
           ORDER BY date DESC, id DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit], read_record)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(records)
  }
}
