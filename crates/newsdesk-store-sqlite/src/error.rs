//! Error type for `newsdesk-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("row limit {0} does not fit in an sqlite integer")]
  LimitOutOfRange(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
