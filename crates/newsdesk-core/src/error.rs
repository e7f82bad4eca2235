//! Error types for `newsdesk-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  #[error("invalid utc offset {0:?}")]
  InvalidOffset(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
