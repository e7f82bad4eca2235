//! `GET /api/news`: the public list of recent records.

use axum::{
  extract::State,
  http::StatusCode,
  response::Response,
};
use newsdesk_core::store::{BlobStore, NewsStore};

use crate::{AppState, error::ApiError, handlers::json_response};

/// Newest first: `date` descending, then `id` descending.
pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
) -> Result<Response, ApiError>
where
  S: NewsStore + 'static,
  B: BlobStore + 'static,
{
  let records = state
    .store
    .list_recent(state.settings.list_limit)
    .await
    .map_err(|e| {
      tracing::error!(error = %e, "failed to list news");
      ApiError::ReadFailed(Box::new(e))
    })?;

  Ok(json_response(StatusCode::OK, &records))
}
