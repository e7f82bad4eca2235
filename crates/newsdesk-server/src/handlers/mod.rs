pub mod list;
pub mod preflight;
pub mod publish;

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Serialize;

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

/// Serialise `body` with the JSON content type and a permissive CORS origin.
pub(crate) fn json_response(status: StatusCode, body: &impl Serialize) -> Response {
  match serde_json::to_vec(body) {
    Ok(bytes) => (
      status,
      [
        (header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON)),
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
      ],
      bytes,
    )
      .into_response(),
    Err(e) => {
      tracing::error!(error = %e, "failed to serialise response body");
      StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
  }
}
