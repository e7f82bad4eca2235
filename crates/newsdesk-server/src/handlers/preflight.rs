//! OPTIONS handler: answers CORS preflight checks.

use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};

pub async fn handler() -> Response {
  (
    StatusCode::OK,
    [
      (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
      (
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
      ),
      (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
      ),
    ],
  )
    .into_response()
}
