//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::handlers::json_response;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub(crate) const MSG_MISSING_FIELDS: &str = "標題與內容不可為空";
pub(crate) const MSG_FORBIDDEN_ORIGIN: &str = "安全性錯誤：請由官方網域進入";
pub(crate) const MSG_READ_FAILED: &str = "資料讀取失敗";
pub(crate) const MSG_TOO_LARGE: &str = "上傳內容過大";
pub(crate) const MSG_INVALID_DATE: &str = "日期格式錯誤，應為 YYYY-MM-DD";
pub(crate) const MSG_BAD_BODY: &str = "請求內容格式錯誤";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing/empty fields or an undecodable body. Detected before any write.
  #[error("invalid submission: {0}")]
  Validation(String),

  /// The origin policy denied the request. Detected before any write.
  #[error("origin denied: {0}")]
  ForbiddenOrigin(String),

  #[error("request body exceeds the upload limit")]
  BodyTooLarge,

  /// Listing failed. The cause is logged but hidden from the client.
  #[error("read failed: {0}")]
  ReadFailed(#[source] BoxError),

  #[error("{0}")]
  Store(#[source] BoxError),

  #[error("{0}")]
  Attachment(#[source] BoxError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::ForbiddenOrigin(_) => StatusCode::FORBIDDEN,
      ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
      ApiError::ReadFailed(_) | ApiError::Store(_) | ApiError::Attachment(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl From<newsdesk_core::Error> for ApiError {
  fn from(e: newsdesk_core::Error) -> Self {
    match e {
      newsdesk_core::Error::MissingField(_) => {
        ApiError::Validation(MSG_MISSING_FIELDS.to_owned())
      }
      newsdesk_core::Error::InvalidDate(_)
      | newsdesk_core::Error::InvalidOffset(_) => {
        ApiError::Validation(MSG_INVALID_DATE.to_owned())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::Validation(m) => m.clone(),
      ApiError::ForbiddenOrigin(_) => MSG_FORBIDDEN_ORIGIN.to_owned(),
      ApiError::BodyTooLarge => MSG_TOO_LARGE.to_owned(),
      ApiError::ReadFailed(_) => MSG_READ_FAILED.to_owned(),
      ApiError::Store(e) | ApiError::Attachment(e) => format!("伺服器錯誤: {e}"),
    };
    json_response(status, &json!({ "error": message }))
  }
}
