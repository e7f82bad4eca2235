//! `POST /api/news`: publish a record, optionally with an image.
//!
//! Gates run in order and each one is final:
//!
//! 1. origin policy (403), before the body is read
//! 2. body decoding and field validation (400)
//! 3. attachment upload, when a non-empty `image` part is present
//! 4. display date, supplied or today in the configured offset
//! 5. insert
//!
//! A blob written in step 3 is left in place if step 5 fails.

use axum::{
  extract::{FromRequest, Multipart, Request, State},
  http::{StatusCode, header},
  response::Response,
};
use bytes::Bytes;
use chrono::Utc;
use newsdesk_core::{
  attachment::{Upload, attachment_key, public_url},
  date::today,
  news::NewsDraft,
  store::{BlobStore, NewsStore},
};
use serde_json::json;

use crate::{
  AppState,
  error::{ApiError, MSG_BAD_BODY},
  handlers::json_response,
  policy::Verdict,
};

pub(crate) const MSG_PUBLISHED: &str = "發布成功";

/// A decoded publish request: text fields plus an optional file part.
#[derive(Debug, Default)]
pub struct Submission {
  pub draft: NewsDraft,
  pub image: Option<Upload>,
}

pub async fn handler<S, B>(
  State(state): State<AppState<S, B>>,
  request: Request,
) -> Result<Response, ApiError>
where
  S: NewsStore + 'static,
  B: BlobStore + 'static,
{
  let (parts, body) = request.into_parts();

  if let Verdict::Deny(reason) = state.policy.evaluate(&parts) {
    tracing::warn!(%reason, uri = %parts.uri, "publish denied by origin policy");
    return Err(ApiError::ForbiddenOrigin(reason));
  }

  let submission = read_submission(Request::from_parts(parts, body)).await?;
  let draft = submission.draft.validate().map_err(|e| {
    tracing::debug!(error = %e, "rejected publish submission");
    ApiError::from(e)
  })?;

  let image_url = match submission.image.filter(|u| !u.is_empty()) {
    Some(upload) => {
      let key = attachment_key(Utc::now(), &upload.extension());
      state
        .blobs
        .put(key.clone(), upload.data, upload.content_type)
        .await
        .map_err(|e| {
          tracing::error!(error = %e, %key, "failed to store attachment");
          ApiError::Attachment(Box::new(e))
        })?;
      public_url(&state.settings.media_base_url, &key)
    }
    None => String::new(),
  };

  let news = draft.into_new_news(today(&state.settings.utc_offset), image_url);

  let record = state.store.insert(news).await.map_err(|e| {
    tracing::error!(error = %e, "failed to insert news");
    ApiError::Store(Box::new(e))
  })?;

  tracing::info!(id = record.id, date = %record.date, "published news");
  Ok(json_response(StatusCode::OK, &json!({ "message": MSG_PUBLISHED })))
}

// ─── Body decoding ───────────────────────────────────────────────────────────

/// Decode a JSON or `multipart/form-data` body.
async fn read_submission(request: Request) -> Result<Submission, ApiError> {
  let is_multipart = request
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| {
      ct.trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
    });

  if is_multipart {
    let multipart = Multipart::from_request(request, &())
      .await
      .map_err(|r| rejected(r.status(), r.body_text()))?;
    read_multipart(multipart).await
  } else {
    // Any other content type is read as JSON: browsers posting a bare
    // `JSON.stringify` body send `text/plain`.
    let body = Bytes::from_request(request, &())
      .await
      .map_err(|r| rejected(r.status(), r.body_text()))?;
    let draft: NewsDraft = serde_json::from_slice(&body)
      .map_err(|e| rejected(StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Submission { draft, image: None })
  }
}

async fn read_multipart(mut multipart: Multipart) -> Result<Submission, ApiError> {
  let mut submission = Submission::default();

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| rejected(e.status(), e.body_text()))?
  {
    let name = field.name().unwrap_or_default().to_owned();
    match name.as_str() {
      "title" | "content" | "date" => {
        let text = field
          .text()
          .await
          .map_err(|e| rejected(e.status(), e.body_text()))?;
        let slot = match name.as_str() {
          "title" => &mut submission.draft.title,
          "content" => &mut submission.draft.content,
          _ => &mut submission.draft.date,
        };
        *slot = Some(text);
      }
      "image" => {
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field
          .bytes()
          .await
          .map_err(|e| rejected(e.status(), e.body_text()))?;
        submission.image = Some(Upload {
          file_name,
          content_type,
          data,
        });
      }
      other => tracing::debug!(field = other, "ignoring unknown form field"),
    }
  }

  Ok(submission)
}

fn rejected(status: StatusCode, detail: String) -> ApiError {
  tracing::debug!(%status, %detail, "undecodable publish body");
  if status == StatusCode::PAYLOAD_TOO_LARGE {
    ApiError::BodyTooLarge
  } else {
    ApiError::Validation(MSG_BAD_BODY.to_owned())
  }
}
