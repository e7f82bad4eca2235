//! HTTP layer for newsdesk.
//!
//! Exposes an axum [`Router`] serving `/api/news` backed by any
//! [`NewsStore`] and [`BlobStore`], gated by an [`OriginPolicy`].

pub mod error;
pub mod handlers;
pub mod policy;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use chrono::FixedOffset;
use newsdesk_core::{
  date::{DEFAULT_UTC_OFFSET, parse_offset},
  store::{BlobStore, NewsStore},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{list, preflight, publish};
use policy::{AllOf, CanonicalHost, OriginPolicy, PublishKey};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `NEWSDESK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  pub store_path:       PathBuf,
  /// The only hostname allowed to publish.
  pub canonical_host:   String,
  /// Directory backing the filesystem blob store.
  pub media_dir:        PathBuf,
  /// Public base URL of stored attachments; may contain a `{key}` placeholder.
  pub media_base_url:   String,
  #[serde(default = "default_list_limit")]
  pub list_limit:       usize,
  #[serde(default = "default_utc_offset")]
  pub utc_offset:       String,
  #[serde(default = "default_max_upload_bytes")]
  pub max_upload_bytes: usize,
  /// Optional argon2 PHC hash; when set, publishing also needs
  /// `Authorization: Bearer <key>`.
  pub publish_key_hash: Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8787 }
fn default_list_limit() -> usize { 20 }
fn default_utc_offset() -> String { DEFAULT_UTC_OFFSET.to_string() }
fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }

impl ServerConfig {
  /// Handler-facing settings derived from this configuration.
  pub fn settings(&self) -> newsdesk_core::Result<NewsSettings> {
    Ok(NewsSettings {
      list_limit:       self.list_limit,
      utc_offset:       parse_offset(&self.utc_offset)?,
      media_base_url:   self.media_base_url.clone(),
      max_upload_bytes: self.max_upload_bytes,
    })
  }

  /// The canonical-host check, plus the publish key when one is configured.
  pub fn origin_policy(&self) -> Arc<dyn OriginPolicy> {
    let host = CanonicalHost::new(self.canonical_host.clone());
    match &self.publish_key_hash {
      Some(hash) => Arc::new(AllOf(vec![
        Box::new(host),
        Box::new(PublishKey::new(hash.clone())),
      ])),
      None => Arc::new(host),
    }
  }
}

/// Settings read by the handlers on every request.
#[derive(Debug, Clone)]
pub struct NewsSettings {
  pub list_limit:       usize,
  pub utc_offset:       FixedOffset,
  pub media_base_url:   String,
  pub max_upload_bytes: usize,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, B> {
  pub store:    Arc<S>,
  pub blobs:    Arc<B>,
  pub policy:   Arc<dyn OriginPolicy>,
  pub settings: Arc<NewsSettings>,
}

impl<S, B> Clone for AppState<S, B> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      blobs:    Arc::clone(&self.blobs),
      policy:   Arc::clone(&self.policy),
      settings: Arc::clone(&self.settings),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the news API.
pub fn router<S, B>(state: AppState<S, B>) -> Router
where
  S: NewsStore + 'static,
  B: BlobStore + 'static,
{
  let body_limit = state.settings.max_upload_bytes;
  Router::new()
    .route(
      "/api/news",
      get(list::handler::<S, B>)
        .post(publish::handler::<S, B>)
        .options(preflight::handler),
    )
    .layer(DefaultBodyLimit::max(body_limit))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
