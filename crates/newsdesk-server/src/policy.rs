//! Origin policies gating the publish endpoint.
//!
//! A policy looks at the request head and returns a [`Verdict`]. Handlers only
//! see the verdict, so a stronger mechanism can replace the hostname check
//! without touching publishing logic.
//!
//! [`CanonicalHost`] compares a client-supplied value (the `Host` header or
//! the URI authority). It keeps the service from being used through a
//! hosting provider's default alias; it does not authenticate anyone, since a
//! client talking to the origin directly can send any `Host` it likes. Pair it
//! with [`PublishKey`] when publishing must be restricted to key holders.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::http::{header, request::Parts};

/// Outcome of evaluating an [`OriginPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
  Allow,
  /// Denied, with a reason for the server log. Never sent to the client.
  Deny(String),
}

impl Verdict {
  pub fn is_allowed(&self) -> bool { matches!(self, Verdict::Allow) }
}

/// Given a request head, decide whether it may publish.
pub trait OriginPolicy: Send + Sync {
  fn evaluate(&self, request: &Parts) -> Verdict;
}

// ─── Canonical host ──────────────────────────────────────────────────────────

/// Allow only requests addressed to one exact hostname.
#[derive(Debug, Clone)]
pub struct CanonicalHost {
  host: String,
}

impl CanonicalHost {
  pub fn new(host: impl Into<String>) -> Self {
    Self {
      host: host.into().trim().to_ascii_lowercase(),
    }
  }

  pub fn host(&self) -> &str { &self.host }
}

impl OriginPolicy for CanonicalHost {
  fn evaluate(&self, request: &Parts) -> Verdict {
    match request_hostname(request) {
      Some(host) if host == self.host => Verdict::Allow,
      Some(host) => Verdict::Deny(format!("hostname {host:?} is not canonical")),
      None => Verdict::Deny("request carries no hostname".into()),
    }
  }
}

/// The hostname a request was addressed to, lowercased and without port.
///
/// Uses the URI authority when present (absolute-form or HTTP/2
/// `:authority`), otherwise the `Host` header.
pub fn request_hostname(request: &Parts) -> Option<String> {
  if let Some(host) = request.uri.host() {
    return Some(host.to_ascii_lowercase());
  }
  let raw = request.headers.get(header::HOST)?.to_str().ok()?.trim();
  let host = if raw.starts_with('[') {
    // IPv6 literal: keep the brackets, drop any trailing `:port`.
    &raw[..=raw.find(']')?]
  } else {
    raw.split(':').next()?
  };
  (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

// ─── Publish key ─────────────────────────────────────────────────────────────

/// Allow only requests carrying `Authorization: Bearer <key>` whose key
/// verifies against an argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct PublishKey {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  key_hash: String,
}

impl PublishKey {
  pub fn new(key_hash: impl Into<String>) -> Self {
    Self {
      key_hash: key_hash.into(),
    }
  }
}

impl OriginPolicy for PublishKey {
  fn evaluate(&self, request: &Parts) -> Verdict {
    let Some(key) = request
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.strip_prefix("Bearer "))
    else {
      return Verdict::Deny("missing bearer publish key".into());
    };

    let Ok(parsed) = PasswordHash::new(&self.key_hash) else {
      return Verdict::Deny("configured publish key hash is malformed".into());
    };

    match Argon2::default().verify_password(key.trim().as_bytes(), &parsed) {
      Ok(()) => Verdict::Allow,
      Err(_) => Verdict::Deny("publish key rejected".into()),
    }
  }
}

// ─── Combinator ──────────────────────────────────────────────────────────────

/// Allow only if every inner policy allows; the first denial wins.
pub struct AllOf(pub Vec<Box<dyn OriginPolicy>>);

impl OriginPolicy for AllOf {
  fn evaluate(&self, request: &Parts) -> Verdict {
    self
      .0
      .iter()
      .map(|p| p.evaluate(request))
      .find(|v| !v.is_allowed())
      .unwrap_or(Verdict::Allow)
  }
}
