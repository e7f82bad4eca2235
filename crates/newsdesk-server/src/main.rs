//! newsdesk server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `NEWSDESK_*` environment variables, opens the SQLite store and the media
//! directory, and serves `/api/news` over HTTP.
//!
//! # Publish key hash generation
//!
//! To generate the argon2 PHC string for `publish_key_hash`:
//!
//! ```
//! cargo run -p newsdesk-server -- --hash-key
//! ```

use std::{
  io::{BufRead, Write},
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use newsdesk_blob_fs::FsBlobStore;
use newsdesk_server::{AppState, ServerConfig};
use newsdesk_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "News publishing API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a publish key read from stdin and exit.
  #[arg(long)]
  hash_key: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.hash_key {
    let stdin = std::io::stdin();
    return hash_key(stdin.lock(), std::io::stderr(), std::io::stdout());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("NEWSDESK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let media_dir = expand_tilde(&server_cfg.media_dir);
  let blobs = FsBlobStore::open(&media_dir)
    .await
    .with_context(|| format!("failed to open media directory {media_dir:?}"))?;

  let news_settings = server_cfg
    .settings()
    .context("invalid news settings")?;

  let state = AppState {
    store:    Arc::new(store),
    blobs:    Arc::new(blobs),
    policy:   server_cfg.origin_policy(),
    settings: Arc::new(news_settings),
  };

  if server_cfg.publish_key_hash.is_none() {
    tracing::warn!(
      canonical_host = %server_cfg.canonical_host,
      "publishing is gated by hostname only; the Host header is client-controlled"
    );
  }

  let app = newsdesk_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a key line from `input` and write its argon2 PHC string to `out`.
///
/// The prompt goes to `prompt`, so `out` carries nothing but the hash.
fn hash_key(
  mut input:  impl BufRead,
  mut prompt: impl Write,
  mut out:    impl Write,
) -> anyhow::Result<()> {
  write!(prompt, "Publish key: ")?;
  prompt.flush().ok();

  let mut line = String::new();
  input.read_line(&mut line)?;
  let key = line.trim_end_matches(['\r', '\n']);

  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(key.as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
    .to_string();
  writeln!(out, "{hash}")?;
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHash, PasswordVerifier};

  use super::*;

  #[test]
  fn hash_key_writes_only_the_phc_string() {
    let mut prompt = Vec::new();
    let mut out = Vec::new();
    hash_key(&b"s3cret\n"[..], &mut prompt, &mut out).unwrap();

    assert_eq!(String::from_utf8(prompt).unwrap(), "Publish key: ");

    let out = String::from_utf8(out).unwrap();
    let phc = out.strip_suffix('\n').unwrap();
    assert!(phc.starts_with("$argon2"), "{out}");
    let parsed = PasswordHash::new(phc).unwrap();
    assert!(Argon2::default().verify_password(b"s3cret", &parsed).is_ok());
  }
}
