//! SQL schema for the newsdesk SQLite store.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// `AUTOINCREMENT` guarantees ids are never reused, even after the highest
/// row is removed by hand.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Append-only: the service never issues UPDATE or DELETE against this table.
CREATE TABLE IF NOT EXISTS news (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    title      TEXT NOT NULL CHECK (title   <> ''),
    content    TEXT NOT NULL CHECK (content <> ''),
    date       TEXT NOT NULL,            -- YYYY-MM-DD
    image_url  TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS news_display_idx ON news(date DESC, id DESC);

PRAGMA user_version = 1;
";
