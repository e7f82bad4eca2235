//! Integration tests for `SqliteStore` against an in-memory database.

use newsdesk_core::{news::NewNews, store::NewsStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn news(title: &str, date: &str) -> NewNews {
  NewNews {
    title:     title.into(),
    content:   format!("{title} body"),
    date:      date.into(),
    image_url: String::new(),
  }
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_increasing_ids() {
  let s = store().await;

  let a = s.insert(news("a", "2025-01-01")).await.unwrap();
  let b = s.insert(news("b", "2024-01-01")).await.unwrap();
  let c = s.insert(news("c", "2026-01-01")).await.unwrap();

  assert!(a.id < b.id);
  assert!(b.id < c.id);
}

#[tokio::test]
async fn insert_round_trips_text_exactly() {
  let s = store().await;
  let input = NewNews {
    title:     "強發金屬 — 新廠落成 'quoted' \"double\"".into(),
    content:   "line one\nline two\t; DROP TABLE news; --".into(),
    date:      "2025-02-14".into(),
    image_url: "https://cdn.example.com/1-abc.jpg".into(),
  };

  let stored = s.insert(input.clone()).await.unwrap();
  let listed = s.list_recent(20).await.unwrap();

  assert_eq!(listed, vec![stored.clone()]);
  assert_eq!(stored.title, input.title);
  assert_eq!(stored.content, input.content);
  assert_eq!(stored.date, input.date);
  assert_eq!(stored.image_url, input.image_url);
}

#[tokio::test]
async fn empty_title_violates_check_constraint() {
  let s = store().await;
  let result = s.insert(news("", "2025-01-01")).await;
  assert!(result.is_err());
  assert!(s.list_recent(20).await.unwrap().is_empty());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_orders_by_date_then_id_descending() {
  let s = store().await;
  let old = s.insert(news("old", "2024-12-31")).await.unwrap();
  let first_today = s.insert(news("first", "2025-01-02")).await.unwrap();
  let mid = s.insert(news("mid", "2025-01-01")).await.unwrap();
  let second_today = s.insert(news("second", "2025-01-02")).await.unwrap();

  let ids: Vec<i64> = s
    .list_recent(20)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.id)
    .collect();

  assert_eq!(ids, vec![second_today.id, first_today.id, mid.id, old.id]);
}

#[tokio::test]
async fn list_respects_limit() {
  let s = store().await;
  for i in 0..25 {
    s.insert(news(&format!("n{i}"), "2025-01-01")).await.unwrap();
  }

  let page = s.list_recent(20).await.unwrap();
  assert_eq!(page.len(), 20);
  assert_eq!(page[0].title, "n24");
  assert_eq!(page[19].title, "n5");

  assert_eq!(s.list_recent(6).await.unwrap().len(), 6);
  assert!(s.list_recent(0).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_empty_store() {
  let s = store().await;
  assert!(s.list_recent(20).await.unwrap().is_empty());
}

#[tokio::test]
async fn reopening_a_file_keeps_records() {
  let path = std::env::temp_dir().join(format!(
    "newsdesk-store-{}-{}.sqlite",
    std::process::id(),
    line!()
  ));
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert(news("kept", "2025-01-01")).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let next = s.insert(news("next", "2025-01-01")).await.unwrap();
  let listed = s.list_recent(20).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].id, next.id);
  assert_eq!(listed[1].title, "kept");

  drop(s);
  let _ = std::fs::remove_file(&path);
}
