//! Router tests against an in-memory [`PeopleStore`].

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicBool, AtomicUsize, Ordering},
};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use facepick_core::{
  column::PathColumn,
  page::PageWindow,
  person::PersonRecord,
  store::{PeopleStore, StoreFailure},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

// ─── Fake store ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
enum FakeError {
  #[error("connection is in closed state")]
  Disconnected,
  #[error("table people_images has no column named bogus")]
  Query,
}

impl StoreFailure for FakeError {
  fn is_disconnect(&self) -> bool { matches!(self, FakeError::Disconnected) }
}

#[derive(Default)]
struct MemoryStore {
  people:      Mutex<Vec<PersonRecord>>,
  /// Number of upcoming `list_page` calls that fail with a disconnect.
  disconnects: AtomicUsize,
  /// When set, every call fails with a query error.
  broken:      AtomicBool,
  reconnects:  AtomicUsize,
  writes:      AtomicUsize,
}

impl MemoryStore {
  fn with_people(n: i64) -> Self {
    let people = (1..=n)
      .map(|id| PersonRecord {
        id,
        name: Some(format!("Person {id}")),
        gib_2021_numbers_only: Some(format!("/2021/{id}.jpg")),
        ..Default::default()
      })
      .collect();
    Self { people: Mutex::new(people), ..Default::default() }
  }

  fn person(&self, id: i64) -> PersonRecord {
    self
      .people
      .lock()
      .unwrap()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .unwrap()
  }

  fn update(&self, id: i64, column: PathColumn, value: Option<String>) -> Result<bool, FakeError> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    if self.broken.load(Ordering::SeqCst) {
      return Err(FakeError::Query);
    }
    let mut people = self.people.lock().unwrap();
    match people.iter_mut().find(|p| p.id == id) {
      Some(person) => {
        person.set_path(column, value);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}

impl PeopleStore for MemoryStore {
  type Error = FakeError;

  async fn list_page(&self, window: PageWindow) -> Result<Vec<PersonRecord>, FakeError> {
    if self.broken.load(Ordering::SeqCst) {
      return Err(FakeError::Query);
    }
    let pending = self.disconnects.load(Ordering::SeqCst);
    if pending > 0 {
      self.disconnects.store(pending - 1, Ordering::SeqCst);
      return Err(FakeError::Disconnected);
    }
    let people = self.people.lock().unwrap();
    Ok(
      people
        .iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .cloned()
        .collect(),
    )
  }

  async fn count(&self) -> Result<u64, FakeError> {
    Ok(self.people.lock().unwrap().len() as u64)
  }

  async fn set_path(&self, id: i64, column: PathColumn, value: String) -> Result<bool, FakeError> {
    self.update(id, column, Some(value))
  }

  async fn clear_path(&self, id: i64, column: PathColumn) -> Result<bool, FakeError> {
    self.update(id, column, None)
  }

  async fn reconnect(&self) -> Result<(), FakeError> {
    self.reconnects.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

async fn send(store: &Arc<MemoryStore>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = api_router(store.clone())
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

fn ids(json: &Value) -> Vec<i64> {
  json
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["id"].as_i64().unwrap())
    .collect()
}

// ── GET /people ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_defaults_to_first_hundred() {
  let store = Arc::new(MemoryStore::with_people(250));
  let (status, json) = send(&store, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&json), (1..=100).collect::<Vec<_>>());
}

#[tokio::test]
async fn list_returns_requested_window() {
  let store = Arc::new(MemoryStore::with_people(250));
  let (_, json) = send(&store, "GET", "/people?page=3&limit=100", None).await;
  assert_eq!(ids(&json), (201..=250).collect::<Vec<_>>());

  let (_, json) = send(&store, "GET", "/people?page=2&limit=10", None).await;
  assert_eq!(ids(&json), (11..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn list_ignores_unparsable_params() {
  let store = Arc::new(MemoryStore::with_people(150));
  let (status, json) = send(&store, "GET", "/people?page=abc&limit=0", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&json).len(), 100);
  assert_eq!(ids(&json)[0], 1);
}

#[tokio::test]
async fn list_past_the_end_is_empty() {
  let store = Arc::new(MemoryStore::with_people(10));
  let (status, json) = send(&store, "GET", "/people?page=5", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!([]));
}

#[tokio::test]
async fn list_serializes_every_field() {
  let store = Arc::new(MemoryStore::with_people(1));
  let (_, json) = send(&store, "GET", "/people", None).await;
  let person = &json[0];
  for field in [
    "id",
    "name",
    "birth_date",
    "death_date",
    "gib_2021_numbers_only",
    "old_pics_2020_numbers_only",
    "pics_stop_numbers_only",
    "good_pics",
  ] {
    assert!(person.get(field).is_some(), "missing {field}: {person}");
  }
  assert!(person["good_pics"].is_null());
}

#[tokio::test]
async fn list_reconnects_once_after_disconnect() {
  let store = Arc::new(MemoryStore::with_people(5));
  store.disconnects.store(1, Ordering::SeqCst);

  let (status, json) = send(&store, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&json).len(), 5);
  assert_eq!(store.reconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn list_fails_when_retry_also_disconnects() {
  let store = Arc::new(MemoryStore::with_people(5));
  store.disconnects.store(2, Ordering::SeqCst);

  let (status, json) = send(&store, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json, json!({ "error": "connection is in closed state" }));
  assert_eq!(store.reconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn list_query_failure_is_not_retried() {
  let store = Arc::new(MemoryStore::with_people(5));
  store.broken.store(true, Ordering::SeqCst);

  let (status, json) = send(&store, "GET", "/people", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert!(json["error"].as_str().unwrap().contains("bogus"));
  assert_eq!(store.reconnects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn count_reports_total() {
  let store = Arc::new(MemoryStore::with_people(250));
  let (status, json) = send(&store, "GET", "/people/count", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "total": 250 }));
}

// ── POST /set-good-pic ───────────────────────────────────────────────────────

#[tokio::test]
async fn set_good_pic_writes_only_target() {
  let store = Arc::new(MemoryStore::with_people(3));
  let before = store.person(2);

  let (status, json) = send(
    &store,
    "POST",
    "/set-good-pic",
    Some(json!({ "id": 3, "imagePath": "/img/x.jpg" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "success": true }));
  assert_eq!(store.person(3).good_pics.as_deref(), Some("/img/x.jpg"));
  assert_eq!(store.person(3).gib_2021_numbers_only.as_deref(), Some("/2021/3.jpg"));
  assert_eq!(store.person(2), before);
}

#[tokio::test]
async fn set_good_pic_store_failure_reports_message() {
  let store = Arc::new(MemoryStore::with_people(1));
  store.broken.store(true, Ordering::SeqCst);

  let (status, json) = send(
    &store,
    "POST",
    "/set-good-pic",
    Some(json!({ "id": 1, "imagePath": "/a.jpg" })),
  )
  .await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json["success"], false);
  assert!(json["error"].as_str().unwrap().contains("bogus"));
}

#[tokio::test]
async fn set_good_pic_for_unknown_id_still_succeeds() {
  let store = Arc::new(MemoryStore::with_people(1));
  let (status, json) = send(
    &store,
    "POST",
    "/set-good-pic",
    Some(json!({ "id": 42, "imagePath": "/a.jpg" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "success": true }));
}

// ── POST /delete-path ────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_good_pics_clears_only_that_column() {
  let store = Arc::new(MemoryStore::with_people(7));
  store.update(7, PathColumn::GoodPics, Some("/img/7.jpg".into())).unwrap();
  let before = store.person(7);

  let (status, json) = send(
    &store,
    "POST",
    "/delete-path",
    Some(json!({ "id": 7, "column": "good_pics" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "success": true }));
  assert_eq!(store.person(7), PersonRecord { good_pics: None, ..before });
}

#[tokio::test]
async fn delete_path_twice_succeeds_both_times() {
  let store = Arc::new(MemoryStore::with_people(1));
  for _ in 0..2 {
    let (status, json) = send(
      &store,
      "POST",
      "/delete-path",
      Some(json!({ "id": 1, "column": "gib_2021_numbers_only" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "success": true }));
  }
  assert_eq!(store.person(1).gib_2021_numbers_only, None);
}

#[tokio::test]
async fn delete_path_rejects_unknown_column_before_store() {
  let store = Arc::new(MemoryStore::with_people(1));
  let (status, json) = send(
    &store,
    "POST",
    "/delete-path",
    Some(json!({ "id": 1, "column": "name = NULL, good_pics" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json, json!({ "success": false, "error": "invalid column" }));
  assert_eq!(store.writes.load(Ordering::SeqCst), 0);
  assert_eq!(store.person(1).name.as_deref(), Some("Person 1"));
}

#[tokio::test]
async fn delete_path_malformed_body_is_bad_request() {
  let store = Arc::new(MemoryStore::with_people(1));
  let (status, json) = send(&store, "POST", "/delete-path", Some(json!({ "column": "good_pics" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json["success"], false);
  assert_eq!(store.writes.load(Ordering::SeqCst), 0);
}
