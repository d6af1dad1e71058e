//! Async HTTP client wrapping the facepick JSON API.

use std::{future::Future, time::Duration};

use anyhow::{Context, Result, anyhow};
use facepick_core::{
  column::PathColumn,
  person::PersonRecord,
  wire::{CountResponse, DeletePathBody, ErrorResponse, MutationResponse, SetGoodPicBody},
};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;

/// The operations the pager and the mutation controller need from the
/// server. [`ApiClient`] is the real implementation.
pub trait PeopleApi: Send + Sync {
  /// `GET /api/people?page=&limit=`
  fn list_people(
    &self,
    page: u32,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<PersonRecord>>> + Send + '_;

  /// `GET /api/people/count`
  fn count_people(&self) -> impl Future<Output = Result<u64>> + Send + '_;

  /// `POST /api/set-good-pic`
  fn set_good_pic(
    &self,
    id: i64,
    image_path: String,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// `POST /api/delete-path`
  fn delete_path(
    &self,
    id: i64,
    column: PathColumn,
  ) -> impl Future<Output = Result<()>> + Send + '_;
}

/// Connection settings for the facepick API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the facepick JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// POST a mutation body and turn `{"success": false, "error": ...}` into an
  /// error carrying the server's message.
  async fn mutate<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<()> {
    let resp = self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;

    let status = resp.status();
    let outcome: MutationResponse = resp
      .json()
      .await
      .with_context(|| format!("POST {path} → {status}"))?;

    if outcome.success {
      Ok(())
    } else {
      Err(anyhow!(outcome.error.unwrap_or_else(|| "unknown error".to_string())))
    }
  }
}

/// Turn a non-2xx response into an error, keeping the server's
/// `{"error": ...}` message when the body carries one.
async fn failure(what: &str, resp: Response) -> anyhow::Error {
  let status = resp.status();
  let body = resp.bytes().await.unwrap_or_default();
  describe_failure(what, status, &body)
}

fn describe_failure(what: &str, status: StatusCode, body: &[u8]) -> anyhow::Error {
  match serde_json::from_slice::<ErrorResponse>(body) {
    Ok(ErrorResponse { error }) => anyhow!("{what} → {status}: {error}"),
    Err(_) => anyhow!("{what} → {status}"),
  }
}

impl PeopleApi for ApiClient {
  async fn list_people(&self, page: u32, limit: u32) -> Result<Vec<PersonRecord>> {
    let resp = self
      .client
      .get(self.url("/people"))
      .query(&[("page", page), ("limit", limit)])
      .send()
      .await
      .context("GET /people failed")?;

    if !resp.status().is_success() {
      return Err(failure("GET /people", resp).await);
    }
    resp.json().await.context("deserialising people")
  }

  async fn count_people(&self) -> Result<u64> {
    let resp = self
      .client
      .get(self.url("/people/count"))
      .send()
      .await
      .context("GET /people/count failed")?;

    if !resp.status().is_success() {
      return Err(failure("GET /people/count", resp).await);
    }
    let count: CountResponse = resp.json().await.context("deserialising count")?;
    Ok(count.total)
  }

  async fn set_good_pic(&self, id: i64, image_path: String) -> Result<()> {
    self
      .mutate("/set-good-pic", &SetGoodPicBody { id, image_path })
      .await
  }

  async fn delete_path(&self, id: i64, column: PathColumn) -> Result<()> {
    self
      .mutate("/delete-path", &DeletePathBody { id, column: column.as_str().to_string() })
      .await
  }
}
