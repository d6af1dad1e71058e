//! Page loading with a one-page lookahead.
//!
//! [`Pager`] is the only place page state changes. Loading page `p` serves it
//! from the prefetch slot when the slot holds `p`, with no request at all;
//! otherwise it fetches the page, and the page total too while that is still
//! unknown. It then starts a background fetch of `p + 1`. The background
//! result lands in the slot only if `p + 1` is still the page after the
//! current one when it is harvested.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use facepick_core::{page::total_pages, person::PersonRecord};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::PeopleApi;

/// The single-entry lookahead cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchedPage {
  pub page:   u32,
  pub people: Vec<PersonRecord>,
}

struct InFlight {
  page:   u32,
  handle: JoinHandle<Result<Vec<PersonRecord>>>,
}

pub struct Pager<A> {
  api:          Arc<A>,
  page_size:    u32,
  /// Zero until the first successful load.
  current_page: u32,
  /// `None` until a count request succeeds, and again after
  /// [`forget_total`](Pager::forget_total).
  total_pages:  Option<u32>,
  slot:         Option<PrefetchedPage>,
  in_flight:    Option<InFlight>,
}

impl<A> Pager<A> {
  pub fn current_page(&self) -> u32 { self.current_page }

  pub fn total_pages(&self) -> Option<u32> { self.total_pages }

  /// The page held in the prefetch slot, if any.
  pub fn prefetched_page(&self) -> Option<u32> { self.slot.as_ref().map(|s| s.page) }

  /// Whether a page after the current one may exist. An unknown total never
  /// blocks paging forward.
  pub fn has_next(&self) -> bool {
    self.total_pages.is_none_or(|total| self.current_page < total)
  }

  /// `"2/3"`, or `"2/?"` while the total is unknown.
  pub fn position(&self) -> String {
    match self.total_pages {
      Some(total) => format!("{}/{}", self.current_page, total.max(1)),
      None => format!("{}/?", self.current_page),
    }
  }

  /// Drop the known total so the next fetched page counts again.
  pub fn forget_total(&mut self) { self.total_pages = None; }
}

impl<A> Pager<A>
where
  A: PeopleApi + 'static,
{
  pub fn new(api: Arc<A>, page_size: u32) -> Self {
    Self {
      api,
      page_size: page_size.max(1),
      current_page: 0,
      total_pages: None,
      slot: None,
      in_flight: None,
    }
  }

  /// Load page `page` (1-based). On failure nothing changes.
  pub async fn load_page(&mut self, page: u32) -> Result<Vec<PersonRecord>> {
    self.poll_prefetch().await;

    let people = match self.slot.take() {
      Some(hit) if hit.page == page => {
        debug!(page, "serving prefetched page");
        hit.people
      }
      other => {
        self.slot = other;
        let people = self
          .api
          .list_people(page, self.page_size)
          .await
          .with_context(|| format!("loading page {page}"))?;
        if self.total_pages.is_none() {
          self.count().await;
        }
        people
      }
    };

    self.current_page = page;
    let next = page.saturating_add(1);
    self.slot = self.slot.take().filter(|s| s.page == next);

    self.schedule_prefetch();
    Ok(people)
  }

  async fn count(&mut self) {
    match self.api.count_people().await {
      Ok(total) => self.total_pages = Some(total_pages(total, self.page_size)),
      Err(e) => warn!(error = %e, "counting people failed, page total unknown"),
    }
  }

  /// Harvest the background fetch if it has finished. Never waits.
  pub async fn poll_prefetch(&mut self) {
    if self.in_flight.as_ref().is_some_and(|f| f.handle.is_finished()) {
      self.settle_prefetch().await;
    }
  }

  /// Wait for the background fetch, if any, and harvest it.
  pub async fn settle_prefetch(&mut self) {
    let Some(InFlight { page, handle }) = self.in_flight.take() else {
      return;
    };
    match handle.await {
      Ok(Ok(people)) if page == self.current_page.saturating_add(1) => {
        debug!(page, count = people.len(), "prefetched page stored");
        self.slot = Some(PrefetchedPage { page, people });
      }
      Ok(Ok(_)) => debug!(page, "discarding prefetch for a page no longer next"),
      Ok(Err(e)) => warn!(page, error = %e, "prefetch failed"),
      Err(e) if e.is_cancelled() => {}
      Err(e) => warn!(page, error = %e, "prefetch task panicked"),
    }
  }

  fn schedule_prefetch(&mut self) {
    let next = self.current_page.saturating_add(1);

    if self.in_flight.as_ref().is_some_and(|f| f.page == next) {
      return;
    }
    if let Some(stale) = self.in_flight.take() {
      stale.handle.abort();
    }
    if !self.has_next() || self.prefetched_page() == Some(next) {
      return;
    }

    let api   = self.api.clone();
    let limit = self.page_size;
    debug!(page = next, "prefetching");
    let handle = tokio::spawn(async move { api.list_people(next, limit).await });
    self.in_flight = Some(InFlight { page: next, handle });
  }
}
