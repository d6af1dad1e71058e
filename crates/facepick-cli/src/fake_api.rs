//! In-memory [`PeopleApi`] used by the pager and app tests.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering},
};

use anyhow::{Result, anyhow, bail};
use facepick_core::{column::PathColumn, person::PersonRecord};

use crate::client::PeopleApi;

#[derive(Default)]
pub struct FakeApi {
  pub people:         Mutex<Vec<PersonRecord>>,
  /// Pages requested through `list_people`, in order.
  pub lists:          Mutex<Vec<u32>>,
  pub counts:         AtomicUsize,
  pub mutations:      AtomicUsize,
  pub fail_lists:     AtomicBool,
  /// A single page number whose listing fails; zero disables.
  pub fail_page:      AtomicU32,
  pub fail_count:     AtomicBool,
  pub fail_mutations: AtomicBool,
}

impl FakeApi {
  /// `n` people with ids `1..=n`; every person has all three candidates.
  pub fn with_people(n: i64) -> Self {
    let people = (1..=n)
      .map(|id| PersonRecord {
        id,
        name: Some(format!("Person {id}")),
        gib_2021_numbers_only: Some(format!("/2021/{id}.jpg")),
        old_pics_2020_numbers_only: Some(format!("/2020/{id}.jpg")),
        pics_stop_numbers_only: Some(format!("/stop/{id}.jpg")),
        ..Default::default()
      })
      .collect();
    Self { people: Mutex::new(people), ..Default::default() }
  }

  pub fn list_calls(&self) -> Vec<u32> { self.lists.lock().unwrap().clone() }

  pub fn count_calls(&self) -> usize { self.counts.load(Ordering::SeqCst) }

  pub fn mutation_calls(&self) -> usize { self.mutations.load(Ordering::SeqCst) }

  pub fn stored(&self, id: i64) -> PersonRecord {
    self
      .people
      .lock()
      .unwrap()
      .iter()
      .find(|p| p.id == id)
      .cloned()
      .unwrap()
  }

  fn write(&self, id: i64, column: PathColumn, value: Option<String>) -> Result<()> {
    self.mutations.fetch_add(1, Ordering::SeqCst);
    if self.fail_mutations.load(Ordering::SeqCst) {
      bail!("database is locked");
    }
    if let Some(person) = self.people.lock().unwrap().iter_mut().find(|p| p.id == id) {
      person.set_path(column, value);
    }
    Ok(())
  }
}

impl PeopleApi for FakeApi {
  async fn list_people(&self, page: u32, limit: u32) -> Result<Vec<PersonRecord>> {
    self.lists.lock().unwrap().push(page);
    if self.fail_lists.load(Ordering::SeqCst) || self.fail_page.load(Ordering::SeqCst) == page {
      return Err(anyhow!("connection refused"));
    }
    let offset = (page.saturating_sub(1) as usize) * limit as usize;
    Ok(
      self
        .people
        .lock()
        .unwrap()
        .iter()
        .skip(offset)
        .take(limit as usize)
        .cloned()
        .collect(),
    )
  }

  async fn count_people(&self) -> Result<u64> {
    self.counts.fetch_add(1, Ordering::SeqCst);
    if self.fail_count.load(Ordering::SeqCst) {
      bail!("connection reset");
    }
    Ok(self.people.lock().unwrap().len() as u64)
  }

  async fn set_good_pic(&self, id: i64, image_path: String) -> Result<()> {
    self.write(id, PathColumn::GoodPics, Some(image_path))
  }

  async fn delete_path(&self, id: i64, column: PathColumn) -> Result<()> {
    self.write(id, column, None)
  }
}
