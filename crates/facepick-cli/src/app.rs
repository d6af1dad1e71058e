//! Application state machine and event dispatcher.
//!
//! [`App`] owns the rows of the current page and applies every successful
//! mutation to them in place; nothing is refetched after a write. Page state
//! lives in the [`Pager`].

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{
  KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use facepick_core::{column::PathColumn, person::PersonRecord};
use tracing::{info, warn};

use crate::{client::PeopleApi, pager::Pager};

// ─── Pending actions ──────────────────────────────────────────────────────────

/// A mutation waiting on the operator's y/n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
  DeletePath { id: i64, column: PathColumn },
  SetGoodPic { id: i64, image_path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
  pub prompt: String,
  pub action: PendingAction,
}

/// A candidate path picked up by the mouse or by `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grab {
  pub source_id: i64,
  pub column:    PathColumn,
  pub path:      String,
  /// Set once the pointer has moved with the button held. A press and release
  /// without movement is a click, not a drop.
  pub moved:     bool,
}

// ─── Hit map ──────────────────────────────────────────────────────────────────

/// Screen geometry of the last rendered table, used to resolve mouse
/// positions to a record and a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
  /// `(screen row, record id)` for every visible record.
  pub rows:    Vec<(u16, i64)>,
  /// `(first screen column, width, column)` for every path cell.
  pub columns: Vec<(u16, u16, PathColumn)>,
}

impl HitMap {
  pub fn row_at(&self, y: u16) -> Option<i64> {
    self.rows.iter().find(|(row, _)| *row == y).map(|(_, id)| *id)
  }

  pub fn column_at(&self, x: u16) -> Option<PathColumn> {
    self
      .columns
      .iter()
      .find(|(start, width, _)| x >= *start && x < start.saturating_add(*width))
      .map(|(_, _, column)| *column)
  }

  pub fn clear(&mut self) {
    self.rows.clear();
    self.columns.clear();
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

pub struct App<A> {
  pub pager:      Pager<A>,
  api:            Arc<A>,
  /// Records of the current page, in id order.
  pub people:     Vec<PersonRecord>,
  /// Index into `people`.
  pub cursor:     usize,
  /// Path column under the cursor.
  pub column:     PathColumn,
  /// First visible row of the table, kept between frames.
  pub scroll:     usize,
  pub grab:       Option<Grab>,
  pub confirm:    Option<Confirm>,
  /// One-line status message shown in the status bar.
  pub status_msg: String,
  /// Filled by the renderer each frame.
  pub hits:       HitMap,
}

impl<A> App<A>
where
  A: PeopleApi + 'static,
{
  pub fn new(api: Arc<A>, page_size: u32) -> Self {
    Self {
      pager: Pager::new(api.clone(), page_size),
      api,
      people: Vec::new(),
      cursor: 0,
      column: PathColumn::Gib2021,
      scroll: 0,
      grab: None,
      confirm: None,
      status_msg: String::new(),
      hits: HitMap::default(),
    }
  }

  pub fn cursor_person(&self) -> Option<&PersonRecord> { self.people.get(self.cursor) }

  fn person(&self, id: i64) -> Option<&PersonRecord> {
    self.people.iter().find(|p| p.id == id)
  }

  fn person_mut(&mut self, id: i64) -> Option<&mut PersonRecord> {
    self.people.iter_mut().find(|p| p.id == id)
  }

  /// Harvest background work. Called once per frame.
  pub async fn tick(&mut self) { self.pager.poll_prefetch().await; }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Show page `page`. A failed load leaves the current page on screen.
  pub async fn go_to(&mut self, page: u32) {
    let page = page.max(1);
    let turning = page != self.pager.current_page();
    self.status_msg = format!("Loading page {page}…");
    match self.pager.load_page(page).await {
      Ok(people) => {
        self.people = people;
        if turning {
          self.cursor = 0;
          self.scroll = 0;
        }
        self.cursor = self.cursor.min(self.people.len().saturating_sub(1));
        self.status_msg = format!("Page {}", self.pager.position());
      }
      Err(e) => {
        warn!(page, error = %e, "page load failed");
        self.status_msg = format!("Error: {e:#}");
      }
    }
  }

  pub async fn next_page(&mut self) {
    if self.pager.has_next() {
      self.go_to(self.pager.current_page() + 1).await;
    }
  }

  pub async fn prev_page(&mut self) {
    let current = self.pager.current_page();
    if current > 1 {
      self.go_to(current - 1).await;
    }
  }

  pub async fn first_page(&mut self) {
    if self.pager.current_page() != 1 {
      self.go_to(1).await;
    }
  }

  pub async fn last_page(&mut self) {
    let Some(total) = self.pager.total_pages() else {
      self.status_msg = "Page total unknown; r reloads it".to_string();
      return;
    };
    let last = total.max(1);
    if self.pager.current_page() != last {
      self.go_to(last).await;
    }
  }

  /// Refetch the current page and the page total.
  pub async fn reload(&mut self) {
    self.pager.forget_total();
    self.go_to(self.pager.current_page()).await;
  }

  fn move_cursor(&mut self, delta: isize) {
    if self.people.is_empty() {
      return;
    }
    let last = self.people.len() - 1;
    self.cursor = self.cursor.saturating_add_signed(delta).min(last);
  }

  fn move_column(&mut self, delta: isize) {
    let columns: Vec<_> = PathColumn::all().collect();
    let at = columns.iter().position(|c| *c == self.column).unwrap_or(0);
    let to = at.saturating_add_signed(delta).min(columns.len() - 1);
    self.column = columns[to];
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Ask before clearing `column` on record `id`.
  pub fn request_delete(&mut self, id: i64, column: PathColumn) {
    let Some(person) = self.person(id) else {
      return;
    };
    if person.path(column).is_none() {
      self.status_msg = format!("{column} is already empty");
      return;
    }
    self.confirm = Some(Confirm {
      prompt: format!("Delete {column} for {}?", display_name(person)),
      action: PendingAction::DeletePath { id, column },
    });
  }

  /// Make `image_path` the canonical photo of record `id`. Replacing an
  /// existing one needs confirmation; otherwise the request goes out now.
  pub async fn request_set_good_pic(&mut self, id: i64, image_path: String) {
    let Some(person) = self.person(id) else {
      return;
    };
    let action = PendingAction::SetGoodPic { id, image_path };
    if person.good_pics.is_some() {
      self.confirm = Some(Confirm {
        prompt: format!("{} already has a good picture. Replace it?", display_name(person)),
        action,
      });
    } else {
      self.execute(action).await;
    }
  }

  /// Resolve the pending confirmation.
  pub async fn answer(&mut self, yes: bool) {
    let Some(confirm) = self.confirm.take() else {
      return;
    };
    if yes {
      self.execute(confirm.action).await;
    } else {
      self.status_msg = "Cancelled".to_string();
    }
  }

  /// Send `action` and, on success, apply it to the local record.
  async fn execute(&mut self, action: PendingAction) {
    let outcome = match &action {
      PendingAction::DeletePath { id, column } => self.api.delete_path(*id, *column).await,
      PendingAction::SetGoodPic { id, image_path } => {
        self.api.set_good_pic(*id, image_path.clone()).await
      }
    };

    if let Err(e) = outcome {
      warn!(?action, error = %e, "mutation failed");
      self.status_msg = format!("Error: {e:#}");
      return;
    }

    match action {
      PendingAction::DeletePath { id, column } => {
        info!(id, %column, "path deleted");
        if let Some(person) = self.person_mut(id) {
          person.set_path(column, None);
        }
        self.status_msg = format!("Deleted {column} for #{id}");
      }
      PendingAction::SetGoodPic { id, image_path } => {
        info!(id, %image_path, "good picture set");
        if let Some(person) = self.person_mut(id) {
          person.good_pics = Some(image_path);
        }
        self.status_msg = format!("Good picture set for #{id}");
      }
    }
  }

  // ── Drag and drop ─────────────────────────────────────────────────────────

  /// Pick up the candidate at (`id`, `column`), if there is one.
  fn pick_up(&mut self, id: i64, column: PathColumn, moved: bool) -> bool {
    if !column.is_candidate() {
      return false;
    }
    let Some(path) = self.person(id).and_then(|p| p.path(column)) else {
      return false;
    };
    self.grab = Some(Grab { source_id: id, column, path: path.to_owned(), moved });
    true
  }

  /// Drop the held candidate on record `target`. Dropping outside any row
  /// just releases it.
  pub async fn drop_at(&mut self, target: Option<i64>) {
    let Some(grab) = self.grab.take() else {
      return;
    };
    if let Some(id) = target {
      self.request_set_good_pic(id, grab.path).await;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.confirm.is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => self.answer(true).await,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.answer(false).await,
        _ => {}
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Char('q') => return Ok(false),

      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
      KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.move_column(1),
      KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.move_column(-1),

      KeyCode::Char('n') | KeyCode::PageDown => self.next_page().await,
      KeyCode::Char('p') | KeyCode::PageUp => self.prev_page().await,
      KeyCode::Char('g') | KeyCode::Home => self.first_page().await,
      KeyCode::Char('G') | KeyCode::End => self.last_page().await,
      KeyCode::Char('r') => self.reload().await,

      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(id) = self.cursor_person().map(|p| p.id) {
          self.request_delete(id, self.column);
        }
      }

      KeyCode::Char('y') => {
        if let Some(id) = self.cursor_person().map(|p| p.id) {
          if self.pick_up(id, self.column, true) {
            self.status_msg = format!("Holding {}: move to a row and press Enter", self.column);
          } else {
            self.status_msg = "Nothing to pick up here".to_string();
          }
        }
      }
      KeyCode::Enter => {
        let target = self.cursor_person().map(|p| p.id);
        self.drop_at(target).await;
      }
      KeyCode::Esc => {
        if self.grab.take().is_some() {
          self.status_msg = "Released".to_string();
        }
      }

      _ => {}
    }
    Ok(true)
  }

  // ── Mouse handling ────────────────────────────────────────────────────────

  pub async fn handle_mouse(&mut self, mouse: MouseEvent) {
    if self.confirm.is_some() {
      return;
    }
    let row = self.hits.row_at(mouse.row);
    let column = self.hits.column_at(mouse.column);

    match mouse.kind {
      MouseEventKind::Down(MouseButton::Left) => {
        self.grab = None;
        if let Some(id) = row {
          if let Some(index) = self.people.iter().position(|p| p.id == id) {
            self.cursor = index;
          }
          if let Some(column) = column {
            self.column = column;
            self.pick_up(id, column, false);
          }
        }
      }
      MouseEventKind::Drag(MouseButton::Left) => {
        if let Some(grab) = self.grab.as_mut() {
          grab.moved = true;
        }
      }
      MouseEventKind::Up(MouseButton::Left) => {
        if self.grab.as_ref().is_some_and(|g| g.moved) {
          self.drop_at(row).await;
        } else {
          self.grab = None;
        }
      }
      MouseEventKind::ScrollDown => self.move_cursor(1),
      MouseEventKind::ScrollUp => self.move_cursor(-1),
      _ => {}
    }
  }
}

pub fn display_name(person: &PersonRecord) -> String {
  match person.name.as_deref() {
    Some(name) if !name.is_empty() => name.to_owned(),
    _ => format!("#{}", person.id),
  }
}
