//! TUI rendering.

pub mod people_table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame. Takes the app mutably so the table
/// can record its hit map.
pub fn draw<A>(f: &mut Frame, app: &mut App<A>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // table
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  people_table::draw(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(confirm) = &app.confirm {
    draw_confirm(f, &confirm.prompt);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<A>(f: &mut Frame, area: Rect, app: &App<A>) {
  let left = Span::styled(
    format!(" facepick  page {}", app.pager.position()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{} ", Local::now().format("%Y-%m-%d")),
    Style::default().fg(Color::DarkGray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);
  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<A>(f: &mut Frame, area: Rect, app: &App<A>) {
  let (mode_label, hints) = if app.confirm.is_some() {
    ("CONFIRM", "y yes  n/Esc no")
  } else if app.grab.is_some() {
    ("HOLD", "drag or move to a row, then release/Enter  Esc drop it")
  } else {
    (
      "NORMAL",
      "↑↓ row  ←→ column  y pick  d delete  n/p page  g/G first/last  r reload  q quit",
    )
  };

  let status = if app.status_msg.is_empty() {
    hints
  } else {
    app.status_msg.as_str()
  };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::Gray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Confirm popup ────────────────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, prompt: &str) {
  let area = centered(f.area(), 60, 5);
  let block = Block::default()
    .title(" Confirm ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  let text = vec![
    Line::from(prompt.to_owned()),
    Line::from(Span::styled("[y] yes   [n] no", Style::default().fg(Color::DarkGray))),
  ];

  f.render_widget(Clear, area);
  f.render_widget(
    Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
    area,
  );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  cell
}
