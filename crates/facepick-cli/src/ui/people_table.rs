//! The people table: one row per record, one cell per path column.

use facepick_core::{column::PathColumn, person::PersonRecord};
use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Block, Borders, Cell, HighlightSpacing, Row, Table, TableState},
};

use crate::app::App;

const ID_WIDTH: u16 = 7;
const NAME_WIDTH: u16 = 24;
const DATE_WIDTH: u16 = 11;
const PATH_WIDTH: u16 = 30;

/// Fixed widths: id, name, birth, death, then one per [`PathColumn`].
fn widths() -> Vec<Constraint> {
  let mut widths = vec![
    Constraint::Length(ID_WIDTH),
    Constraint::Length(NAME_WIDTH),
    Constraint::Length(DATE_WIDTH),
    Constraint::Length(DATE_WIDTH),
  ];
  widths.extend(PathColumn::all().map(|_| Constraint::Length(PATH_WIDTH)));
  widths
}

fn header_label(column: PathColumn) -> &'static str {
  match column {
    PathColumn::Gib2021 => "2021",
    PathColumn::OldPics2020 => "2020",
    PathColumn::PicsStop => "stop",
    PathColumn::GoodPics => "good",
  }
}

/// Render the current page into `area` and record where each row and path
/// cell landed in `app.hits`.
pub fn draw<A>(f: &mut Frame, area: Rect, app: &mut App<A>) {
  let block = Block::default()
    .title(format!(" People ({}) ", app.people.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);

  let header = Row::new(
    ["id", "name", "born", "died"]
      .into_iter()
      .chain(PathColumn::all().map(header_label)),
  )
  .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = app
    .people
    .iter()
    .enumerate()
    .map(|(i, person)| person_row(app, i, person))
    .collect();

  let widths = widths();
  let table = Table::new(rows, widths.clone())
    .header(header)
    .block(block)
    .column_spacing(1)
    .flex(Flex::Start)
    .highlight_spacing(HighlightSpacing::Never)
    .row_highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)));

  let mut state = TableState::default()
    .with_offset(app.scroll)
    .with_selected((!app.people.is_empty()).then_some(app.cursor));
  f.render_stateful_widget(table, area, &mut state);
  app.scroll = state.offset();

  // Same layout the table uses for its columns.
  let cells = Layout::horizontal(widths)
    .flex(Flex::Start)
    .spacing(1)
    .split(inner);

  app.hits.clear();
  for (rect, column) in cells.iter().skip(4).zip(PathColumn::all()) {
    app.hits.columns.push((rect.x, rect.width, column));
  }
  let visible = inner.height.saturating_sub(1) as usize;
  for (line, person) in app.people.iter().skip(app.scroll).take(visible).enumerate() {
    app.hits.rows.push((inner.y + 1 + line as u16, person.id));
  }
}

fn person_row<'a, A>(app: &App<A>, index: usize, person: &'a PersonRecord) -> Row<'a> {
  let dim = Style::default().fg(Color::DarkGray);
  let text = |value: &'a Option<String>| match value.as_deref() {
    Some(v) => Cell::from(v),
    None => Cell::from(Span::styled("—", dim)),
  };

  let mut cells = vec![
    Cell::from(person.id.to_string()),
    text(&person.name),
    text(&person.birth_date),
    text(&person.death_date),
  ];

  for column in PathColumn::all() {
    let mut style = match column {
      PathColumn::GoodPics => Style::default().fg(Color::Green),
      _ => Style::default(),
    };
    if app
      .grab
      .as_ref()
      .is_some_and(|g| g.source_id == person.id && g.column == column)
    {
      style = style.fg(Color::Black).bg(Color::Yellow);
    } else if index == app.cursor && column == app.column {
      style = style.add_modifier(Modifier::REVERSED);
    }
    let cell = match person.path(column) {
      Some(path) => Cell::from(path).style(style),
      None => Cell::from(Span::styled("—", dim)).style(style),
    };
    cells.push(cell);
  }

  Row::new(cells)
}
