//! `facepick` — terminal UI for curating people photos.
//!
//! # Usage
//!
//! ```
//! facepick --url http://localhost:5000
//! facepick --config ~/.config/facepick/config.toml --log-file /tmp/facepick.log
//! ```

mod app;
mod client;
#[cfg(test)]
mod fake_api;
mod pager;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use facepick_core::page::DEFAULT_PAGE_SIZE;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "facepick", about = "Terminal UI for picking the good photo of each person")]
struct Args {
  /// Path to a TOML config file (url, page_size, log_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the facepick server (default: http://localhost:5000).
  #[arg(long, env = "FACEPICK_URL")]
  url: Option<String>,

  /// Records per page (default: 100).
  #[arg(long)]
  page_size: Option<u32>,

  /// Write logs to this file. The terminal belongs to the UI, so nothing is
  /// logged without it.
  #[arg(long, env = "FACEPICK_LOG", value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:       Option<String>,
  #[serde(default)]
  page_size: Option<u32>,
  #[serde(default)]
  log_file:  Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
  let file = File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  if let Some(path) = args.log_file.or(file_cfg.log_file) {
    init_logging(&path)?;
  }
  let api_config = ApiConfig {
    base_url: args
      .url
      .or(file_cfg.url)
      .unwrap_or_else(|| "http://localhost:5000".to_string()),
  };
  let page_size = args
    .page_size
    .or(file_cfg.page_size)
    .unwrap_or(DEFAULT_PAGE_SIZE);

  tracing::info!(url = %api_config.base_url, page_size, "starting");
  let client = Arc::new(ApiClient::new(api_config)?);
  let mut app = App::new(client, page_size);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
    .context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // A failed first load is shown in the status bar; `r` retries.
  app.go_to(1).await;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<ApiClient>,
) -> Result<()> {
  loop {
    app.tick().await;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key).await? {
          break;
        }
      }
      Some(Event::Mouse(mouse)) => app.handle_mouse(mouse).await,
      // Resize and the rest redraw on the next iteration.
      _ => {}
    }
  }

  Ok(())
}
