use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use std::io;
use tracing_subscriber::EnvFilter;

mod filter;
mod service;
mod storage;
mod tui;

use tui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_logger()?;

    // Setup terminal
    enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}. Make sure you're running in a terminal.", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| anyhow::anyhow!("Failed to enter alternate screen: {}. Make sure you're running in a terminal.", e))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| anyhow::anyhow!("Failed to create terminal: {}. Make sure you're running in a terminal.", e))?;

    // Create app
    let mut app = App::new().await?;

    // Main loop
    while !app.should_quit {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code, key.modifiers).await?;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

/// Logs go to a rolling file under the data dir; the terminal belongs to the UI.
fn init_logger() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let mut log_dir = dirs::data_local_dir().context("failed to resolve data_local_dir")?;
    log_dir.push("noteskeeper");
    log_dir.push("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "noteskeeper.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,noteskeeper=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(guard)
}
