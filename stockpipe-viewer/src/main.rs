//! stockpipe viewer: line chart of the daily Low prices in the stored table.
//!
//! Usage: `stockpipe-viewer [--config FILE] [--db-dir DIR]`. Press `q` or
//! `Esc` to quit.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use stockpipe_runner::{PipelineConfig, SqliteStore};
use stockpipe_viewer::{chart, load_daily_lows, App};

#[derive(Parser)]
#[command(name = "stockpipe-viewer", about = "Chart the stored daily Low prices")]
struct Args {
    /// Path to a TOML config file. Only the [store] section is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the SQLite database (overrides store.host).
    #[arg(long)]
    db_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stockpipe=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = args.db_dir {
        config.store.host = dir.to_string_lossy().into_owned();
    }

    // Read everything before the terminal switches to the alternate screen
    let store = SqliteStore::new(config.store);
    let data = load_daily_lows(&store).context("reading stored prices")?;
    let mut app = App::new(data);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let area = f.area();
            chart::render(f, area, &app.data)
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}
