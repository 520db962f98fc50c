// tiledash-cli/src/main.rs
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, warn};

use tiledash_core::{ConfigFile, Dashboard, EventBus, FileLayoutStore, Layout, LayoutStore};

mod app;
mod logging;
mod ui;

use app::App;

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    reset_layout: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();

    for arg in args {
        if let Some(path) = arg.strip_prefix("--config=") {
            if path.is_empty() {
                return Err("--config needs a path".to_string());
            }
            parsed.config = Some(PathBuf::from(path));
        } else if arg == "--reset-layout" {
            parsed.reset_layout = true;
        } else {
            return Err(format!(
                "Unknown argument '{}'. Usage: tiledash [--config=PATH] [--reset-layout]",
                arg
            ));
        }
    }

    Ok(parsed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(std::env::args().skip(1))?;

    // Load config
    let loaded = match &args.config {
        Some(path) => ConfigFile::load_from(path),
        None => ConfigFile::load(),
    };
    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (ConfigFile::default(), Some(e)),
    };

    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to set up logging: {}. Continuing without a log file.", e);
            None
        }
    };
    if let Some(e) = config_error {
        warn!(error = %e, "failed to load config, using defaults");
    }

    let store = FileLayoutStore::from_config(&config.storage)?;
    if args.reset_layout {
        store.try_save(&Layout::default())?;
        info!(path = %store.path().display(), "layout reset to default");
    }

    let dashboard = Dashboard::new(Box::new(store), EventBus::new());
    let mut app = App::new(
        dashboard,
        tiledash_widgets::builtin_registry(),
        config.grid.row_height,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, Duration::from_millis(config.ui.tick_rate_ms));

    // Cleanup
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                // Only handle key press events, not key release
                CEvent::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
