use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use nimbus_core::{Config, FileStore, KeyValueStore, PrefLoaded, Preferences};
use nimbus_tui::{input, ui, App};
use nimbus_weather::{FetchEvent, WeatherClient, WeatherFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    if let Err(err) = config.validate() {
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }

    // Log to a file: stderr would paint over the alternate screen.
    nimbus_core::init(Some(&config.config_dir.join("nimbus.log")))?;
    info!("starting nimbus");

    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::new(config.config_dir.join("prefs")));
    let prefs = Preferences::new(storage);
    let client = WeatherClient::new(&config.weather.base_url, &config.weather.api_key)
        .context("failed to build HTTP client")?;

    let (pref_tx, pref_rx) = mpsc::unbounded_channel();
    let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

    // Kick off the startup preference loads before the first frame; until
    // they resolve the screen shows the defaults.
    prefs.spawn_load(pref_tx);

    let fetcher = WeatherFetcher::new(Arc::new(client), fetch_tx);
    let mut app = App::new(prefs, fetcher);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, pref_rx, fetch_rx).await;
    restore_terminal()?;

    info!("nimbus stopped");
    result
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Main event loop: draw, poll the keyboard with a timeout, then drain the
/// async results (preference loads, fetch outcomes) without blocking.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut pref_rx: mpsc::UnboundedReceiver<PrefLoaded>,
    mut fetch_rx: mpsc::UnboundedReceiver<FetchEvent>,
) -> Result<()> {
    while !app.should_quit() {
        app.tick_spinner();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::handle_key(key);
                    input::apply_action(app, action);
                }
            }
        }

        while let Ok(loaded) = pref_rx.try_recv() {
            app.on_pref_loaded(loaded);
        }
        while let Ok(outcome) = fetch_rx.try_recv() {
            app.on_fetch_event(outcome);
        }
    }

    Ok(())
}
