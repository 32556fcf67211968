use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::Event;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use assetdeck_client::ApiClient;
use assetdeck_core::config::AppConfig;
use assetdeck_core::prefs::UiPrefs;
use assetdeck_tui::app::App;
use assetdeck_tui::event::{handle_key, HandleResult};
use assetdeck_tui::{terminal, ui};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let debug = std::env::args().any(|arg| arg == "--debug");
    init_tracing(debug)?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    let prefs = UiPrefs::load().unwrap_or_else(|err| {
        warn!(error = %err, "could not load preferences, using defaults");
        UiPrefs::default()
    });
    let client = ApiClient::new(&config.api_url);

    // Create app state and issue the mount fetches
    let mut app = App::new(client, prefs);
    app.load_initial();

    // Setup terminal
    let mut term = terminal::init()?;

    // Main event loop
    let result = run_event_loop(&mut term, &mut app).await;

    // Restore terminal (even if the loop failed)
    terminal::restore(&mut term)?;

    // The two UI flags are the only persisted state
    if let Err(err) = app.prefs.save() {
        warn!(error = %err, "could not save preferences");
    }

    result
}

/// Console logging via RUST_LOG, defaulting to info (debug with --debug).
/// Logs go to stderr so they never corrupt the alternate screen.
fn init_tracing(debug: bool) -> Result<()> {
    let fallback = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Apply completed fetches, then emit any settled search query
        app.drain_events();
        app.tick(Instant::now());

        // Render UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events (100ms timeout keeps the debouncer responsive)
        if let Some(event) = terminal::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => {
                    if handle_key(app, key, Instant::now()) == HandleResult::Quit {
                        app.should_quit = true;
                    }
                }
                Event::Resize(_, _) => {
                    // Terminal resized, re-rendered on next loop
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
