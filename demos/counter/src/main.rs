//! Counter - Minimal oneway example
//!
//! - State: What the app knows
//! - Actions: What can happen
//! - Reducer: How state changes
//! - Store: Where state lives
//! - Listener: Renders after every dispatch
//! - Main loop: Key -> Action -> Dispatch -> Render
//!
//! Keys: k/Up = increment, j/Down = decrement, r = reset, q = quit
//!
//! Environment:
//! - `ONEWAY_LOG`: file to write tracing output to (filter via `RUST_LOG`)
//! - `ONEWAY_CONFIG`: JSON store config file
//! - `ONEWAY_LOG_INCLUDE` / `ONEWAY_LOG_EXCLUDE`: comma-separated action patterns

mod input;
mod reducer;
mod render;

use std::env;
use std::fs;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use oneway::{ActionLogFilter, Store, StoreConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::Input;
use crate::reducer::reducer;
use crate::render::Renderer;

/// Bounds how long quitting waits for the key poller
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    init_tracing()?;
    let config = load_store_config()?;

    // Terminal setup
    enable_raw_mode()?;
    let renderer = Rc::new(or_cleanup(open_renderer(), restore_terminal)?);

    let result = run_app(config, Rc::clone(&renderer)).await;

    // Cleanup
    restore_terminal()?;

    result
}

async fn run_app(
    config: StoreConfig,
    renderer: Rc<Renderer<CrosstermBackend<Stdout>>>,
) -> io::Result<()> {
    let store = Store::with_config(reducer, config);

    let view = Rc::clone(&renderer);
    store.subscribe(move |store| view.render(store.get_state().as_deref()));

    // Bootstrap: the reducer fills in its default state
    store.init().map_err(io::Error::other)?;
    if let Some(err) = renderer.take_error() {
        return Err(err);
    }
    info!(store = ?store, "Counter started");

    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    let cancel_token = CancellationToken::new();
    let poller = input::spawn_key_poller(key_tx, POLL_TIMEOUT, cancel_token.clone());

    let mut result = Ok(());
    while let Some(key) = key_rx.recv().await {
        match input::map_key(key) {
            Some(Input::Quit) => break,
            Some(Input::Dispatch(action)) => {
                // A rejected action leaves the screen as it was
                if let Err(err) = store.dispatch(action) {
                    warn!(%err, "Action rejected");
                }
            }
            None => continue,
        }
        if let Some(err) = renderer.take_error() {
            result = Err(err);
            break;
        }
    }

    cancel_token.cancel();
    if let Err(err) = poller.await {
        warn!(%err, "Key poller did not shut down cleanly");
    }
    info!(dispatches = store.dispatch_count(), "Counter stopped");
    result
}

fn open_renderer() -> io::Result<Renderer<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Renderer::new(Terminal::new(CrosstermBackend::new(stdout))?))
}

/// Leave raw mode and the alternate screen, and show the cursor again
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen, Show)
}

/// Run `cleanup` if `setup` failed, returning the setup error
fn or_cleanup<T>(
    setup: io::Result<T>,
    cleanup: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    setup.or_else(|err| {
        if let Err(cleanup_err) = cleanup() {
            warn!(%cleanup_err, "Terminal cleanup failed");
        }
        Err(err)
    })
}

/// Send tracing output to the file named by `ONEWAY_LOG`; the terminal owns stdout
fn init_tracing() -> io::Result<()> {
    let Some(path) = env::var_os("ONEWAY_LOG") else {
        return Ok(());
    };
    let file = fs::File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Read the store config from `ONEWAY_CONFIG`, then apply pattern overrides
fn load_store_config() -> io::Result<StoreConfig> {
    let mut config = match env::var_os("ONEWAY_CONFIG") {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            StoreConfig::from_json_str(&json).map_err(io::Error::other)?
        }
        None => StoreConfig::named("counter"),
    };

    let include = env::var("ONEWAY_LOG_INCLUDE").ok();
    let exclude = env::var("ONEWAY_LOG_EXCLUDE").ok();
    if include.is_some() || exclude.is_some() {
        config.log = ActionLogFilter::new(include.as_deref(), exclude.as_deref());
    }
    Ok(config)
}
