//! Keyboard event source

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::reducer::CounterAction;

/// What a key press asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Dispatch(CounterAction),
    Quit,
}

/// Map a key press to an input, ignoring unbound keys
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Input::Quit);
    }
    let action = match key.code {
        KeyCode::Char('k') | KeyCode::Char(' ') | KeyCode::Up => CounterAction::IncreaseCount,
        KeyCode::Char('j') | KeyCode::Down => CounterAction::DecreaseCount,
        KeyCode::Char('r') => CounterAction::ResetCount,
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Dispatch(action))
}

/// Spawn a blocking task that forwards key events until cancelled
///
/// # Arguments
/// * `tx` - Channel to send key events
/// * `poll_timeout` - How long each poll waits, bounding cancellation latency
/// * `cancel_token` - Token to stop the poller
pub fn spawn_key_poller(
    tx: mpsc::UnboundedSender<KeyEvent>,
    poll_timeout: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !cancel_token.is_cancelled() {
            match event::poll(poll_timeout) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(err) => {
                    warn!(%err, "Terminal poll failed, stopping key poller");
                    return;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(key).is_err() {
                        debug!("Key channel closed, stopping poller");
                        return;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "Terminal read failed, stopping key poller");
                    return;
                }
            }
        }
        info!("Key poller cancelled");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_bound_keys() {
        assert_eq!(
            map_key(press(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(Input::Dispatch(CounterAction::IncreaseCount))
        );
        assert_eq!(
            map_key(press(KeyCode::Down, KeyModifiers::NONE)),
            Some(Input::Dispatch(CounterAction::DecreaseCount))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Input::Dispatch(CounterAction::ResetCount))
        );
        assert_eq!(map_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Input::Quit));
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Quit)
        );
    }

    #[test]
    fn test_unbound_and_release_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(map_key(press(KeyCode::Char('k'), KeyModifiers::CONTROL)), None);

        let mut release = press(KeyCode::Char('k'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
