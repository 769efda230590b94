use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use winwatch_core::PauseControl;
use winwatch_types::MonitorEvent;

/// What a key press means to a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    TogglePause,
    Quit,
}

pub fn key_action(key: &KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') => Some(KeyAction::TogglePause),
        // Raw mode swallows SIGINT, so Ctrl+C arrives as a key
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }
        _ => None,
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Apply a key action; pause toggles are announced on `tx`
pub fn apply_action(
    action: KeyAction,
    pause: &PauseControl,
    cancel: &CancellationToken,
    tx: &AsyncSender<MonitorEvent>,
) {
    match action {
        KeyAction::TogglePause => {
            let paused = pause.toggle();
            tracing::debug!("pause toggled: {}", paused);
            match tx.try_send(MonitorEvent::PauseToggled { paused }) {
                Ok(true) => {}
                Ok(false) => tracing::warn!("status channel full, pause notice dropped"),
                Err(e) => tracing::warn!("Failed to announce pause toggle: {}", e),
            }
        }
        KeyAction::Quit => {
            tracing::info!("quit requested from keyboard");
            cancel.cancel();
        }
    }
}

/// Listen for the session keys until `cancel` fires.
///
/// Does nothing when stdin is not a terminal.
pub async fn keyboard_listener(
    pause: Arc<PauseControl>,
    poll: Duration,
    cancel: CancellationToken,
    tx: AsyncSender<MonitorEvent>,
) -> anyhow::Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        tracing::info!("stdin is not a terminal, pause key disabled");
        return Ok(());
    }

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let _raw = RawModeGuard::enable()?;

        while !cancel.is_cancelled() {
            if !event::poll(poll)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if let Some(action) = key_action(&key) {
                    apply_action(action, &pause, &cancel, &tx);
                }
            }
        }
        Ok(())
    })
    .await?
}
