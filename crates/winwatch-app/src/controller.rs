use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use winwatch_core::{MonitorEngine, MonitorError, PauseControl, run_monitor};
use winwatch_types::{MonitorEvent, MonitorMode, StopReason};

use crate::keyboard::keyboard_listener;
use crate::status::{Presenter, SessionStats, present};

/// Session timing taken from config
#[derive(Debug, Clone, Copy)]
pub struct SessionTiming {
    pub interval: Duration,
    pub keyboard_poll: Duration,
    pub listen_keys: bool,
}

/// Run a blocking setup step unless `interrupt` resolves first.
///
/// Returns `None` when interrupted. The blocking step is abandoned, not
/// stopped.
pub async fn interruptible<T, F>(
    setup: F,
    interrupt: impl Future<Output = ()>,
) -> anyhow::Result<Option<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(setup);

    tokio::select! {
        joined = task => Ok(Some(joined?)),
        _ = interrupt => {
            tracing::info!("interrupted during setup");
            Ok(None)
        }
    }
}

/// Wires the monitor, the keyboard listener and the presenter together for
/// one session
pub struct AppController {
    events: (AsyncSender<MonitorEvent>, AsyncReceiver<MonitorEvent>),
    pause: Arc<PauseControl>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(pause: Arc<PauseControl>) -> Self {
        Self {
            events: kanal::bounded_async(64),
            pause,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Run until the window closes or the user stops the session.
    ///
    /// `interrupt` resolving counts as a user stop.
    pub async fn run<W>(
        self,
        engine: MonitorEngine,
        timing: SessionTiming,
        out: W,
        interrupt: impl Future<Output = ()>,
    ) -> Result<(StopReason, SessionStats), MonitorError>
    where
        W: Write + Send + 'static,
    {
        let (tx, rx) = self.events;
        let save_mode = matches!(engine.mode(), MonitorMode::SavePictures);

        let presenter = tokio::spawn(present(rx, Presenter::new(out, save_mode)));

        let mut helpers = JoinSet::new();
        if timing.listen_keys {
            helpers.spawn(keyboard_listener(
                self.pause.clone(),
                timing.keyboard_poll,
                self.cancel_token.clone(),
                tx.clone(),
            ));
        }

        let monitor = run_monitor(
            engine,
            timing.interval,
            self.cancel_token.clone(),
            tx.clone(),
        );

        let outcome = tokio::select! {
            result = monitor => result,
            _ = interrupt => {
                tracing::info!("Shutdown requested");
                Ok(StopReason::UserRequested)
            }
        };

        self.cancel_token.cancel();
        let reason = match &outcome {
            Ok(reason) => *reason,
            Err(_) => StopReason::UserRequested,
        };
        if tx.send(MonitorEvent::Stopped(reason)).await.is_err() {
            tracing::warn!("presenter gone before stop notice");
        }
        drop(tx);

        while let Some(joined) = helpers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("keyboard listener failed: {}", e),
                Err(e) => tracing::error!("keyboard task panicked: {}", e),
            }
        }

        let stats = match presenter.await {
            Ok(Ok(stats)) => stats,
            Ok(Err(e)) => {
                tracing::warn!("status output failed: {}", e);
                SessionStats::default()
            }
            Err(e) => {
                tracing::error!("presenter task panicked: {}", e);
                SessionStats::default()
            }
        };

        outcome.map(|reason| (reason, stats))
    }
}
