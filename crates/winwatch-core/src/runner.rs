use std::time::Duration;

use kanal::AsyncSender;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use winwatch_types::{MonitorEvent, StopReason};

use crate::engine::{MonitorEngine, Tick};
use crate::error::MonitorError;

/// Drive `engine` on a fixed period until the window disappears or `cancel`
/// fires.
///
/// The first tick runs immediately. Each tick executes on the blocking pool
/// with the engine moved in and handed back, so ticks never overlap; a slow
/// tick delays the schedule instead of queueing a burst.
pub async fn run_monitor(
    mut engine: MonitorEngine,
    period: Duration,
    cancel: CancellationToken,
    events: AsyncSender<MonitorEvent>,
) -> Result<StopReason, MonitorError> {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        "monitoring window {} every {:?}",
        engine.window().id,
        period
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                engine.stop();
                return Ok(StopReason::UserRequested);
            }
            _ = interval.tick() => {}
        }

        let handle = tokio::task::spawn_blocking(move || {
            let tick = engine.tick();
            (engine, tick)
        });

        let (returned, tick) = tokio::select! {
            // An in-flight capture is left to finish on its own
            _ = cancel.cancelled() => return Ok(StopReason::UserRequested),
            joined = handle => joined.map_err(|e| MonitorError::TickTask(e.to_string()))?,
        };
        engine = returned;

        match tick {
            Tick::Status(record) => {
                if events.send(MonitorEvent::Status(record)).await.is_err() {
                    tracing::warn!("status channel closed, stopping monitor");
                    return Ok(StopReason::UserRequested);
                }
            }
            Tick::Stopped(reason) => {
                tracing::info!("monitor stopped: {:?}", reason);
                return Ok(reason);
            }
        }
    }
}
