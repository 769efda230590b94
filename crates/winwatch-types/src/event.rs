use std::path::PathBuf;

use chrono::{DateTime, Local};

/// Result of a single engine tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Found { alerted: bool },
    NotFound,
    CaptureFailed(String),
    Saved { index: u64, path: PathBuf },
    SaveFailed { index: u64, reason: String },
    /// Heartbeat emitted while paused, nothing was captured
    Paused,
}

impl TickOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, TickOutcome::Found { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub tick_index: u64,
    pub timestamp: DateTime<Local>,
    pub paused: bool,
    pub outcome: TickOutcome,
    pub streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    WindowClosed,
    UserRequested,
}

/// Events sent from the monitor tasks to the presenter
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    Status(StatusRecord),
    PauseToggled { paused: bool },
    Stopped(StopReason),
}
