use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::style::{Print, Stylize, style};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use kanal::AsyncReceiver;
use winwatch_types::{MonitorEvent, StatusRecord, StopReason, TickOutcome};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counters shown when the session ends
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub found: u64,
    pub alerts: u64,
    pub saved: u64,
    pub error_count: u64,
}

impl SessionStats {
    fn record(&mut self, record: &StatusRecord) {
        if record.paused {
            return;
        }
        self.ticks += 1;

        match &record.outcome {
            TickOutcome::Found { alerted } => {
                self.found += 1;
                self.alerts += u64::from(*alerted);
            }
            TickOutcome::Saved { .. } => self.saved += 1,
            TickOutcome::CaptureFailed(_) | TickOutcome::SaveFailed { .. } => self.error_count += 1,
            TickOutcome::NotFound | TickOutcome::Paused => {}
        }
    }
}

/// Single-line status text for a tick
pub fn render_status(record: &StatusRecord, save_mode: bool) -> String {
    if record.paused {
        return format!(
            "{}",
            style(format!(
                "⏸  PAUSED • [SPACE to resume] • Scan #{}",
                record.tick_index
            ))
            .yellow()
        );
    }

    let at = record.timestamp.format(TIMESTAMP_FORMAT);
    match &record.outcome {
        TickOutcome::Saved { index, path } => format!(
            "{} Screenshot #{} saved at {}  {}",
            style("📸").green(),
            index,
            at,
            style(path.display()).dark_grey()
        ),
        TickOutcome::SaveFailed { index, reason } => format!(
            "{}",
            style(format!("❌ Failed to save screenshot #{index}: {reason}")).red()
        ),
        TickOutcome::CaptureFailed(reason) if save_mode => format!(
            "{}",
            style(format!(
                "❌ Failed to capture screenshot #{}: {}",
                record.tick_index, reason
            ))
            .red()
        ),
        outcome => {
            let base = format!(
                "{}@ {}  {}",
                style(format!("🔍 Scan #{} ", record.tick_index)).cyan(),
                at,
                style("[SPACE to pause]").yellow()
            );
            let tail = match outcome {
                TickOutcome::Found { alerted: true } => format!(
                    "{}  (streak: {})",
                    style("FOUND 🔔").green(),
                    record.streak
                ),
                TickOutcome::Found { alerted: false } => {
                    format!("{}  (streak: {})", style("FOUND").green(), record.streak)
                }
                TickOutcome::NotFound => format!("{}", style("Not found").yellow()),
                TickOutcome::CaptureFailed(_) => format!("{}", style("Capture failed").red()),
                _ => String::new(),
            };
            format!("{base}  - {tail}")
        }
    }
}

/// Owns the terminal output while a session runs.
///
/// Tick status rewrites the current line; notices get lines of their own.
/// Lines end in `\r\n` because the keyboard listener keeps the terminal in
/// raw mode.
pub struct Presenter<W: Write> {
    out: W,
    save_mode: bool,
    stats: SessionStats,
    line_open: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, save_mode: bool) -> Self {
        Self {
            out,
            save_mode,
            stats: SessionStats::default(),
            line_open: false,
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render one event; returns false once the session has stopped
    pub fn handle(&mut self, event: &MonitorEvent) -> io::Result<bool> {
        match event {
            MonitorEvent::Status(record) => {
                self.stats.record(record);
                let text = render_status(record, self.save_mode);
                match &record.outcome {
                    // Save mode keeps one line per screenshot
                    TickOutcome::Saved { .. } | TickOutcome::SaveFailed { .. } => {
                        self.notice(&text)?
                    }
                    TickOutcome::CaptureFailed(_) if self.save_mode => self.notice(&text)?,
                    _ => self.rewrite(&text)?,
                }
                Ok(true)
            }
            MonitorEvent::PauseToggled { paused: true } => {
                let text = style("⏸  PAUSED - Press SPACE to resume (streak reset)").yellow();
                self.notice(&text.to_string())?;
                Ok(true)
            }
            MonitorEvent::PauseToggled { paused: false } => {
                let text = style("▶️  RESUMED - Scanning continues").green();
                self.notice(&text.to_string())?;
                Ok(true)
            }
            MonitorEvent::Stopped(reason) => {
                let text = match reason {
                    StopReason::WindowClosed => {
                        style("Window closed or no longer available. Stopping monitoring.").red()
                    }
                    StopReason::UserRequested => style("Monitoring stopped by user.").yellow(),
                };
                self.notice(&text.to_string())?;
                Ok(false)
            }
        }
    }

    fn rewrite(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()?;
        self.line_open = true;
        Ok(())
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        if self.line_open {
            write!(self.out, "\r\n")?;
            self.line_open = false;
        }
        execute!(self.out, Print(text), Print("\r\n"))
    }
}

/// Drain monitor events into `presenter` until the session stops
pub async fn present<W: Write>(
    rx: AsyncReceiver<MonitorEvent>,
    mut presenter: Presenter<W>,
) -> anyhow::Result<SessionStats> {
    while let Ok(event) = rx.recv().await {
        if !presenter.handle(&event)? {
            break;
        }
    }

    let stats = presenter.stats().clone();
    tracing::info!(
        "session ended: {} ticks, {} found, {} alerts, {} saved, {} errors",
        stats.ticks,
        stats.found,
        stats.alerts,
        stats.saved,
        stats.error_count
    );
    Ok(stats)
}
