use std::io::Write;

use winwatch_core::Alerter;

/// Rings the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Alerter for TerminalBell {
    fn alert(&self) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::debug!("failed to ring bell: {}", e);
        }
    }
}

/// Alerter for `--no-bell`; detections still show on the status line
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Alerter for Silent {
    fn alert(&self) {
        tracing::trace!("alert suppressed");
    }
}

pub fn from_config(bell: bool) -> Box<dyn Alerter> {
    if bell {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}
