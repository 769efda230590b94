use std::sync::atomic::{AtomicBool, Ordering};

/// Pause flag shared between the keyboard listener and the poll loop.
///
/// Turning pause on also raises a pending streak reset that the engine
/// consumes on its next tick, so a pause and resume that both happen
/// between two ticks still break the detection streak.
#[derive(Debug, Default)]
pub struct PauseControl {
    paused: AtomicBool,
    streak_reset: AtomicBool,
}

impl PauseControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the pause flag and return the new value
    pub fn toggle(&self) -> bool {
        let paused = !self.paused.fetch_xor(true, Ordering::SeqCst);
        if paused {
            self.streak_reset.store(true, Ordering::SeqCst);
        }
        paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub(crate) fn take_streak_reset(&self) -> bool {
        self.streak_reset.swap(false, Ordering::SeqCst)
    }
}

/// Snapshot of the engine counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    pub tick_count: u64,
    pub is_paused: bool,
    pub consecutive_detections: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates() {
        let pause = PauseControl::new();
        assert!(!pause.is_paused());
        assert!(pause.toggle());
        assert!(pause.is_paused());
        assert!(!pause.toggle());
        assert!(!pause.is_paused());
    }

    #[test]
    fn test_reset_only_raised_when_pausing() {
        let pause = PauseControl::new();
        assert!(!pause.take_streak_reset());

        pause.toggle();
        assert!(pause.take_streak_reset());
        // Consumed
        assert!(!pause.take_streak_reset());

        // Resuming does not raise it again
        pause.toggle();
        assert!(!pause.take_streak_reset());
    }
}
