/// Consecutive-detection counter with the alert-every-other-hit policy.
///
/// A hit alerts when it makes the streak odd (1st, 3rd, 5th...), so a
/// condition that stays true across polls rings on every second tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreakTracker {
    consecutive: u32,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a detection and return whether it should alert
    pub fn record_found(&mut self) -> bool {
        self.consecutive = self.consecutive.saturating_add(1);
        should_alert(self.consecutive)
    }

    pub fn reset(&mut self) {
        self.consecutive = 0;
    }

    pub fn current(&self) -> u32 {
        self.consecutive
    }
}

fn should_alert(streak: u32) -> bool {
    streak % 2 == 1
}
