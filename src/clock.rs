//! Game clock
//!
//! Counts whole seconds, either up (untimed modes, for stats) or down from a
//! limit (timed modes). The owner delivers ticks; the clock never reads the
//! wall time itself.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Clock direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ClockMode {
    CountUp,
    CountDown { limit_secs: u64 },
}

/// Serializable clock state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    pub mode: ClockMode,
    pub elapsed_secs: u64,
    pub running: bool,
}

impl ClockState {
    /// Seconds left, only for count-down clocks
    #[must_use]
    pub const fn remaining_secs(&self) -> Option<u64> {
        match self.mode {
            ClockMode::CountUp => None,
            ClockMode::CountDown { limit_secs } => Some(limit_secs.saturating_sub(self.elapsed_secs)),
        }
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self.remaining_secs(), Some(0))
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One second elapsed
    Advanced,
    /// Clock is paused, nothing changed
    Paused,
    /// Count-down reached zero (on this tick or earlier)
    Expired,
}

#[derive(Debug, Clone)]
pub struct GameClock {
    state: ClockState,
}

impl GameClock {
    #[must_use]
    pub const fn count_up() -> Self {
        Self::with_mode(ClockMode::CountUp)
    }

    #[must_use]
    pub const fn count_down(limit_secs: u64) -> Self {
        Self::with_mode(ClockMode::CountDown { limit_secs })
    }

    const fn with_mode(mode: ClockMode) -> Self {
        Self {
            state: ClockState {
                mode,
                elapsed_secs: 0,
                running: true,
            },
        }
    }

    #[must_use]
    pub const fn restore(state: ClockState) -> Self {
        Self { state }
    }

    #[must_use]
    pub const fn state(&self) -> ClockState {
        self.state
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> u64 {
        self.state.elapsed_secs
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> Option<u64> {
        self.state.remaining_secs()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Tick {
        if self.state.is_expired() {
            self.state.running = false;
            return Tick::Expired;
        }
        if !self.state.running {
            return Tick::Paused;
        }

        self.state.elapsed_secs += 1;
        if self.state.is_expired() {
            self.state.running = false;
            info!(elapsed = self.state.elapsed_secs, "clock expired");
            return Tick::Expired;
        }
        Tick::Advanced
    }

    pub fn pause(&mut self) {
        self.state.running = false;
    }

    /// Resume ticking; an expired clock stays stopped
    pub fn resume(&mut self) {
        if !self.state.is_expired() {
            self.state.running = true;
        }
    }

    /// Stop permanently (session over)
    pub fn stop(&mut self) {
        self.state.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_up_only_tracks_elapsed() {
        let mut clock = GameClock::count_up();
        for _ in 0..10 {
            assert_eq!(clock.tick(), Tick::Advanced);
        }
        assert_eq!(clock.elapsed_secs(), 10);
        assert_eq!(clock.remaining_secs(), None);
    }

    #[test]
    fn count_down_expires_at_zero() {
        let mut clock = GameClock::count_down(3);
        assert_eq!(clock.tick(), Tick::Advanced);
        assert_eq!(clock.tick(), Tick::Advanced);
        assert_eq!(clock.remaining_secs(), Some(1));
        assert_eq!(clock.tick(), Tick::Expired);
        assert_eq!(clock.remaining_secs(), Some(0));
        assert!(!clock.is_running());

        // Further ticks change nothing
        assert_eq!(clock.tick(), Tick::Expired);
        assert_eq!(clock.elapsed_secs(), 3);
    }

    #[test]
    fn paused_ticks_are_no_ops() {
        let mut clock = GameClock::count_down(60);
        clock.tick();
        clock.pause();
        for _ in 0..5 {
            assert_eq!(clock.tick(), Tick::Paused);
        }
        assert_eq!(clock.elapsed_secs(), 1);

        clock.resume();
        assert_eq!(clock.tick(), Tick::Advanced);
        assert_eq!(clock.elapsed_secs(), 2);
    }

    #[test]
    fn expired_clock_cannot_resume() {
        let mut clock = GameClock::count_down(1);
        assert_eq!(clock.tick(), Tick::Expired);
        clock.resume();
        assert!(!clock.is_running());
    }

    #[test]
    fn zero_limit_expires_on_first_tick() {
        let mut clock = GameClock::count_down(0);
        assert_eq!(clock.tick(), Tick::Expired);
        assert_eq!(clock.elapsed_secs(), 0);
    }

    #[test]
    fn state_survives_serialization() {
        let mut clock = GameClock::count_down(90);
        clock.tick();
        clock.tick();
        clock.pause();

        let json = serde_json::to_string(&clock.state()).unwrap();
        let restored = GameClock::restore(serde_json::from_str(&json).unwrap());
        assert_eq!(restored.state(), clock.state());
        assert_eq!(restored.remaining_secs(), Some(88));
        assert!(!restored.is_running());
    }
}
