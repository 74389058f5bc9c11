//! Simulated game clock — day/hour/minute, rollover boundaries, pause.
//!
//! The clock advances only when the engine steps it and the game is not
//! paused. Wall-paced timers are the engine's concern; pausing freezes
//! nothing but this clock.

use serde::{Deserialize, Serialize};

/// Minutes added per unpaused engine step.
pub const MINUTES_PER_STEP: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameClock {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
    pub paused: bool,
}

/// Which boundaries were crossed by a single `advance()` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boundaries {
    pub hour_rolled: bool,
    pub day_rolled: bool,
}

impl GameClock {
    pub fn new(start_hour: u8) -> Self {
        Self {
            day: 1,
            hour: start_hour,
            minute: 0,
            paused: false,
        }
    }

    /// Advance simulated time by one step (+10 minutes).
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self) -> Boundaries {
        assert!(!self.paused, "advance() called on paused clock");
        let mut crossed = Boundaries::default();

        self.minute += MINUTES_PER_STEP;
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
            crossed.hour_rolled = true;
        }
        if self.hour >= 24 {
            self.hour = 0;
            self.day += 1;
            crossed.day_rolled = true;
        }
        crossed
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Inbox-style timestamp: `Day 3 09:40`.
    pub fn timestamp(&self) -> String {
        format!("Day {} {:02}:{:02}", self.day, self.hour, self.minute)
    }
}
