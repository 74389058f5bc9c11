//! Logical timer queue — the replacement for ad-hoc delayed callbacks.
//!
//! Two pacing classes exist, mirroring the two time sources of the
//! simulation:
//!   - `Wall`: counts engine steps and keeps running while paused
//!     (in-flight resolutions, story beat chaining, sick-day returns).
//!   - `Sim`: counts unpaused steps only.
//!
//! CONTRACT: a terminal game outcome clears the queue. Nothing fires
//! after game over or game win.

use crate::{staffing::StaffRoleId, story::StoryBeat, tickets::Assignee, types::{Tick, TicketId}};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    Wall,
    Sim,
}

/// What to do when a timer fires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerKind {
    /// One resolution roll for an assignment attempt.
    ResolutionCheck { ticket_id: TicketId, assignee: Assignee },
    /// The next scripted story beat becomes eligible.
    StoryBeat { beat: StoryBeat },
    /// A sick staffer comes back on duty.
    StaffReturn { role: StaffRoleId },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timer {
    pub fire_at: Tick,
    pub pacing: Pacing,
    pub kind: TimerKind,
}

/// Pending timers, owned by the engine and carried in the save game.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_wall(&mut self, now_wall: Tick, delay: Tick, kind: TimerKind) {
        self.timers.push(Timer {
            fire_at: now_wall + delay,
            pacing: Pacing::Wall,
            kind,
        });
    }

    pub fn schedule_sim(&mut self, now_sim: Tick, delay: Tick, kind: TimerKind) {
        self.timers.push(Timer {
            fire_at: now_sim + delay,
            pacing: Pacing::Sim,
            kind,
        });
    }

    /// Remove and return every timer due at the given clocks, ordered
    /// by deadline (insertion order breaks ties).
    pub fn take_due(&mut self, wall: Tick, sim: Tick) -> Vec<TimerKind> {
        let mut due: Vec<(Tick, usize, TimerKind)> = Vec::new();
        let mut remaining = Vec::with_capacity(self.timers.len());

        for (i, t) in self.timers.drain(..).enumerate() {
            let ready = match t.pacing {
                Pacing::Wall => t.fire_at <= wall,
                Pacing::Sim => t.fire_at <= sim,
            };
            if ready {
                due.push((t.fire_at, i, t.kind));
            } else {
                remaining.push(t);
            }
        }
        self.timers = remaining;

        due.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        due.into_iter().map(|(_, _, kind)| kind).collect()
    }

    /// Cancel everything. Called on terminal outcomes.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}
