//! End-condition evaluator — runs once per day, after settlement.

use crate::{config::EndingConfig, state::GameState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Bankrupt,
    Fired,
    UptimeStreak,
    RevenueTarget,
}

impl EndReason {
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Bankrupt => "Bankrupt! The bank seized your assets.",
            Self::Fired => "Fired! The board lost confidence in your leadership.",
            Self::UptimeStreak => "Perfect! 90 days at 99.9% uptime!",
            Self::RevenueTarget => "Champion! $1M monthly revenue achieved!",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GameOutcome {
    Won { reason: EndReason },
    Lost { reason: EndReason },
}

/// Check lose conditions first, then wins. First match ends the game.
pub fn evaluate(state: &GameState, cfg: &EndingConfig) -> Option<GameOutcome> {
    if state.money < cfg.bankruptcy_floor {
        return Some(GameOutcome::Lost {
            reason: EndReason::Bankrupt,
        });
    }
    if state.reputation <= 0 {
        return Some(GameOutcome::Lost {
            reason: EndReason::Fired,
        });
    }
    if state.clock.day >= cfg.win_day && state.uptime >= cfg.win_uptime {
        return Some(GameOutcome::Won {
            reason: EndReason::UptimeStreak,
        });
    }
    if state.monthly_revenue() >= cfg.revenue_target {
        return Some(GameOutcome::Won {
            reason: EndReason::RevenueTarget,
        });
    }
    None
}
