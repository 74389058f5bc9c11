//! Save-game serialization — the full session to/from JSON.
//!
//! A save captures everything needed to resume: the state aggregate,
//! the pending timer queue, and the master seed. Round-trip is
//! lossless; a corrupt blob surfaces as an error, never as a partial
//! state.

use crate::{error::SimResult, state::GameState, timer::TimerQueue};
use serde::{Deserialize, Serialize};

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveGame {
    pub version: u32,
    pub seed: u64,
    pub state: GameState,
    pub timers: TimerQueue,
}

impl SaveGame {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
