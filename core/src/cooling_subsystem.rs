//! Cooling subsystem.
//!
//! Health decays stochastically each tick; below the failure threshold
//! a further roll can spawn a P1 ticket. Maintenance is a player
//! action that restores health for a fee.

use crate::{
    config::CoolingConfig,
    error::{ActionError, SimResult},
    event::SimEvent,
    rng::SubsystemRng,
    state::GameState,
    subsystem::Subsystem,
    tickets::{self, Priority},
    timer::TimerQueue,
};

pub struct CoolingSubsystem {
    cfg: CoolingConfig,
}

impl CoolingSubsystem {
    pub fn new(cfg: CoolingConfig) -> Self {
        Self { cfg }
    }
}

impl Subsystem for CoolingSubsystem {
    fn name(&self) -> &'static str {
        "cooling"
    }

    fn update(
        &mut self,
        state: &mut GameState,
        _timers: &mut TimerQueue,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();

        if rng.chance(self.cfg.decay_chance) {
            state.add_cooling_health(-1);
        }

        if state.cooling_health < self.cfg.failure_threshold
            && rng.chance(self.cfg.failure_chance)
        {
            log::error!(
                "COOLING FAILURE at health {}: temperatures rising",
                state.cooling_health
            );
            let affected = state.clients.len() as u32;
            let (ticket_id, created) = tickets::file_ticket(
                state,
                "CRITICAL: AC Unit Failure",
                "Primary cooling unit has failed. Temperatures rising in all rows.",
                Priority::P1,
                self.cfg.failure_ticket_timer,
                affected,
                self.cfg.failure_ticket_penalty,
            );
            events.push(SimEvent::CoolingFailure { ticket_id });
            events.push(created);
        }

        Ok(events)
    }
}

/// Player action: service the AC units.
pub fn maintain(state: &mut GameState, cfg: &CoolingConfig) -> Result<Vec<SimEvent>, ActionError> {
    if state.money < cfg.maintenance_cost {
        return Err(ActionError::InsufficientFunds {
            needed: cfg.maintenance_cost,
            available: state.money,
        });
    }
    state.money -= cfg.maintenance_cost;
    state.add_cooling_health(cfg.maintenance_restore);
    log::info!(
        "cooling maintained: health restored to {}%",
        state.cooling_health
    );
    Ok(vec![SimEvent::CoolingMaintained {
        health: state.cooling_health,
        cost: cfg.maintenance_cost,
    }])
}
