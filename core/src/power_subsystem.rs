//! Power subsystem.
//!
//! Usage is recomputed from scratch every tick as a function of client
//! racks plus a constant infrastructure base load — never accumulated.
//! Overload is therefore self-limiting per tick but recurs every tick
//! demand still exceeds capacity.

use crate::{
    config::PowerConfig,
    error::{ActionError, SimResult},
    event::SimEvent,
    rng::SubsystemRng,
    state::{GameState, MessageDraft},
    subsystem::Subsystem,
    timer::TimerQueue,
};

pub struct PowerSubsystem {
    cfg: PowerConfig,
}

impl PowerSubsystem {
    pub fn new(cfg: PowerConfig) -> Self {
        Self { cfg }
    }
}

impl Subsystem for PowerSubsystem {
    fn name(&self) -> &'static str {
        "power"
    }

    fn update(
        &mut self,
        state: &mut GameState,
        _timers: &mut TimerQueue,
        _rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let demand: f64 = state
            .clients
            .iter()
            .map(|c| c.racks as f64 * self.cfg.per_rack_mw)
            .sum::<f64>()
            + self.cfg.base_load_mw;

        state.power_used_mw = demand;
        if demand <= state.power_max_mw {
            return Ok(vec![]);
        }

        // Overload: penalize, shed load to 95% of capacity, alert.
        log::error!(
            "POWER OVERLOAD: {demand:.2} MW demand vs {:.2} MW capacity",
            state.power_max_mw
        );
        state.uptime -= self.cfg.overload_uptime_penalty;
        state.add_reputation(-self.cfg.overload_reputation_penalty);
        state.power_used_mw = state.power_max_mw * self.cfg.shed_factor;

        let mail = state.post_message(
            MessageDraft::new(
                "FACILITIES ALERT",
                "CRITICAL: Power Overload Event",
                "Power consumption exceeded capacity. Emergency load shedding activated.\n\n\
                 Some client services may be degraded. Immediate action required."
                    .to_string(),
            )
            .urgent(),
        );

        Ok(vec![
            SimEvent::PowerOverload {
                used_mw: demand,
                max_mw: state.power_max_mw,
            },
            mail,
        ])
    }
}

/// Player action: buy more capacity.
pub fn upgrade(state: &mut GameState, cfg: &PowerConfig) -> Result<Vec<SimEvent>, ActionError> {
    if state.money < cfg.upgrade_cost {
        return Err(ActionError::InsufficientFunds {
            needed: cfg.upgrade_cost,
            available: state.money,
        });
    }
    state.money -= cfg.upgrade_cost;
    state.power_max_mw += cfg.upgrade_step_mw;
    log::info!(
        "power upgraded: +{} MW for ${}",
        cfg.upgrade_step_mw,
        cfg.upgrade_cost
    );
    Ok(vec![SimEvent::PowerUpgraded {
        new_max_mw: state.power_max_mw,
        cost: cfg.upgrade_cost,
    }])
}
