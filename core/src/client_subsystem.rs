//! Client/contract engine.
//!
//! Satisfaction tracks uptime against each client's SLA; every 30th
//! simulated day contracts face a renewal roll; clients at or below
//! zero satisfaction are pruned at the end of the same pass.

use crate::{
    config::ClientConfig,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    state::GameState,
    subsystem::Subsystem,
    timer::TimerQueue,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub name: String,
    pub monthly_revenue: i64,
    /// Uptime percentage this client contractually expects.
    pub sla: f64,
    pub racks: u32,
    /// 0–100; at or below 0 the contract is gone.
    pub satisfaction: f64,
}

pub struct ClientSubsystem {
    cfg: ClientConfig,
}

impl ClientSubsystem {
    pub fn new(cfg: ClientConfig) -> Self {
        Self { cfg }
    }
}

impl Subsystem for ClientSubsystem {
    fn name(&self) -> &'static str {
        "clients"
    }

    fn update(
        &mut self,
        state: &mut GameState,
        _timers: &mut TimerQueue,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        let uptime = state.uptime;
        let renewal_day = state.clock.day > 0
            && state.clock.day % self.cfg.renewal_interval_days == 0;
        let mut reputation_hit = 0;

        for client in &mut state.clients {
            if uptime >= client.sla {
                client.satisfaction = (client.satisfaction + self.cfg.sla_met_gain).min(100.0);
            } else {
                // No floor here: negative satisfaction marks the client
                // for pruning below.
                client.satisfaction -= self.cfg.sla_miss_loss;
            }

            if client.satisfaction < self.cfg.churn_warning_threshold
                && rng.chance(self.cfg.churn_warning_chance)
            {
                log::warn!(
                    "{} threatening to leave (satisfaction {:.0}%)",
                    client.name,
                    client.satisfaction
                );
                events.push(SimEvent::ChurnWarning {
                    name: client.name.clone(),
                    satisfaction: client.satisfaction,
                });
            }

            if renewal_day {
                if renew(client, self.cfg.renewal_satisfaction_bonus, rng) {
                    log::info!("{} renewed contract", client.name);
                    events.push(SimEvent::ContractRenewed {
                        name: client.name.clone(),
                    });
                } else {
                    log::error!(
                        "{} did not renew; lost ${}/mo",
                        client.name,
                        client.monthly_revenue
                    );
                    reputation_hit += self.cfg.lost_reputation_penalty;
                    events.push(SimEvent::ContractLost {
                        name: client.name.clone(),
                        monthly_revenue: client.monthly_revenue,
                    });
                }
            }
        }

        state.add_reputation(-reputation_hit);

        // Pruning is a side effect of the pass, not a separate step.
        state.clients.retain(|c| c.satisfaction > 0.0);

        Ok(events)
    }
}

/// Renewal roll: succeeds iff a uniform draw lands under
/// satisfaction/100. On loss satisfaction is forced to 0 so the prune
/// picks the client up; on success it gets a capped bonus.
pub fn renew(client: &mut Client, bonus: f64, rng: &mut SubsystemRng) -> bool {
    let renewal_chance = client.satisfaction / 100.0;
    if rng.next_f64() > renewal_chance {
        client.satisfaction = 0.0;
        false
    } else {
        client.satisfaction = (client.satisfaction + bonus).min(100.0);
        true
    }
}

/// Daily revenue: one day's slice of each monthly contract, floored.
/// Returns the amount credited.
pub fn collect_daily_revenue(state: &mut GameState) -> i64 {
    let revenue: i64 = state
        .clients
        .iter()
        .map(|c| c.monthly_revenue / 30)
        .sum();
    state.money += revenue;
    revenue
}
