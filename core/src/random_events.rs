//! Random minor events.
//!
//! A single coarse roll per tick decides whether the pass runs at all;
//! when it does, every event in the table is rolled independently
//! against its own probability — zero, one, or several may fire.

use crate::{
    config::EventsConfig,
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    staffing::StaffRoleId,
    state::{ActionKind, GameState, MessageDraft},
    subsystem::Subsystem,
    tickets::{self, Priority},
    timer::{TimerKind, TimerQueue},
    types::Tick,
};

const SPIKE_DAMAGE_CHANCE: f64 = 0.3;
const SPIKE_DAMAGE_COST: i64 = 2_000;
const SPIKE_UPTIME_PENALTY: f64 = 0.1;
const LATENCY_UPTIME_PENALTY: f64 = 0.05;
const POACH_SATISFACTION_HIT: f64 = 5.0;
const SALE_SERVER_PRICE: i64 = 6_400;

pub struct RandomEventsSubsystem {
    cfg: EventsConfig,
    sick_return_delay: Tick,
}

impl RandomEventsSubsystem {
    pub fn new(cfg: EventsConfig, sick_return_delay: Tick) -> Self {
        Self {
            cfg,
            sick_return_delay,
        }
    }
}

impl Subsystem for RandomEventsSubsystem {
    fn name(&self) -> &'static str {
        "events"
    }

    fn update(
        &mut self,
        state: &mut GameState,
        timers: &mut TimerQueue,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();

        if !rng.chance(self.cfg.gate_chance) {
            return Ok(events);
        }

        if rng.chance(self.cfg.disk_failure_chance) {
            log::warn!("disk failure on DC1-R12; ticket created");
            let (_, created) = tickets::file_ticket(
                state,
                "Disk Failure - DC1-R12",
                "Hard drive showing predictive failure signs.",
                Priority::P2,
                600,
                1,
                1_000,
            );
            events.push(created);
        }

        if rng.chance(self.cfg.vendor_sale_chance) {
            log::info!("vendor sale: servers 20% off");
            let mail = state.post_message(
                MessageDraft::new(
                    "sales@dell.com",
                    "Flash Sale: 20% Off Servers",
                    format!(
                        "This week only: all rack servers 20% off.\n\n\
                         R740: $8,000 -> ${SALE_SERVER_PRICE}\n\n\
                         Deal expires in 3 days."
                    ),
                )
                .with_action(
                    "Order R740",
                    ActionKind::OrderServer {
                        cost: SALE_SERVER_PRICE,
                    },
                ),
            );
            events.push(mail);
        }

        if rng.chance(self.cfg.power_spike_chance) {
            let damaged = rng.chance(SPIKE_DAMAGE_CHANCE);
            if damaged {
                log::error!("power spike caused equipment damage");
                state.money -= SPIKE_DAMAGE_COST;
                state.uptime -= SPIKE_UPTIME_PENALTY;
            } else {
                log::info!("power spike detected; UPS handled it");
            }
            events.push(SimEvent::PowerSpike { damaged });
        }

        if rng.chance(self.cfg.sick_day_chance) {
            let noc = state.staff.get_mut(StaffRoleId::Noc);
            if noc.count > 0 {
                noc.count -= 1;
                timers.schedule_wall(
                    state.wall_tick,
                    self.sick_return_delay,
                    TimerKind::StaffReturn {
                        role: StaffRoleId::Noc,
                    },
                );
                log::warn!("NOC tech sick; short staffed today");
                events.push(SimEvent::StaffSick {
                    role: StaffRoleId::Noc,
                    back_in: self.sick_return_delay,
                });
            }
        }

        if rng.chance(self.cfg.network_issue_chance) {
            log::warn!("network latency spike; investigating");
            state.uptime -= LATENCY_UPTIME_PENALTY;
            events.push(SimEvent::NetworkDegraded);
        }

        if rng.chance(self.cfg.competitor_poach_chance) {
            log::warn!("competitor offering lower prices to your clients");
            for client in &mut state.clients {
                client.satisfaction -= POACH_SATISFACTION_HIT;
            }
            events.push(SimEvent::CompetitorUndercut);
        }

        Ok(events)
    }
}
