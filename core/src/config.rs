//! Tunables for every subsystem, grouped one struct per concern.
//!
//! Defaults carry the reference balance numbers. A whole `GameConfig`
//! can also be loaded from JSON for balance experiments without a
//! rebuild.

use crate::{staffing::StaffRoleId, types::Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConfig {
    pub money: i64,
    pub reputation: i32,
    pub uptime: f64,
    pub power_max_mw: f64,
    pub space_max: u32,
    pub cooling_health: i32,
    pub start_hour: u8,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            money: 100_000,
            reputation: 50,
            uptime: 100.0,
            power_max_mw: 5.0,
            space_max: 100,
            cooling_health: 100,
            start_hour: 9,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfig {
    pub vendor_fee: i64,
    /// Countdown units knocked off the timer at assignment, per role.
    pub noc_time_reduction: u32,
    pub l2_time_reduction: u32,
    pub vendor_time_reduction: u32,
    /// Wall steps between assignment and the resolution roll.
    pub resolve_check_delay: Tick,
    pub resolve_reputation_bonus: i32,
    pub fail_reputation_penalty: i32,
    pub fail_uptime_penalty: f64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            vendor_fee: 2_000,
            noc_time_reduction: 120,
            l2_time_reduction: 180,
            vendor_time_reduction: 60,
            resolve_check_delay: 1,
            resolve_reputation_bonus: 10,
            fail_reputation_penalty: 15,
            fail_uptime_penalty: 2.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerConfig {
    pub per_rack_mw: f64,
    pub base_load_mw: f64,
    pub overload_uptime_penalty: f64,
    pub overload_reputation_penalty: i32,
    /// Fraction of capacity demand is shed to during an overload.
    pub shed_factor: f64,
    pub upgrade_cost: i64,
    pub upgrade_step_mw: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            per_rack_mw: 0.25,
            base_load_mw: 0.5,
            overload_uptime_penalty: 0.5,
            overload_reputation_penalty: 5,
            shed_factor: 0.95,
            upgrade_cost: 25_000,
            upgrade_step_mw: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoolingConfig {
    pub decay_chance: f64,
    pub failure_threshold: i32,
    pub failure_chance: f64,
    pub failure_ticket_timer: u32,
    pub failure_ticket_penalty: i64,
    pub maintenance_cost: i64,
    pub maintenance_restore: i32,
}

impl Default for CoolingConfig {
    fn default() -> Self {
        Self {
            decay_chance: 0.02,
            failure_threshold: 50,
            failure_chance: 0.1,
            failure_ticket_timer: 240,
            failure_ticket_penalty: 8_000,
            maintenance_cost: 5_000,
            maintenance_restore: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub sla_met_gain: f64,
    pub sla_miss_loss: f64,
    pub churn_warning_threshold: f64,
    pub churn_warning_chance: f64,
    pub renewal_interval_days: u32,
    pub renewal_satisfaction_bonus: f64,
    pub lost_reputation_penalty: i32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sla_met_gain: 0.5,
            sla_miss_loss: 2.0,
            churn_warning_threshold: 30.0,
            churn_warning_chance: 0.1,
            renewal_interval_days: 30,
            renewal_satisfaction_bonus: 10.0,
            lost_reputation_penalty: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// One roll per tick gating the whole minor-event pass.
    pub gate_chance: f64,
    pub disk_failure_chance: f64,
    pub vendor_sale_chance: f64,
    pub power_spike_chance: f64,
    pub sick_day_chance: f64,
    pub network_issue_chance: f64,
    pub competitor_poach_chance: f64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            gate_chance: 0.1,
            disk_failure_chance: 0.05,
            vendor_sale_chance: 0.03,
            power_spike_chance: 0.04,
            sick_day_chance: 0.06,
            network_issue_chance: 0.04,
            competitor_poach_chance: 0.02,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub name: String,
    pub role: StaffRoleId,
    pub salary: i64,
    pub skill: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffingConfig {
    pub mood_shift_chance: f64,
    /// Wall steps before a sick staffer returns.
    pub sick_return_delay: Tick,
    pub candidates: Vec<CandidateConfig>,
}

impl Default for StaffingConfig {
    fn default() -> Self {
        Self {
            mood_shift_chance: 0.1,
            sick_return_delay: 4,
            candidates: vec![
                CandidateConfig {
                    name: "Alex Chen".into(),
                    role: StaffRoleId::L2,
                    salary: 68_000,
                    skill: 0.85,
                    notes: "Fast learner, nervous under pressure".into(),
                },
                CandidateConfig {
                    name: "Sam Rodriguez".into(),
                    role: StaffRoleId::L2,
                    salary: 72_000,
                    skill: 0.90,
                    notes: "Experienced, wants more money".into(),
                },
                CandidateConfig {
                    name: "Jordan Park".into(),
                    role: StaffRoleId::L3,
                    salary: 98_000,
                    skill: 0.95,
                    notes: "Overqualified, may leave for better offer".into(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientOfferConfig {
    pub name: String,
    pub monthly_revenue: i64,
    pub sla: f64,
    pub racks: u32,
    pub power_mw: f64,
    pub space_units: u32,
    pub reputation_bonus: i32,
    pub starting_satisfaction: f64,
}

impl Default for ClientOfferConfig {
    fn default() -> Self {
        Self {
            name: "TechFlow Inc".into(),
            monthly_revenue: 8_000,
            sla: 99.5,
            racks: 10,
            power_mw: 2.5,
            space_units: 50,
            reputation_bonus: 2,
            starting_satisfaction: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryConfig {
    /// Wall steps from game start to the first scripted ticket.
    pub first_ticket_delay: Tick,
    pub offer_delay_after_resolve: Tick,
    pub offer_delay_after_fail: Tick,
    pub hiring_delay_after_accept: Tick,
    pub hiring_delay_after_decline: Tick,
    pub offer: ClientOfferConfig,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            first_ticket_delay: 15,
            offer_delay_after_resolve: 5,
            offer_delay_after_fail: 8,
            hiring_delay_after_accept: 4,
            hiring_delay_after_decline: 8,
            offer: ClientOfferConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndingConfig {
    pub bankruptcy_floor: i64,
    pub win_day: u32,
    pub win_uptime: f64,
    pub revenue_target: i64,
}

impl Default for EndingConfig {
    fn default() -> Self {
        Self {
            bankruptcy_floor: -50_000,
            win_day: 90,
            win_uptime: 99.9,
            revenue_target: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub start: StartConfig,
    #[serde(default)]
    pub tickets: TicketConfig,
    #[serde(default)]
    pub power: PowerConfig,
    #[serde(default)]
    pub cooling: CoolingConfig,
    #[serde(default)]
    pub clients: ClientConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub staffing: StaffingConfig,
    #[serde(default)]
    pub story: StoryConfig,
    #[serde(default)]
    pub endings: EndingConfig,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
