//! Staffing & payroll — headcount, skill, mood, hiring.

use crate::{
    config::StaffingConfig,
    error::ActionError,
    event::SimEvent,
    rng::SubsystemRng,
    state::GameState,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five fixed roles on the floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StaffRoleId {
    Noc,
    L2,
    L3,
    Sales,
    Facilities,
}

impl StaffRoleId {
    pub const ALL: [StaffRoleId; 5] = [
        Self::Noc,
        Self::L2,
        Self::L3,
        Self::Sales,
        Self::Facilities,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Noc => "noc",
            Self::L2 => "l2",
            Self::L3 => "l3",
            Self::Sales => "sales",
            Self::Facilities => "facilities",
        }
    }
}

impl fmt::Display for StaffRoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffRole {
    pub count: u32,
    pub max: u32,
    /// Annual salary per head.
    pub salary: i64,
    /// Success probability when this role works a ticket.
    pub skill: f64,
    /// 0–100, drifts ±1 stochastically each hour.
    pub mood: i32,
}

impl StaffRole {
    fn new(count: u32, max: u32, salary: i64, skill: f64, mood: i32) -> Self {
        Self {
            count,
            max,
            salary,
            skill,
            mood,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffRoster {
    pub noc: StaffRole,
    pub l2: StaffRole,
    pub l3: StaffRole,
    pub sales: StaffRole,
    pub facilities: StaffRole,
}

impl Default for StaffRoster {
    fn default() -> Self {
        Self {
            noc: StaffRole::new(2, 5, 45_000, 0.5, 80),
            l2: StaffRole::new(1, 3, 65_000, 0.8, 85),
            l3: StaffRole::new(0, 2, 95_000, 0.95, 90),
            sales: StaffRole::new(1, 3, 50_000, 0.7, 75),
            facilities: StaffRole::new(1, 3, 40_000, 0.6, 80),
        }
    }
}

impl StaffRoster {
    pub fn get(&self, role: StaffRoleId) -> &StaffRole {
        match role {
            StaffRoleId::Noc => &self.noc,
            StaffRoleId::L2 => &self.l2,
            StaffRoleId::L3 => &self.l3,
            StaffRoleId::Sales => &self.sales,
            StaffRoleId::Facilities => &self.facilities,
        }
    }

    pub fn get_mut(&mut self, role: StaffRoleId) -> &mut StaffRole {
        match role {
            StaffRoleId::Noc => &mut self.noc,
            StaffRoleId::L2 => &mut self.l2,
            StaffRoleId::L3 => &mut self.l3,
            StaffRoleId::Sales => &mut self.sales,
            StaffRoleId::Facilities => &mut self.facilities,
        }
    }

    /// Total annual salary commitment across all heads.
    pub fn annual_salaries(&self) -> i64 {
        StaffRoleId::ALL
            .iter()
            .map(|&r| {
                let role = self.get(r);
                role.count as i64 * role.salary
            })
            .sum()
    }
}

/// Hourly: each role has a small chance of a ±1 mood shift, fair coin
/// for direction, clamped to [0, 100].
pub fn hourly_mood_drift(state: &mut GameState, cfg: &StaffingConfig, rng: &mut SubsystemRng) {
    for role_id in StaffRoleId::ALL {
        if !rng.chance(cfg.mood_shift_chance) {
            continue;
        }
        let delta = if rng.coin() { 1 } else { -1 };
        let role = state.staff.get_mut(role_id);
        role.mood = (role.mood + delta).clamp(0, 100);
        log::debug!("mood drift: {role_id} {delta:+}");
    }
}

/// Daily: one day's worth of annual salaries, floored. Returns the
/// amount deducted.
pub fn daily_payroll(state: &mut GameState) -> i64 {
    let cost = state.staff.annual_salaries() / 365;
    state.money -= cost;
    cost
}

/// Hire a pre-screened candidate: one month of salary up front, then
/// the role's headcount grows. Deliberately does NOT check the role's
/// `max` — only ticket assignment cares about availability.
pub fn hire(
    state: &mut GameState,
    cfg: &StaffingConfig,
    index: usize,
) -> Result<Vec<SimEvent>, ActionError> {
    let candidate = cfg
        .candidates
        .get(index)
        .ok_or(ActionError::UnknownCandidate { index })?;

    let first_month = candidate.salary / 12;
    if state.money < first_month {
        return Err(ActionError::InsufficientFunds {
            needed: first_month,
            available: state.money,
        });
    }

    state.money -= first_month;
    state.staff.get_mut(candidate.role).count += 1;

    log::info!("hired {} as {}", candidate.name, candidate.role);
    Ok(vec![SimEvent::StaffHired {
        name: candidate.name.clone(),
        role: candidate.role,
    }])
}
