//! Ticket lifecycle engine.
//!
//! open-unassigned → open-assigned → resolved, with timeout failure
//! sharing the same terminal flag. Every transition starts with an
//! idempotent `resolved` guard: a resolution roll racing a timeout is
//! silently absorbed, never double-applied.

use crate::{
    config::TicketConfig,
    error::ActionError,
    event::SimEvent,
    rng::SubsystemRng,
    staffing::StaffRoleId,
    state::{GameState, MessageDraft},
    timer::{TimerKind, TimerQueue},
    types::TicketId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    P1,
    P2,
}

/// Who a ticket can be handed to. Vendor is not a staffed role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Assignee {
    Noc,
    L2,
    Vendor,
}

impl Assignee {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noc => "NOC",
            Self::L2 => "L2",
            Self::Vendor => "VENDOR",
        }
    }

    /// The staffed role backing this assignee, if any.
    pub fn staff_role(&self) -> Option<StaffRoleId> {
        match self {
            Self::Noc => Some(StaffRoleId::Noc),
            Self::L2 => Some(StaffRoleId::L2),
            Self::Vendor => None,
        }
    }
}

/// A timed incident. `time_remaining` is in whole-hour countdown units:
/// it is seeded with second-scale magnitudes but decrements once per
/// simulated hour, as the balance numbers expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub time_remaining: u32,
    pub affected_clients: u32,
    pub penalty: i64,
    pub assigned: Option<Assignee>,
    pub resolved: bool,
}

/// Create a ticket in the open-unassigned state.
pub fn file_ticket(
    state: &mut GameState,
    title: &str,
    description: &str,
    priority: Priority,
    time_remaining: u32,
    affected_clients: u32,
    penalty: i64,
) -> (TicketId, SimEvent) {
    let id = state.alloc_ticket_id();
    state.tickets.push(Ticket {
        id,
        title: title.to_string(),
        description: description.to_string(),
        priority,
        time_remaining,
        affected_clients,
        penalty,
        assigned: None,
        resolved: false,
    });
    log::info!("ticket #{id} filed ({priority:?}): {title}");
    (
        id,
        SimEvent::TicketCreated {
            ticket_id: id,
            title: title.to_string(),
            priority,
        },
    )
}

/// Hand a ticket to a team. Missing or already-resolved tickets are a
/// silent no-op; an empty staffed role is a rejection with no state
/// change. Otherwise the role fee is charged, the countdown shortened,
/// and a wall-paced resolution roll scheduled.
pub fn assign(
    state: &mut GameState,
    timers: &mut TimerQueue,
    cfg: &TicketConfig,
    ticket_id: TicketId,
    assignee: Assignee,
) -> Result<Vec<SimEvent>, ActionError> {
    let Some(ticket) = state.ticket(ticket_id) else {
        return Ok(vec![]);
    };
    if ticket.resolved {
        return Ok(vec![]);
    }

    if let Some(role) = assignee.staff_role() {
        if state.staff.get(role).count == 0 {
            return Err(ActionError::NoStaffAvailable { role });
        }
    }

    let (cost, reduction) = match assignee {
        Assignee::Noc => (0, cfg.noc_time_reduction),
        Assignee::L2 => (0, cfg.l2_time_reduction),
        Assignee::Vendor => (cfg.vendor_fee, cfg.vendor_time_reduction),
    };

    state.money -= cost;
    let ticket = state
        .ticket_mut(ticket_id)
        .expect("ticket existed above");
    ticket.assigned = Some(assignee);
    ticket.time_remaining = ticket.time_remaining.saturating_sub(reduction);

    timers.schedule_wall(
        state.wall_tick,
        cfg.resolve_check_delay,
        TimerKind::ResolutionCheck {
            ticket_id,
            assignee,
        },
    );

    log::info!(
        "ticket #{ticket_id} assigned to {}; resolving",
        assignee.name()
    );
    Ok(vec![SimEvent::TicketAssigned {
        ticket_id,
        assignee,
    }])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The ticket resolved (or vanished) before the roll fired.
    AlreadySettled,
    Resolved,
    RollFailed,
}

/// The scheduled resolution roll for one assignment attempt.
pub fn resolution_check(
    state: &mut GameState,
    cfg: &TicketConfig,
    rng: &mut SubsystemRng,
    ticket_id: TicketId,
    assignee: Assignee,
) -> (Vec<SimEvent>, ResolutionOutcome) {
    let Some(ticket) = state.ticket(ticket_id) else {
        return (vec![], ResolutionOutcome::AlreadySettled);
    };
    if ticket.resolved {
        return (vec![], ResolutionOutcome::AlreadySettled);
    }

    let success_chance = match assignee {
        Assignee::Noc => state.staff.noc.skill,
        Assignee::L2 => state.staff.l2.skill,
        Assignee::Vendor => 1.0,
    };

    if rng.next_f64() < success_chance {
        let ticket = state.ticket_mut(ticket_id).expect("checked above");
        ticket.resolved = true;
        state.add_reputation(cfg.resolve_reputation_bonus);

        log::info!(
            "ticket #{ticket_id} resolved via {}; reputation +{}",
            assignee.name(),
            cfg.resolve_reputation_bonus
        );
        let mail = state.post_message(
            MessageDraft::new(
                "CEO@board.com",
                "Crisis Averted - Good Work",
                "The router is stabilized and temperatures are back to normal.\n\n\
                 That was close. Our clients didn't notice... this time.\n\n\
                 Reputation is recovering. Keep monitoring that AC unit."
                    .to_string(),
            ),
        );
        (
            vec![
                SimEvent::TicketResolved {
                    ticket_id,
                    assignee,
                },
                mail,
            ],
            ResolutionOutcome::Resolved,
        )
    } else {
        let ticket = state.ticket_mut(ticket_id).expect("checked above");
        ticket.assigned = None;
        log::warn!(
            "{} failed to resolve ticket #{ticket_id}; reassign or escalate",
            assignee.name()
        );
        (
            vec![SimEvent::TicketRetry {
                ticket_id,
                assignee,
            }],
            ResolutionOutcome::RollFailed,
        )
    }
}

/// Hourly countdown sweep. Returns emitted events and how many tickets
/// timed out this hour.
pub fn hourly_sweep(state: &mut GameState, cfg: &TicketConfig) -> (Vec<SimEvent>, u32) {
    let mut events = Vec::new();
    let mut failed = 0u32;

    for i in 0..state.tickets.len() {
        if state.tickets[i].resolved || state.tickets[i].time_remaining == 0 {
            continue;
        }
        state.tickets[i].time_remaining -= 1;
        if state.tickets[i].time_remaining > 0 {
            continue;
        }

        // Timed out: terminal failure, penalties applied exactly once.
        state.tickets[i].resolved = true;
        let id = state.tickets[i].id;
        let penalty = state.tickets[i].penalty;

        state.add_reputation(-cfg.fail_reputation_penalty);
        state.money -= penalty;
        state.uptime -= cfg.fail_uptime_penalty;
        failed += 1;

        log::error!(
            "ticket #{id} FAILED; reputation -{}, ${penalty} penalty",
            cfg.fail_reputation_penalty
        );
        let mail = state.post_message(
            MessageDraft::new(
                "CEO@board.com",
                "RE: The Outage",
                format!(
                    "That failure just cost us ${penalty} in SLA penalties and angry clients.\n\n\
                     This is your ONE warning. Next time, act faster or escalate immediately.\n\n\
                     The board is watching."
                ),
            )
            .urgent(),
        );
        events.push(SimEvent::TicketFailed {
            ticket_id: id,
            penalty,
        });
        events.push(mail);
    }

    (events, failed)
}
