//! The presentation surface — everything the view and audio layers see.
//!
//! RULE: the core emits `SimEvent`s and never depends on how (or
//! whether) they are rendered. Severity and audio cue are accessor
//! methods so the presentation layer needs no tables of its own.

use crate::{
    endings::GameOutcome,
    staffing::StaffRoleId,
    tickets::{Assignee, Priority},
    types::{MessageId, Tick, TicketId},
};
use serde::{Deserialize, Serialize};

/// Every notification emitted during simulation.
/// Variants are added over time — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Session ────────────────────────────────────
    GameStarted { company: String },
    Paused,
    Resumed,
    DailySettlement { day: u32, salaries: i64, revenue: i64 },
    GameEnded { outcome: GameOutcome },

    // ── Tickets ────────────────────────────────────
    TicketCreated { ticket_id: TicketId, title: String, priority: Priority },
    TicketAssigned { ticket_id: TicketId, assignee: Assignee },
    TicketResolved { ticket_id: TicketId, assignee: Assignee },
    TicketRetry { ticket_id: TicketId, assignee: Assignee },
    TicketFailed { ticket_id: TicketId, penalty: i64 },

    // ── Infrastructure ─────────────────────────────
    PowerOverload { used_mw: f64, max_mw: f64 },
    PowerUpgraded { new_max_mw: f64, cost: i64 },
    CoolingFailure { ticket_id: TicketId },
    CoolingMaintained { health: i32, cost: i64 },
    PowerSpike { damaged: bool },
    NetworkDegraded,

    // ── Clients ────────────────────────────────────
    ClientSigned { name: String, monthly_revenue: i64 },
    OfferDeclined { name: String },
    ChurnWarning { name: String, satisfaction: f64 },
    ContractRenewed { name: String },
    ContractLost { name: String, monthly_revenue: i64 },
    CompetitorUndercut,

    // ── Staffing ───────────────────────────────────
    StaffHired { name: String, role: StaffRoleId },
    StaffSick { role: StaffRoleId, back_in: Tick },
    StaffReturned { role: StaffRoleId },

    // ── Inbox & misc ───────────────────────────────
    MessagePosted { message_id: MessageId, urgent: bool },
    ServerOrdered { cost: i64 },
    TutorialComplete,
}

/// How the view layer should style a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Critical,
}

/// Discrete audio cues. The core never plays them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Tick,
    Success,
    Error,
    Alert,
    Critical,
}

impl SimEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::TicketResolved { .. }
            | Self::ContractRenewed { .. }
            | Self::ClientSigned { .. }
            | Self::CoolingMaintained { .. }
            | Self::PowerUpgraded { .. }
            | Self::StaffHired { .. }
            | Self::StaffReturned { .. }
            | Self::ServerOrdered { .. }
            | Self::TutorialComplete => Severity::Success,

            Self::TicketRetry { .. }
            | Self::ChurnWarning { .. }
            | Self::StaffSick { .. }
            | Self::NetworkDegraded
            | Self::CompetitorUndercut
            | Self::OfferDeclined { .. } => Severity::Warning,

            Self::TicketFailed { .. }
            | Self::PowerOverload { .. }
            | Self::CoolingFailure { .. }
            | Self::ContractLost { .. }
            | Self::GameEnded { .. } => Severity::Critical,

            Self::TicketCreated { priority, .. } => match priority {
                Priority::P1 => Severity::Critical,
                Priority::P2 => Severity::Warning,
            },

            Self::PowerSpike { damaged } => {
                if *damaged {
                    Severity::Critical
                } else {
                    Severity::Info
                }
            }

            _ => Severity::Info,
        }
    }

    /// The audio cue for this event, if any.
    pub fn cue(&self) -> Option<Cue> {
        match self.severity() {
            Severity::Critical => Some(Cue::Critical),
            Severity::Success => Some(Cue::Success),
            Severity::Warning => match self {
                Self::TicketRetry { .. } | Self::OfferDeclined { .. } => Some(Cue::Error),
                _ => Some(Cue::Alert),
            },
            Severity::Info => match self {
                Self::MessagePosted { urgent: true, .. } => Some(Cue::Alert),
                _ => None,
            },
        }
    }
}
