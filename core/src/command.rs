use crate::{
    tickets::Assignee,
    types::TicketId,
};
use serde::{Deserialize, Serialize};

/// All player-issued commands.
/// Variants added over time — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,

    // ── Tickets ───────────────────────────────────
    AssignTicket { ticket_id: TicketId, assignee: Assignee },

    // ── Story offers ──────────────────────────────
    AcceptClientOffer,
    DeclineClientOffer,
    HireCandidate { index: usize },

    // ── Infrastructure ────────────────────────────
    UpgradePower,
    MaintainCooling,
    OrderServer { cost: i64 },
}
