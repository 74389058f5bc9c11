//! The root state aggregate.
//!
//! RULE: `GameState` has exactly one writer — the engine's current
//! callback. Subsystems receive it as an explicit `&mut` parameter;
//! there are no globals and no interior mutability.
//!
//! The aggregate itself enforces only the clamped-bounds invariants
//! (reputation, cooling health, staff mood); every other rule lives in
//! the subsystem that owns it.

use crate::{
    client_subsystem::Client,
    clock::GameClock,
    config::GameConfig,
    endings::GameOutcome,
    event::SimEvent,
    staffing::StaffRoster,
    story::StoryStage,
    tickets::Ticket,
    types::{MessageId, Tick, TicketId},
};
use serde::{Deserialize, Serialize};

/// An inbox message. Append-at-front, never deleted during a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub urgent: bool,
    pub read: bool,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<MessageAction>,
}

/// A player-facing action attached to a message. The presentation
/// layer resolves `kind` through a lookup table — no string dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageAction {
    pub label: String,
    pub kind: ActionKind,
}

/// Closed set of things a message button can do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    AcceptClientOffer,
    DeclineClientOffer,
    ReviewCandidates,
    OrderServer { cost: i64 },
}

/// A message before the state stamps id and timestamp onto it.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub urgent: bool,
    pub actions: Vec<MessageAction>,
}

impl MessageDraft {
    pub fn new(sender: &str, subject: &str, body: String) -> Self {
        Self {
            sender: sender.to_string(),
            subject: subject.to_string(),
            body,
            urgent: false,
            actions: Vec::new(),
        }
    }

    pub fn urgent(mut self) -> Self {
        self.urgent = true;
        self
    }

    pub fn with_action(mut self, label: &str, kind: ActionKind) -> Self {
        self.actions.push(MessageAction {
            label: label.to_string(),
            kind,
        });
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub company: String,
    pub clock: GameClock,
    /// Engine steps since game start; advances even while paused.
    pub wall_tick: Tick,
    /// Unpaused steps only.
    pub sim_tick: Tick,

    // Economy
    pub money: i64,
    pub reputation: i32,
    pub uptime: f64,

    // Capacity
    pub power_used_mw: f64,
    pub power_max_mw: f64,
    pub cooling_health: i32,
    pub space_used: u32,
    pub space_max: u32,

    // Collections
    pub messages: Vec<Message>,
    pub tickets: Vec<Ticket>,
    pub clients: Vec<Client>,
    pub staff: StaffRoster,

    pub story_stage: StoryStage,
    pub outcome: Option<GameOutcome>,

    next_ticket_id: TicketId,
    next_message_id: MessageId,
}

impl GameState {
    pub fn new(company: &str, config: &GameConfig) -> Self {
        let start = &config.start;
        Self {
            company: company.to_string(),
            clock: GameClock::new(start.start_hour),
            wall_tick: 0,
            sim_tick: 0,
            money: start.money,
            reputation: start.reputation,
            uptime: start.uptime,
            power_used_mw: 0.0,
            power_max_mw: start.power_max_mw,
            cooling_health: start.cooling_health,
            space_used: 0,
            space_max: start.space_max,
            messages: Vec::new(),
            tickets: Vec::new(),
            clients: Vec::new(),
            staff: StaffRoster::default(),
            story_stage: StoryStage::Start,
            outcome: None,
            next_ticket_id: 1,
            next_message_id: 1,
        }
    }

    pub fn alloc_ticket_id(&mut self) -> TicketId {
        let id = self.next_ticket_id;
        self.next_ticket_id += 1;
        id
    }

    /// Stamp and file a message at the front of the inbox.
    pub fn post_message(&mut self, draft: MessageDraft) -> SimEvent {
        let id = self.next_message_id;
        self.next_message_id += 1;
        let urgent = draft.urgent;
        self.messages.insert(
            0,
            Message {
                id,
                sender: draft.sender,
                subject: draft.subject,
                body: draft.body,
                urgent,
                read: false,
                timestamp: self.clock.timestamp(),
                actions: draft.actions,
            },
        );
        SimEvent::MessagePosted {
            message_id: id,
            urgent,
        }
    }

    /// Reputation moves only through here; [0, 100] always holds.
    pub fn add_reputation(&mut self, delta: i32) {
        self.reputation = (self.reputation + delta).clamp(0, 100);
    }

    /// Cooling health moves only through here; [0, 100] always holds.
    pub fn add_cooling_health(&mut self, delta: i32) {
        self.cooling_health = (self.cooling_health + delta).clamp(0, 100);
    }

    pub fn ticket(&self, id: TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn ticket_mut(&mut self, id: TicketId) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|t| t.id == id)
    }

    pub fn monthly_revenue(&self) -> i64 {
        self.clients.iter().map(|c| c.monthly_revenue).sum()
    }

    pub fn power_headroom_mw(&self) -> f64 {
        self.power_max_mw - self.power_used_mw
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}
