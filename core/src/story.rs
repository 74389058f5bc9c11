//! Story sequencer — a strictly linear saga of scripted beats.
//!
//! Each beat is idempotently guarded: it fires only when the stage is
//! exactly its precondition, advances the stage, and performs its
//! scripted effects. Completion of one beat (possibly asynchronous and
//! outcome-dependent) is what schedules the next.

use crate::{
    config::{GameConfig, StoryConfig},
    error::ActionError,
    event::SimEvent,
    state::{ActionKind, GameState, MessageDraft},
    tickets::{self, Priority},
};
use serde::{Deserialize, Serialize};

/// The single linear progression marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoryStage {
    Start,
    FirstTicket,
    ClientOffer,
    NeedHire,
    Playing,
}

impl StoryStage {
    /// The allowed-transition table. Anything not listed is rejected.
    pub fn allows(self, next: StoryStage) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::FirstTicket)
                | (Self::FirstTicket, Self::ClientOffer)
                | (Self::ClientOffer, Self::NeedHire)
                | (Self::NeedHire, Self::Playing)
        )
    }
}

/// Scripted beats scheduled through the timer queue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoryBeat {
    FirstTicket,
    ClientOffer,
    HiringNeed,
}

impl StoryBeat {
    /// The stage a beat requires to fire, and the one it advances to.
    fn transition(self) -> (StoryStage, StoryStage) {
        match self {
            Self::FirstTicket => (StoryStage::Start, StoryStage::FirstTicket),
            Self::ClientOffer => (StoryStage::FirstTicket, StoryStage::ClientOffer),
            Self::HiringNeed => (StoryStage::ClientOffer, StoryStage::NeedHire),
        }
    }
}

/// Advance the progression marker if the transition table permits.
pub fn advance(state: &mut GameState, to: StoryStage) -> bool {
    if !state.story_stage.allows(to) {
        log::debug!(
            "story transition {:?} -> {to:?} rejected",
            state.story_stage
        );
        return false;
    }
    log::info!("story stage: {:?} -> {to:?}", state.story_stage);
    state.story_stage = to;
    true
}

/// Fire one scripted beat. No-op unless the stage matches the beat's
/// precondition exactly — duplicate timers are harmless.
pub fn run_beat(state: &mut GameState, cfg: &StoryConfig, beat: StoryBeat) -> Vec<SimEvent> {
    let (required, next) = beat.transition();
    if state.story_stage != required || !advance(state, next) {
        return vec![];
    }

    match beat {
        StoryBeat::FirstTicket => spawn_first_ticket(state),
        StoryBeat::ClientOffer => spawn_client_offer(state, cfg),
        StoryBeat::HiringNeed => spawn_hiring_need(state),
    }
}

/// The opening crisis: one P1 router-overheat ticket plus an urgent
/// monitoring alert.
fn spawn_first_ticket(state: &mut GameState) -> Vec<SimEvent> {
    let (ticket_id, created) = tickets::file_ticket(
        state,
        "CRITICAL: Core Router Overheating",
        "DC1-R01 temperature at 85C (threshold: 75C).\n\n\
         Fan failure suspected. Immediate action required or automatic \
         thermal shutdown will occur.",
        Priority::P1,
        300,
        3,
        5_000,
    );

    let mail = state.post_message(
        MessageDraft::new(
            "MONITORING ALERT",
            "P1 TICKET CREATED #001 - IMMEDIATE ACTION",
            format!(
                "AUTOMATED CRITICAL ALERT:\n\n\
                 Router DC1-R01 OVERHEATING\n\
                 - Temperature: 85C (CRITICAL)\n\
                 - Status: Above 75C threshold\n\
                 - Impact: 150 servers, 3 clients\n\
                 - Ticket: #{ticket_id:03}\n\n\
                 ASSIGN TECHNICIAN NOW!"
            ),
        )
        .urgent(),
    );

    log::error!("P1 ticket #{ticket_id}: router overheating");
    vec![created, mail]
}

/// The colocation proposal, with typed accept/decline actions.
fn spawn_client_offer(state: &mut GameState, cfg: &StoryConfig) -> Vec<SimEvent> {
    let offer = &cfg.offer;
    let body = format!(
        "{name} is interested in colocating with {company}.\n\n\
         Requirements:\n\
         - {racks} racks ({space}U total space)\n\
         - {sla}% uptime SLA\n\
         - ${revenue}/month revenue\n\
         - 12-month minimum contract\n\n\
         Impact:\n\
         - Will use {power} MW of remaining power capacity\n\
         - First payment in 30 days\n\n\
         Do we have capacity to take this deal?",
        name = offer.name,
        company = state.company,
        racks = offer.racks,
        space = offer.space_units,
        sla = offer.sla,
        revenue = offer.monthly_revenue,
        power = offer.power_mw,
    );

    let mail = state.post_message(
        MessageDraft::new("sales@techflow.com", "Proposal: TechFlow Inc Colocation", body)
            .urgent()
            .with_action("ACCEPT DEAL", ActionKind::AcceptClientOffer)
            .with_action("DECLINE", ActionKind::DeclineClientOffer),
    );

    log::info!(
        "new client offer: {} (${}/mo)",
        cfg.offer.name,
        cfg.offer.monthly_revenue
    );
    vec![mail]
}

/// HR flags the staffing shortage and points at the candidate list.
fn spawn_hiring_need(state: &mut GameState) -> Vec<SimEvent> {
    let mail = state.post_message(
        MessageDraft::new(
            "HR Department",
            "URGENT: Staffing Shortage",
            "With the new contract we're severely understaffed.\n\n\
             Current: 2 NOC techs, 1 L2\n\
             Recommended: 3 NOC, 2 L2 minimum\n\n\
             We have 3 candidates pre-screened. Review and hire at least \
             one immediately.\n\n\
             The alternative is overtime burnout and potential mistakes."
                .to_string(),
        )
        .urgent()
        .with_action("Review Candidates", ActionKind::ReviewCandidates),
    );

    log::warn!("HR: review candidates for open positions");
    vec![mail]
}

/// Accept the pending colocation offer. Gated on power headroom; a
/// rejection leaves state untouched.
pub fn accept_client(
    state: &mut GameState,
    cfg: &StoryConfig,
) -> Result<Vec<SimEvent>, ActionError> {
    let offer = &cfg.offer;
    if state.story_stage != StoryStage::ClientOffer
        || state.clients.iter().any(|c| c.name == offer.name)
    {
        return Err(ActionError::NoOfferPending);
    }

    if state.power_used_mw + offer.power_mw > state.power_max_mw {
        return Err(ActionError::InsufficientPower {
            required_mw: offer.power_mw,
            headroom_mw: state.power_headroom_mw(),
        });
    }

    state.clients.push(crate::client_subsystem::Client {
        name: offer.name.clone(),
        monthly_revenue: offer.monthly_revenue,
        sla: offer.sla,
        racks: offer.racks,
        satisfaction: offer.starting_satisfaction,
    });
    state.power_used_mw += offer.power_mw;
    state.space_used += offer.space_units;
    state.add_reputation(offer.reputation_bonus);

    log::info!(
        "{} is now a client: +${}/mo",
        offer.name,
        offer.monthly_revenue
    );
    Ok(vec![SimEvent::ClientSigned {
        name: offer.name.clone(),
        monthly_revenue: offer.monthly_revenue,
    }])
}

/// Decline the pending offer. The opportunity is lost but the story
/// still moves to the hiring beat.
pub fn decline_client(
    state: &mut GameState,
    cfg: &StoryConfig,
) -> Result<Vec<SimEvent>, ActionError> {
    if state.story_stage != StoryStage::ClientOffer {
        return Err(ActionError::NoOfferPending);
    }
    log::warn!("declined {} offer; opportunity lost", cfg.offer.name);
    Ok(vec![SimEvent::OfferDeclined {
        name: cfg.offer.name.clone(),
    }])
}

/// Tutorial completes once a second L2 is on board and at least one
/// client is signed.
pub fn tutorial_complete(state: &GameState) -> bool {
    state.staff.l2.count >= 2 && !state.clients.is_empty()
}

/// The two messages waiting in the inbox when a new game starts.
pub fn post_starting_messages(state: &mut GameState, config: &GameConfig) -> Vec<SimEvent> {
    let budget_k = config.start.money / 1_000;
    let welcome = state.post_message(
        MessageDraft::new(
            "CEO@board.com",
            "Welcome - Urgent",
            format!(
                "Welcome to {company}, your new datacenter operation.\n\n\
                 Your predecessor... left. We had 3 outages last month. Our \
                 reputation is at {rep}%.\n\n\
                 MISSION: Get us to 99.9% uptime within 90 days.\n\n\
                 You have ${budget_k}k budget. 2 NOC techs and 1 L2 on duty. \
                 One AC unit is making weird noises.\n\n\
                 Don't disappoint us.",
                company = state.company,
                rep = config.start.reputation,
            ),
        )
        .urgent(),
    );

    let shift_status = state.post_message(MessageDraft::new(
        "NOC Lead",
        "Shift Status",
        "2 NOC techs on duty. Power at 40% capacity. That AC unit in Row 3 \
         is definitely making a grinding noise.\n\n\
         Otherwise quiet... too quiet."
            .to_string(),
    ));

    vec![welcome, shift_status]
}
