//! Ticket lifecycle: filing, assignment, resolution rolls, timeouts.

use rackline_core::{
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    error::ActionError,
    event::SimEvent,
    rng::SubsystemRng,
    staffing::StaffRoleId,
    state::GameState,
    store::CompanyStore,
    tickets::{self, Assignee, Priority, ResolutionOutcome},
};

fn quiet_config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.events.gate_chance = 0.0;
    cfg.cooling.decay_chance = 0.0;
    cfg.cooling.failure_chance = 0.0;
    cfg.staffing.mood_shift_chance = 0.0;
    cfg.clients.churn_warning_chance = 0.0;
    cfg
}

fn quiet_engine(seed: u64) -> GameEngine {
    let store = CompanyStore::in_memory().expect("in-memory store");
    GameEngine::new_game("Testline DC", seed, quiet_config(), store).expect("new game")
}

fn run_collect(engine: &mut GameEngine, steps: u64) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..steps {
        events.extend(engine.step().expect("step"));
    }
    events
}

#[test]
fn first_ticket_appears_after_fifteen_steps() {
    let mut engine = quiet_engine(7);
    run_collect(&mut engine, 14);
    assert!(engine.state.tickets.is_empty());

    let events = run_collect(&mut engine, 1);
    assert_eq!(engine.state.tickets.len(), 1);

    let ticket = &engine.state.tickets[0];
    assert_eq!(ticket.priority, Priority::P1);
    assert_eq!(ticket.time_remaining, 300);
    assert_eq!(ticket.penalty, 5_000);
    assert!(ticket.assigned.is_none());
    assert!(!ticket.resolved);

    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::TicketCreated { .. })));
    // The monitoring alert lands in the inbox alongside it.
    assert!(engine
        .state
        .messages
        .iter()
        .any(|m| m.urgent && m.sender == "MONITORING ALERT"));
}

#[test]
fn vendor_assignment_charges_fee_and_always_resolves() {
    let mut engine = quiet_engine(7);
    run_collect(&mut engine, 15);

    let events = engine
        .handle_command(PlayerCommand::AssignTicket {
            ticket_id: 1,
            assignee: Assignee::Vendor,
        })
        .expect("assign");
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::TicketAssigned { .. })));

    let ticket = &engine.state.tickets[0];
    assert_eq!(ticket.assigned, Some(Assignee::Vendor));
    assert_eq!(ticket.time_remaining, 240); // 300 - vendor reduction 60
    assert_eq!(engine.state.money, 98_000);

    // Vendor success chance is 1.0; the roll one step later cannot miss.
    let events = run_collect(&mut engine, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::TicketResolved { .. })));
    assert!(engine.state.tickets[0].resolved);
    assert_eq!(engine.state.reputation, 60); // 50 + resolve bonus 10
    assert!(engine
        .state
        .messages
        .iter()
        .any(|m| m.subject.contains("Crisis Averted")));
}

#[test]
fn assignment_to_empty_role_is_rejected() {
    let mut engine = quiet_engine(7);
    run_collect(&mut engine, 15);
    engine.state.staff.l2.count = 0;

    let err = engine
        .handle_command(PlayerCommand::AssignTicket {
            ticket_id: 1,
            assignee: Assignee::L2,
        })
        .unwrap_err();
    assert_eq!(
        err,
        ActionError::NoStaffAvailable {
            role: StaffRoleId::L2
        }
    );
    // Rejection leaves the ticket untouched.
    assert!(engine.state.tickets[0].assigned.is_none());
    assert_eq!(engine.state.money, 100_000);
}

#[test]
fn assigning_missing_or_resolved_ticket_is_a_silent_noop() {
    let mut engine = quiet_engine(7);
    let events = engine
        .handle_command(PlayerCommand::AssignTicket {
            ticket_id: 99,
            assignee: Assignee::Vendor,
        })
        .expect("no-op");
    assert!(events.is_empty());
    assert_eq!(engine.state.money, 100_000);
}

#[test]
fn failed_roll_unassigns_for_retry() {
    let cfg = quiet_config();
    let mut state = GameState::new("Testline DC", &cfg);
    let mut rng = SubsystemRng::new(7, 5);
    let (id, _) = tickets::file_ticket(&mut state, "Test", "x", Priority::P1, 300, 1, 5_000);

    // Skill 0.0 can never win the roll.
    state.staff.noc.skill = 0.0;
    state.ticket_mut(id).unwrap().assigned = Some(Assignee::Noc);

    let (events, outcome) =
        tickets::resolution_check(&mut state, &cfg.tickets, &mut rng, id, Assignee::Noc);
    assert_eq!(outcome, ResolutionOutcome::RollFailed);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::TicketRetry { .. })));
    assert!(state.ticket(id).unwrap().assigned.is_none());
    assert!(!state.ticket(id).unwrap().resolved);
}

#[test]
fn resolution_roll_on_settled_ticket_is_absorbed() {
    let cfg = quiet_config();
    let mut state = GameState::new("Testline DC", &cfg);
    let mut rng = SubsystemRng::new(7, 5);
    let (id, _) = tickets::file_ticket(&mut state, "Test", "x", Priority::P2, 100, 1, 1_000);
    state.ticket_mut(id).unwrap().resolved = true;

    let (events, outcome) =
        tickets::resolution_check(&mut state, &cfg.tickets, &mut rng, id, Assignee::Vendor);
    assert_eq!(outcome, ResolutionOutcome::AlreadySettled);
    assert!(events.is_empty());
}

#[test]
fn timeout_applies_penalties_exactly_once() {
    let cfg = quiet_config();
    let mut state = GameState::new("Testline DC", &cfg);
    let (id, _) = tickets::file_ticket(&mut state, "Test", "x", Priority::P1, 1, 3, 5_000);

    let (events, failed) = tickets::hourly_sweep(&mut state, &cfg.tickets);
    assert_eq!(failed, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::TicketFailed { penalty: 5_000, .. })));
    assert!(state.ticket(id).unwrap().resolved);
    assert_eq!(state.money, 95_000);
    assert_eq!(state.reputation, 35); // 50 - fail penalty 15
    assert!((state.uptime - 97.5).abs() < 1e-9);
    assert!(state
        .messages
        .iter()
        .any(|m| m.urgent && m.subject == "RE: The Outage"));

    // A second sweep must not double-charge.
    let (events, failed) = tickets::hourly_sweep(&mut state, &cfg.tickets);
    assert_eq!(failed, 0);
    assert!(events.is_empty());
    assert_eq!(state.money, 95_000);
}

#[test]
fn sweep_decrements_open_tickets_only() {
    let cfg = quiet_config();
    let mut state = GameState::new("Testline DC", &cfg);
    let (open, _) = tickets::file_ticket(&mut state, "Open", "x", Priority::P2, 10, 1, 1_000);
    let (done, _) = tickets::file_ticket(&mut state, "Done", "x", Priority::P2, 10, 1, 1_000);
    state.ticket_mut(done).unwrap().resolved = true;

    tickets::hourly_sweep(&mut state, &cfg.tickets);
    assert_eq!(state.ticket(open).unwrap().time_remaining, 9);
    assert_eq!(state.ticket(done).unwrap().time_remaining, 10);
}

#[test]
fn wall_timers_fire_while_paused() {
    let mut engine = quiet_engine(7);
    run_collect(&mut engine, 10);
    engine.handle_command(PlayerCommand::Pause).expect("pause");
    let frozen = engine.state.clock.clone();

    // The first-ticket beat is wall-paced; pause cannot hold it back.
    run_collect(&mut engine, 5);
    assert_eq!(engine.state.tickets.len(), 1);
    assert_eq!(engine.state.clock.day, frozen.day);
    assert_eq!(engine.state.clock.hour, frozen.hour);
    assert_eq!(engine.state.clock.minute, frozen.minute);
    assert_eq!(engine.state.sim_tick, 10);
    assert_eq!(engine.state.wall_tick, 15);
}
