//! Power and cooling: demand recomputation, overload, upgrades,
//! maintenance, and the failure ticket path.

use rackline_core::{
    client_subsystem::Client,
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    error::ActionError,
    event::SimEvent,
    store::CompanyStore,
    tickets::Priority,
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

fn engine_with(cfg: GameConfig, seed: u64) -> GameEngine {
    let store = CompanyStore::in_memory().expect("in-memory store");
    GameEngine::new_game("Testline DC", seed, cfg, store).expect("new game")
}

fn run_collect(engine: &mut GameEngine, steps: u64) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..steps {
        events.extend(engine.step().expect("step"));
    }
    events
}

fn test_client(racks: u32) -> Client {
    Client {
        name: "LoadCo".into(),
        monthly_revenue: 8_000,
        sla: 99.0,
        racks,
        satisfaction: 80.0,
    }
}

#[test]
fn power_demand_is_recomputed_from_racks() {
    let mut engine = engine_with(quiet_config(), 5);
    engine.state.clients.push(test_client(10));

    run_collect(&mut engine, 1);
    // 10 racks * 0.25 + base 0.5
    assert!((engine.state.power_used_mw - 3.0).abs() < 1e-9);
    assert!((engine.state.uptime - 100.0).abs() < 1e-9);
}

#[test]
fn overload_penalizes_and_sheds_load() {
    let mut engine = engine_with(quiet_config(), 5);
    engine.state.clients.push(test_client(20)); // 5.5 MW demand vs 5.0 cap

    let events = run_collect(&mut engine, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::PowerOverload { .. })));
    assert!((engine.state.uptime - 99.5).abs() < 1e-9);
    assert_eq!(engine.state.reputation, 45);
    // Shed to 95% of capacity, not to the raw demand.
    assert!((engine.state.power_used_mw - 4.75).abs() < 1e-9);
    assert!(engine
        .state
        .messages
        .iter()
        .any(|m| m.urgent && m.sender == "FACILITIES ALERT"));
}

#[test]
fn power_upgrade_buys_capacity() {
    let mut engine = engine_with(quiet_config(), 5);
    let events = engine
        .handle_command(PlayerCommand::UpgradePower)
        .expect("upgrade");
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::PowerUpgraded {
            cost: 25_000,
            ..
        }
    )));
    assert_eq!(engine.state.money, 75_000);
    assert!((engine.state.power_max_mw - 10.0).abs() < 1e-9);

    engine.state.money = 10_000;
    let err = engine
        .handle_command(PlayerCommand::UpgradePower)
        .unwrap_err();
    assert!(matches!(err, ActionError::InsufficientFunds { .. }));
    assert!((engine.state.power_max_mw - 10.0).abs() < 1e-9);
}

#[test]
fn cooling_maintenance_restores_and_clamps() {
    let mut engine = engine_with(quiet_config(), 5);
    engine.state.cooling_health = 40;
    engine
        .handle_command(PlayerCommand::MaintainCooling)
        .expect("maintain");
    assert_eq!(engine.state.cooling_health, 70);
    assert_eq!(engine.state.money, 95_000);

    engine.state.cooling_health = 90;
    engine
        .handle_command(PlayerCommand::MaintainCooling)
        .expect("maintain");
    assert_eq!(engine.state.cooling_health, 100);
}

#[test]
fn cooling_failure_below_threshold_spawns_p1() {
    let mut cfg = quiet_config();
    cfg.cooling.failure_chance = 1.0;
    let mut engine = engine_with(cfg, 5);
    engine.state.cooling_health = 40;
    engine.state.clients.push(test_client(2));

    let events = run_collect(&mut engine, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::CoolingFailure { .. })));

    let ticket = engine
        .state
        .tickets
        .iter()
        .find(|t| t.title.contains("AC Unit"))
        .expect("failure ticket");
    assert_eq!(ticket.priority, Priority::P1);
    assert_eq!(ticket.time_remaining, 240);
    assert_eq!(ticket.penalty, 8_000);
    assert_eq!(ticket.affected_clients, 1);
}

#[test]
fn healthy_cooling_never_fails() {
    let mut cfg = quiet_config();
    cfg.cooling.failure_chance = 1.0; // still gated by the threshold
    let mut engine = engine_with(cfg, 5);

    run_collect(&mut engine, 10);
    assert!(engine.state.tickets.is_empty());
}

#[test]
fn network_issue_shaves_uptime() {
    let mut cfg = quiet_config();
    cfg.events.gate_chance = 1.0;
    cfg.events.network_issue_chance = 1.0;
    let mut engine = engine_with(cfg, 5);

    let events = run_collect(&mut engine, 1);
    assert!(events.iter().any(|e| matches!(e, SimEvent::NetworkDegraded)));
    assert!((engine.state.uptime - 99.95).abs() < 1e-9);
}

#[test]
fn power_spike_always_reports_damage_verdict() {
    let mut cfg = quiet_config();
    cfg.events.gate_chance = 1.0;
    cfg.events.power_spike_chance = 1.0;
    let mut engine = engine_with(cfg, 5);

    let events = run_collect(&mut engine, 1);
    let spike = events
        .iter()
        .find(|e| matches!(e, SimEvent::PowerSpike { .. }))
        .expect("spike event");
    // Damage is a sub-roll; the books reflect whichever way it went.
    match spike {
        SimEvent::PowerSpike { damaged: true } => {
            assert_eq!(engine.state.money, 98_000);
            assert!((engine.state.uptime - 99.9).abs() < 1e-9);
        }
        SimEvent::PowerSpike { damaged: false } => {
            assert_eq!(engine.state.money, 100_000);
            assert!((engine.state.uptime - 100.0).abs() < 1e-9);
        }
        _ => unreachable!(),
    }
}

#[test]
fn vendor_sale_mail_leads_to_server_order() {
    let mut cfg = quiet_config();
    cfg.events.gate_chance = 1.0;
    cfg.events.vendor_sale_chance = 1.0;
    let mut engine = engine_with(cfg, 5);

    run_collect(&mut engine, 1);
    let mail = engine
        .state
        .messages
        .iter()
        .find(|m| m.subject.contains("Flash Sale"))
        .expect("sale mail");
    let order = mail
        .actions
        .iter()
        .find_map(|a| match a.kind {
            rackline_core::state::ActionKind::OrderServer { cost } => Some(cost),
            _ => None,
        })
        .expect("order action");
    assert_eq!(order, 6_400);

    let events = engine
        .handle_command(PlayerCommand::OrderServer { cost: order })
        .expect("order");
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::ServerOrdered { cost: 6_400 })));
    assert_eq!(engine.state.money, 93_600);
    assert_eq!(engine.state.space_used, 1);
}

#[test]
fn disk_failure_files_a_p2_ticket() {
    let mut cfg = quiet_config();
    cfg.events.gate_chance = 1.0;
    cfg.events.disk_failure_chance = 1.0;
    let mut engine = engine_with(cfg, 5);

    run_collect(&mut engine, 1);
    let ticket = engine
        .state
        .tickets
        .iter()
        .find(|t| t.title.contains("Disk Failure"))
        .expect("disk ticket");
    assert_eq!(ticket.priority, Priority::P2);
    assert_eq!(ticket.time_remaining, 600);
    assert_eq!(ticket.penalty, 1_000);
}

#[test]
fn competitor_poach_dents_every_client() {
    let mut cfg = quiet_config();
    cfg.events.gate_chance = 1.0;
    cfg.events.competitor_poach_chance = 1.0;
    let mut engine = engine_with(cfg, 5);
    engine.state.clients.push(test_client(2));

    let events = run_collect(&mut engine, 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::CompetitorUndercut)));
    // +0.5 SLA drift from the client pass, then -5 from the poach.
    assert!((engine.state.clients[0].satisfaction - 75.5).abs() < 1e-9);
}
