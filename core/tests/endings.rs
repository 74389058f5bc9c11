//! End conditions: evaluation order, boundaries, and the terminal halt.

use rackline_core::{
    client_subsystem::Client,
    command::PlayerCommand,
    config::GameConfig,
    endings::{self, EndReason, GameOutcome},
    engine::GameEngine,
    error::ActionError,
    state::GameState,
    store::CompanyStore,
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

fn base_state(cfg: &GameConfig) -> GameState {
    GameState::new("Testline DC", cfg)
}

#[test]
fn fresh_game_has_no_outcome() {
    let cfg = quiet_config();
    let state = base_state(&cfg);
    assert_eq!(endings::evaluate(&state, &cfg.endings), None);
}

#[test]
fn bankruptcy_is_strictly_below_the_floor() {
    let cfg = quiet_config();
    let mut state = base_state(&cfg);

    state.money = -50_000;
    assert_eq!(endings::evaluate(&state, &cfg.endings), None);

    state.money = -50_001;
    assert_eq!(
        endings::evaluate(&state, &cfg.endings),
        Some(GameOutcome::Lost {
            reason: EndReason::Bankrupt
        })
    );
}

#[test]
fn zero_reputation_means_fired() {
    let cfg = quiet_config();
    let mut state = base_state(&cfg);
    state.reputation = 0;
    assert_eq!(
        endings::evaluate(&state, &cfg.endings),
        Some(GameOutcome::Lost {
            reason: EndReason::Fired
        })
    );
}

#[test]
fn uptime_win_needs_both_day_and_streak() {
    let cfg = quiet_config();
    let mut state = base_state(&cfg);
    state.uptime = 99.95;

    state.clock.day = 89;
    assert_eq!(endings::evaluate(&state, &cfg.endings), None);

    state.clock.day = 90;
    assert_eq!(
        endings::evaluate(&state, &cfg.endings),
        Some(GameOutcome::Won {
            reason: EndReason::UptimeStreak
        })
    );

    state.uptime = 99.8;
    assert_eq!(endings::evaluate(&state, &cfg.endings), None);
}

#[test]
fn revenue_target_win() {
    let cfg = quiet_config();
    let mut state = base_state(&cfg);
    for i in 0..2 {
        state.clients.push(Client {
            name: format!("Whale {i}"),
            monthly_revenue: 600_000,
            sla: 99.0,
            racks: 10,
            satisfaction: 90.0,
        });
    }
    assert_eq!(
        endings::evaluate(&state, &cfg.endings),
        Some(GameOutcome::Won {
            reason: EndReason::RevenueTarget
        })
    );
}

#[test]
fn lose_conditions_outrank_wins() {
    let cfg = quiet_config();
    let mut state = base_state(&cfg);
    state.money = -60_000;
    state.reputation = 0;
    state.uptime = 99.95;
    state.clock.day = 90;

    // Bankruptcy is checked first.
    assert_eq!(
        endings::evaluate(&state, &cfg.endings),
        Some(GameOutcome::Lost {
            reason: EndReason::Bankrupt
        })
    );
}

#[test]
fn terminal_outcome_halts_the_engine() {
    let store = CompanyStore::in_memory().expect("in-memory store");
    let mut engine =
        GameEngine::new_game("Testline DC", 13, quiet_config(), store).expect("new game");
    engine.state.money = -100_000;

    // Midnight of day 1 is 90 steps out; settlement triggers the check.
    engine.run_steps(90).expect("run");
    assert_eq!(
        engine.state.outcome,
        Some(GameOutcome::Lost {
            reason: EndReason::Bankrupt
        })
    );
    assert!(engine.state.clock.paused);
    assert_eq!(engine.pending_timers(), 0);

    // Dead engines don't tick and don't take orders.
    let wall_before = engine.wall_tick();
    assert!(engine.step().expect("step").is_empty());
    assert_eq!(engine.wall_tick(), wall_before);
    assert_eq!(
        engine.handle_command(PlayerCommand::Pause).unwrap_err(),
        ActionError::GameEnded
    );
}

#[test]
fn headline_copy_is_stable() {
    assert!(EndReason::Bankrupt.headline().contains("Bankrupt"));
    assert!(EndReason::Fired.headline().contains("Fired"));
    assert!(EndReason::UptimeStreak.headline().contains("99.9%"));
    assert!(EndReason::RevenueTarget.headline().contains("$1M"));
}
