//! game-runner: headless driver for the Rackline simulation core.
//!
//! Usage:
//!   game-runner --seed 12345 --steps 4320 --db saves.db --company "Rackline DC"
//!   game-runner --seed 12345 --ipc-mode

use anyhow::Result;
use rackline_core::{
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    event::SimEvent,
    store::CompanyStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Step { count: u64 },
    Command { cmd: PlayerCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    day: u32,
    time: String,
    paused: bool,
    money: i64,
    reputation: i32,
    uptime: f64,
    power_used_mw: f64,
    power_max_mw: f64,
    cooling_health: i32,
    space_used: u32,
    space_max: u32,
    clients: usize,
    monthly_revenue: i64,
    open_tickets: usize,
    unread_messages: usize,
    story_stage: rackline_core::story::StoryStage,
    outcome: Option<rackline_core::endings::GameOutcome>,
    events: Vec<SimEvent>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let steps = parse_arg(&args, "--steps", 4_320u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let company = args
        .windows(2)
        .find(|w| w[0] == "--company")
        .map(|w| w[1].as_str())
        .unwrap_or("Rackline DC");

    if !ipc_mode {
        println!("Rackline — game-runner");
        println!("  company: {company}");
        println!("  seed:    {seed}");
        println!("  steps:   {steps}");
        println!("  db:      {db}");
        println!();
    }

    let store = if db == ":memory:" {
        CompanyStore::in_memory()?
    } else {
        CompanyStore::open(db)?
    };

    let config = GameConfig::default();
    let mut engine = if store.company_exists(company)? {
        GameEngine::resume(company, config, store)?
    } else {
        GameEngine::new_game(company, seed, config, store)?
    };

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        engine.run_steps(steps)?;
        engine.save()?;
        print_summary(&engine);
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let state = build_ui_state(engine, vec![]);
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Step { count } => {
                let mut events = Vec::new();
                for _ in 0..count {
                    events.extend(engine.step()?);
                }
                let state = build_ui_state(engine, events);
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Command { cmd } => {
                match engine.handle_command(cmd) {
                    Ok(events) => {
                        let state = build_ui_state(engine, events);
                        writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
                    }
                    Err(e) => {
                        let err_json = serde_json::json!({ "rejected": e.to_string() });
                        writeln!(stdout, "{err_json}")?;
                    }
                }
                engine.save()?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(engine: &GameEngine, events: Vec<SimEvent>) -> UiState {
    let state = &engine.state;
    UiState {
        day: state.clock.day,
        time: state.clock.timestamp(),
        paused: state.clock.paused,
        money: state.money,
        reputation: state.reputation,
        uptime: state.uptime,
        power_used_mw: state.power_used_mw,
        power_max_mw: state.power_max_mw,
        cooling_health: state.cooling_health,
        space_used: state.space_used,
        space_max: state.space_max,
        clients: state.clients.len(),
        monthly_revenue: state.monthly_revenue(),
        open_tickets: state.tickets.iter().filter(|t| !t.resolved).count(),
        unread_messages: state.messages.iter().filter(|m| !m.read).count(),
        story_stage: state.story_stage,
        outcome: state.outcome,
        events,
    }
}

fn print_summary(engine: &GameEngine) {
    let state = &engine.state;
    println!("=== RUN SUMMARY ===");
    println!("  company:     {}", state.company);
    println!("  clock:       {}", state.clock.timestamp());
    println!("  wall steps:  {}", engine.wall_tick());
    println!("  money:       ${}", state.money);
    println!("  reputation:  {}%", state.reputation);
    println!("  uptime:      {:.2}%", state.uptime);
    println!(
        "  power:       {:.2} / {:.2} MW",
        state.power_used_mw, state.power_max_mw
    );
    println!("  cooling:     {}%", state.cooling_health);
    println!(
        "  clients:     {} (${}/mo)",
        state.clients.len(),
        state.monthly_revenue()
    );
    println!(
        "  tickets:     {} total, {} open",
        state.tickets.len(),
        state.tickets.iter().filter(|t| !t.resolved).count()
    );
    println!("  messages:    {}", state.messages.len());
    println!("  stage:       {:?}", state.story_stage);
    match state.outcome {
        Some(outcome) => println!("  outcome:     {outcome:?}"),
        None => println!("  outcome:     still running"),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
