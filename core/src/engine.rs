//! The game engine — one step at a time, one writer at a time.
//!
//! EXECUTION ORDER per step (fixed, documented, never reordered):
//!   1. Wall clock advances; due timers fire (even while paused).
//!   2. If unpaused: simulated clock advances.
//!   3. Hour rollover: ticket timeout sweep, staff mood drift.
//!   4. Day rollover: payroll, client revenue, end conditions, autosave.
//!   5. Per-tick subsystem pass: power → cooling → clients → events.
//!
//! RULES:
//!   - All mutations happen inside a single callback body; the engine
//!     is the only writer of GameState.
//!   - All randomness flows through the RngBank.
//!   - A terminal outcome halts stepping and clears pending timers.

use crate::{
    client_subsystem::{self, ClientSubsystem},
    command::PlayerCommand,
    config::GameConfig,
    cooling_subsystem::{self, CoolingSubsystem},
    endings::{self, GameOutcome},
    error::{ActionError, SimResult},
    event::SimEvent,
    power_subsystem::{self, PowerSubsystem},
    random_events::RandomEventsSubsystem,
    rng::{RngBank, SubsystemSlot},
    snapshot::{SaveGame, SAVE_VERSION},
    staffing,
    state::GameState,
    store::CompanyStore,
    story::{self, StoryBeat, StoryStage},
    subsystem::Subsystem,
    tickets::{self, ResolutionOutcome},
    timer::{TimerKind, TimerQueue},
    types::Tick,
};

pub struct GameEngine {
    pub config: GameConfig,
    pub state: GameState,
    seed: u64,
    rng: RngBank,
    timers: TimerQueue,
    subsystems: Vec<(SubsystemSlot, Box<dyn Subsystem>)>,
    store: CompanyStore,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Start a fresh company: seed the state, post the opening mail,
    /// arm the first story beat, and persist the new save.
    pub fn new_game(
        company: &str,
        seed: u64,
        config: GameConfig,
        store: CompanyStore,
    ) -> SimResult<Self> {
        if store.company_exists(company)? {
            return Err(ActionError::CompanyExists {
                name: company.to_string(),
            }
            .into());
        }

        let mut state = GameState::new(company, &config);
        story::post_starting_messages(&mut state, &config);

        let mut timers = TimerQueue::new();
        timers.schedule_wall(
            state.wall_tick,
            config.story.first_ticket_delay,
            TimerKind::StoryBeat {
                beat: StoryBeat::FirstTicket,
            },
        );

        let engine = Self {
            rng: RngBank::new(seed),
            subsystems: Self::build_subsystems(&config),
            config,
            state,
            seed,
            timers,
            store,
        };
        engine.save()?;
        log::info!("new game initialized: {company} (seed {seed})");
        Ok(engine)
    }

    /// Reconstruct a session losslessly from its stored save.
    pub fn resume(company: &str, config: GameConfig, store: CompanyStore) -> SimResult<Self> {
        let save = store.load_company(company)?;
        log::info!(
            "game loaded: {company}, day {}",
            save.state.clock.day
        );
        Ok(Self {
            rng: RngBank::new(save.seed),
            subsystems: Self::build_subsystems(&config),
            config,
            state: save.state,
            seed: save.seed,
            timers: save.timers,
            store,
        })
    }

    // EXECUTION ORDER — fixed, documented, never reordered.
    fn build_subsystems(config: &GameConfig) -> Vec<(SubsystemSlot, Box<dyn Subsystem>)> {
        vec![
            (
                SubsystemSlot::Power,
                Box::new(PowerSubsystem::new(config.power.clone())) as Box<dyn Subsystem>,
            ),
            (
                SubsystemSlot::Cooling,
                Box::new(CoolingSubsystem::new(config.cooling.clone())),
            ),
            (
                SubsystemSlot::Clients,
                Box::new(ClientSubsystem::new(config.clients.clone())),
            ),
            (
                SubsystemSlot::Events,
                Box::new(RandomEventsSubsystem::new(
                    config.events.clone(),
                    config.staffing.sick_return_delay,
                )),
            ),
        ]
    }

    /// Advance one engine step. This is the core driver tick.
    pub fn step(&mut self) -> SimResult<Vec<SimEvent>> {
        if self.state.is_terminal() {
            return Ok(vec![]);
        }

        self.state.wall_tick += 1;
        let mut events = Vec::new();

        // Wall timers fire even while paused — in-flight resolutions
        // and story chaining are not gated by the sim clock.
        let due = self
            .timers
            .take_due(self.state.wall_tick, self.state.sim_tick);
        for kind in due {
            events.extend(self.fire_timer(kind)?);
        }

        if self.state.clock.paused {
            return Ok(events);
        }

        self.state.sim_tick += 1;
        let crossed = self.state.clock.advance();

        if crossed.hour_rolled {
            events.extend(self.hourly()?);
        }
        if crossed.day_rolled {
            events.extend(self.daily()?);
            if self.state.is_terminal() {
                return Ok(events);
            }
        }

        // Per-tick subsystem pass, in registration order. Later
        // subsystems observe earlier subsystems' effects.
        for (slot, subsystem) in self.subsystems.iter_mut() {
            let rng = self.rng.get(*slot);
            let new_events = subsystem.update(&mut self.state, &mut self.timers, rng)?;
            events.extend(new_events);
        }

        Ok(events)
    }

    /// Run n steps in a loop. Used for testing and fast-forward.
    pub fn run_steps(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    fn fire_timer(&mut self, kind: TimerKind) -> SimResult<Vec<SimEvent>> {
        match kind {
            TimerKind::ResolutionCheck {
                ticket_id,
                assignee,
            } => {
                let rng = self.rng.get(SubsystemSlot::Tickets);
                let (events, outcome) = tickets::resolution_check(
                    &mut self.state,
                    &self.config.tickets,
                    rng,
                    ticket_id,
                    assignee,
                );
                if outcome == ResolutionOutcome::Resolved {
                    self.timers.schedule_wall(
                        self.state.wall_tick,
                        self.config.story.offer_delay_after_resolve,
                        TimerKind::StoryBeat {
                            beat: StoryBeat::ClientOffer,
                        },
                    );
                    self.save()?;
                }
                Ok(events)
            }
            TimerKind::StoryBeat { beat } => {
                Ok(story::run_beat(&mut self.state, &self.config.story, beat))
            }
            TimerKind::StaffReturn { role } => {
                self.state.staff.get_mut(role).count += 1;
                log::info!("{role} staffer returned to duty");
                Ok(vec![SimEvent::StaffReturned { role }])
            }
        }
    }

    /// Hourly boundary: ticket countdown sweep, then staff mood drift.
    fn hourly(&mut self) -> SimResult<Vec<SimEvent>> {
        let (events, failed) = tickets::hourly_sweep(&mut self.state, &self.config.tickets);
        if failed > 0 {
            // Progression continues even on failure.
            self.timers.schedule_wall(
                self.state.wall_tick,
                self.config.story.offer_delay_after_fail,
                TimerKind::StoryBeat {
                    beat: StoryBeat::ClientOffer,
                },
            );
        }

        staffing::hourly_mood_drift(
            &mut self.state,
            &self.config.staffing,
            self.rng.get(SubsystemSlot::Staffing),
        );
        Ok(events)
    }

    /// Daily boundary: settlement, end conditions, autosave.
    fn daily(&mut self) -> SimResult<Vec<SimEvent>> {
        let salaries = staffing::daily_payroll(&mut self.state);
        let revenue = client_subsystem::collect_daily_revenue(&mut self.state);
        let day = self.state.clock.day;
        log::info!("day {day}: salaries -${salaries}, revenue +${revenue}");

        let mut events = vec![SimEvent::DailySettlement {
            day,
            salaries,
            revenue,
        }];

        if let Some(outcome) = endings::evaluate(&self.state, &self.config.endings) {
            events.push(self.finish(outcome)?);
            return Ok(events);
        }

        self.save()?;
        Ok(events)
    }

    fn finish(&mut self, outcome: GameOutcome) -> SimResult<SimEvent> {
        let reason = match outcome {
            GameOutcome::Won { reason } | GameOutcome::Lost { reason } => reason,
        };
        log::info!("game ended: {}", reason.headline());
        self.state.outcome = Some(outcome);
        self.state.clock.pause();
        // Queue contract: nothing fires after a terminal outcome.
        self.timers.clear();
        self.save()?;
        Ok(SimEvent::GameEnded { outcome })
    }

    /// Apply one player action. Rejections leave the state untouched.
    pub fn handle_command(&mut self, cmd: PlayerCommand) -> Result<Vec<SimEvent>, ActionError> {
        if self.state.is_terminal() {
            return Err(ActionError::GameEnded);
        }

        match cmd {
            PlayerCommand::Pause => {
                self.state.clock.pause();
                Ok(vec![SimEvent::Paused])
            }
            PlayerCommand::Resume => {
                self.state.clock.resume();
                Ok(vec![SimEvent::Resumed])
            }
            PlayerCommand::AssignTicket {
                ticket_id,
                assignee,
            } => tickets::assign(
                &mut self.state,
                &mut self.timers,
                &self.config.tickets,
                ticket_id,
                assignee,
            ),
            PlayerCommand::AcceptClientOffer => {
                let events = story::accept_client(&mut self.state, &self.config.story)?;
                self.timers.schedule_wall(
                    self.state.wall_tick,
                    self.config.story.hiring_delay_after_accept,
                    TimerKind::StoryBeat {
                        beat: StoryBeat::HiringNeed,
                    },
                );
                Ok(events)
            }
            PlayerCommand::DeclineClientOffer => {
                let events = story::decline_client(&mut self.state, &self.config.story)?;
                self.timers.schedule_wall(
                    self.state.wall_tick,
                    self.config.story.hiring_delay_after_decline,
                    TimerKind::StoryBeat {
                        beat: StoryBeat::HiringNeed,
                    },
                );
                Ok(events)
            }
            PlayerCommand::HireCandidate { index } => {
                let mut events = staffing::hire(&mut self.state, &self.config.staffing, index)?;
                if self.state.story_stage == StoryStage::NeedHire
                    && story::tutorial_complete(&self.state)
                    && story::advance(&mut self.state, StoryStage::Playing)
                {
                    events.push(SimEvent::TutorialComplete);
                }
                Ok(events)
            }
            PlayerCommand::UpgradePower => {
                power_subsystem::upgrade(&mut self.state, &self.config.power)
            }
            PlayerCommand::MaintainCooling => {
                cooling_subsystem::maintain(&mut self.state, &self.config.cooling)
            }
            PlayerCommand::OrderServer { cost } => {
                if self.state.money < cost {
                    return Err(ActionError::InsufficientFunds {
                        needed: cost,
                        available: self.state.money,
                    });
                }
                self.state.money -= cost;
                self.state.space_used += 1;
                log::info!("new server installed (${cost})");
                Ok(vec![SimEvent::ServerOrdered { cost }])
            }
        }
    }

    /// The full session as a plain-data snapshot.
    pub fn snapshot(&self) -> SaveGame {
        SaveGame {
            version: SAVE_VERSION,
            seed: self.seed,
            state: self.state.clone(),
            timers: self.timers.clone(),
        }
    }

    /// Persist the current session under its company name.
    pub fn save(&self) -> SimResult<()> {
        self.store.save_company(&self.state.company, &self.snapshot())
    }

    /// Pending logical timers. Exposed for tooling and tests.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Wall steps elapsed since game start.
    pub fn wall_tick(&self) -> Tick {
        self.state.wall_tick
    }
}
