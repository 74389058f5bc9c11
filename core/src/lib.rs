//! rackline-core — the simulation engine behind Rackline, a single-player
//! datacenter operations game.
//!
//! The engine is a single-writer, tick-driven state machine: one
//! `GameEngine` owns the `GameState` aggregate, a deterministic RNG bank,
//! a logical timer queue, and the SQLite company store. External layers
//! (UI, audio, bootstrap) consume the `SimEvent` stream and issue
//! `PlayerCommand`s; they never touch state directly.

pub mod clock;
pub mod client_subsystem;
pub mod command;
pub mod config;
pub mod cooling_subsystem;
pub mod endings;
pub mod engine;
pub mod error;
pub mod event;
pub mod power_subsystem;
pub mod random_events;
pub mod rng;
pub mod snapshot;
pub mod staffing;
pub mod state;
pub mod store;
pub mod story;
pub mod subsystem;
pub mod tickets;
pub mod timer;
pub mod types;
