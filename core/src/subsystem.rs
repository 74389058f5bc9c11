//! Subsystem trait.
//!
//! RULE: the engine calls `update()` on each registered subsystem once
//! per unpaused step, in registration order. The order is fixed and
//! documented in engine.rs: power → cooling → clients → random events.
//! Later subsystems observe earlier subsystems' effects within the
//! same tick.

use crate::{
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    state::GameState,
    timer::TimerQueue,
};

/// The contract every per-tick subsystem fulfills.
pub trait Subsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per unpaused step.
    ///
    /// - `state`:  the single-writer state aggregate
    /// - `timers`: the logical timer queue, for delayed follow-ups
    /// - `rng`:    this subsystem's deterministic stream
    fn update(
        &mut self,
        state: &mut GameState,
        timers: &mut TimerQueue,
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>>;
}
