//! Shared primitive types used across the entire simulation.

/// A wall tick. One engine step — 2 real seconds at the reference cadence.
pub type Tick = u64;

/// Monotonic incident ticket identifier, allocated by `GameState`.
pub type TicketId = u64;

/// Monotonic inbox message identifier, allocated by `GameState`.
pub type MessageId = u64;
