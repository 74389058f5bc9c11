//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call a platform RNG. All
//! randomness flows through `SubsystemRng` streams derived from the
//! single master seed stored in the save game.
//!
//! Each subsystem gets its own stream, seeded from
//! (master_seed XOR slot index). Adding a new subsystem never perturbs
//! existing subsystems' streams, and each stream is reproducible in
//! isolation. Streams are created once per run and persist across
//! ticks, so successive ticks draw fresh values.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single subsystem.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    /// Create a subsystem RNG from the master seed and a stable slot
    /// index. The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

/// All subsystem RNG streams for a single run, indexed by stable slot.
pub struct RngBank {
    streams: Vec<SubsystemRng>,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        let streams = SubsystemSlot::ALL
            .iter()
            .map(|slot| SubsystemRng::new(master_seed, *slot as u64).with_name(slot.name()))
            .collect();
        Self { streams }
    }

    pub fn get(&mut self, slot: SubsystemSlot) -> &mut SubsystemRng {
        &mut self.streams[slot as usize]
    }
}

/// Stable subsystem slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every subsystem's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum SubsystemSlot {
    Power = 0,
    Cooling = 1,
    Clients = 2,
    Events = 3,
    Staffing = 4,
    Tickets = 5,
    Story = 6,
}

impl SubsystemSlot {
    pub const ALL: [SubsystemSlot; 7] = [
        Self::Power,
        Self::Cooling,
        Self::Clients,
        Self::Events,
        Self::Staffing,
        Self::Tickets,
        Self::Story,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Cooling => "cooling",
            Self::Clients => "clients",
            Self::Events => "events",
            Self::Staffing => "staffing",
            Self::Tickets => "tickets",
            Self::Story => "story",
        }
    }
}
