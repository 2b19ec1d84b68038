//! Bootstrap window.
//!
//! The first `max_seed_vouches` successful insertions are seeded: both
//! endpoints are forced to rank 1 instead of going through the rank engine.
//! Once the window closes it never reopens, and removals never touch it.

use serde::{Deserialize, Serialize};

/// Outcome of admitting one insertion into the bootstrap window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedAdmission {
    /// Seed count before this insertion.
    pub index: u32,
    /// Whether this insertion closed the window.
    pub completes: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapController {
    seed_count: u32,
    max_seed_vouches: u32,
}

impl BootstrapController {
    pub fn new(max_seed_vouches: u32) -> Self {
        Self {
            seed_count: 0,
            max_seed_vouches,
        }
    }

    /// Rebuild a controller at a given point of its window.
    ///
    /// Counts above the maximum are clamped to it.
    pub fn resume(seed_count: u32, max_seed_vouches: u32) -> Self {
        Self {
            seed_count: seed_count.min(max_seed_vouches),
            max_seed_vouches,
        }
    }

    pub fn seed_count(&self) -> u32 {
        self.seed_count
    }

    pub fn max_seed_vouches(&self) -> u32 {
        self.max_seed_vouches
    }

    pub fn is_complete(&self) -> bool {
        self.seed_count >= self.max_seed_vouches
    }

    /// Take a seed slot for the insertion being applied, if one is left.
    pub fn admit(&mut self) -> Option<SeedAdmission> {
        if self.is_complete() {
            return None;
        }
        let index = self.seed_count;
        self.seed_count += 1;
        Some(SeedAdmission {
            index,
            completes: self.seed_count == self.max_seed_vouches,
        })
    }
}
