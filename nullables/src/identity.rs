//! Deterministic identity source.

use std::sync::atomic::{AtomicU64, Ordering};
use vouch_types::Identity;

/// Hands out distinct non-null identities in a fixed order.
pub struct NullIdentities {
    next: AtomicU64,
}

impl NullIdentities {
    /// Starts at `Identity::from_low_u64(1)`.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts at `Identity::from_low_u64(first)`. A `first` of 0 is bumped to 1.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first.max(1)),
        }
    }

    pub fn next(&self) -> Identity {
        Identity::from_low_u64(self.next.fetch_add(1, Ordering::SeqCst))
    }

    pub fn take(&self, n: usize) -> Vec<Identity> {
        (0..n).map(|_| self.next()).collect()
    }
}

impl Default for NullIdentities {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_and_never_null() {
        let ids = NullIdentities::starting_at(0);
        let batch = ids.take(3);
        assert_eq!(
            batch,
            vec![
                Identity::from_low_u64(1),
                Identity::from_low_u64(2),
                Identity::from_low_u64(3)
            ]
        );
        assert!(batch.iter().all(|id| !id.is_zero()));
        assert_eq!(ids.next(), Identity::from_low_u64(4));
    }
}
