//! Nullable stake gate with programmable balances.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use vouch_stake::StakeGate;
use vouch_types::Identity;

/// A [`StakeGate`] whose answers are set by the test.
///
/// Identities without an explicit stake report the default stake. Every query
/// is counted so tests can assert whether the gate was consulted.
pub struct NullStakeGate {
    stakes: Mutex<HashMap<Identity, u128>>,
    default_stake: u128,
    queries: AtomicUsize,
}

impl NullStakeGate {
    pub fn new(default_stake: u128) -> Self {
        Self {
            stakes: Mutex::new(HashMap::new()),
            default_stake,
            queries: AtomicUsize::new(0),
        }
    }

    /// Every identity reports zero unless told otherwise.
    pub fn empty() -> Self {
        Self::new(0)
    }

    pub fn set_stake(&self, identity: Identity, stake: u128) {
        self.stakes.lock().insert(identity, stake);
    }

    /// Builder form of [`NullStakeGate::set_stake`].
    pub fn with_stake(self, identity: Identity, stake: u128) -> Self {
        self.set_stake(identity, stake);
        self
    }

    /// How many times [`StakeGate::current_stake`] has been called.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl StakeGate for NullStakeGate {
    fn current_stake(&self, identity: &Identity) -> u128 {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.stakes
            .lock()
            .get(identity)
            .copied()
            .unwrap_or(self.default_stake)
    }
}
