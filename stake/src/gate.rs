//! The stake lookup capability.

use vouch_types::Identity;

/// Answers "how much has this identity committed?".
///
/// Implementations are external code: they may be slow, and they may call back
/// into the graph. The graph never holds its state borrowed across a call.
pub trait StakeGate: Send + Sync {
    fn current_stake(&self, identity: &Identity) -> u128;
}

impl<F> StakeGate for F
where
    F: Fn(&Identity) -> u128 + Send + Sync,
{
    fn current_stake(&self, identity: &Identity) -> u128 {
        self(identity)
    }
}

/// Outcome of evaluating one identity against the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeCheck {
    pub identity: Identity,
    pub stake: u128,
    pub minimum: u128,
}

impl StakeCheck {
    pub fn is_sufficient(&self) -> bool {
        self.stake >= self.minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_gates() {
        let gate = |id: &Identity| if id.is_zero() { 0 } else { 10 };
        assert_eq!(gate.current_stake(&Identity::from_low_u64(1)), 10);
        assert_eq!(gate.current_stake(&Identity::ZERO), 0);
    }

    #[test]
    fn check_at_exact_minimum_is_sufficient() {
        let check = StakeCheck {
            identity: Identity::from_low_u64(1),
            stake: 100,
            minimum: 100,
        };
        assert!(check.is_sufficient());
        assert!(!StakeCheck { stake: 99, ..check }.is_sufficient());
    }
}
