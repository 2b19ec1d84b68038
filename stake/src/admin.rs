//! Owner-gated stake configuration.

use crate::error::StakeError;
use crate::gate::{StakeCheck, StakeGate};
use parking_lot::RwLock;
use std::sync::Arc;
use vouch_types::Identity;

struct AdminState {
    owner: Identity,
    gate: Option<Arc<dyn StakeGate>>,
    minimum_stake: u128,
}

/// Holds which [`StakeGate`] is consulted and the minimum it is held to.
///
/// Only the owner may change either. With no gate attached every identity
/// reports a stake of zero, so vouching is open exactly when the minimum is 0.
pub struct StakeAdmin {
    state: RwLock<AdminState>,
}

impl StakeAdmin {
    pub fn new(owner: Identity) -> Self {
        Self::with_minimum(owner, 0)
    }

    pub fn with_minimum(owner: Identity, minimum_stake: u128) -> Self {
        Self {
            state: RwLock::new(AdminState {
                owner,
                gate: None,
                minimum_stake,
            }),
        }
    }

    pub fn owner(&self) -> Identity {
        self.state.read().owner
    }

    pub fn minimum_stake(&self) -> u128 {
        self.state.read().minimum_stake
    }

    pub fn has_gate(&self) -> bool {
        self.state.read().gate.is_some()
    }

    /// Point the admin at a new stake gate.
    pub fn set_gate(&self, caller: &Identity, gate: Arc<dyn StakeGate>) -> Result<(), StakeError> {
        let mut state = self.state.write();
        Self::require_owner(&state, caller)?;
        state.gate = Some(gate);
        tracing::info!(owner = %caller, "stake gate replaced");
        Ok(())
    }

    /// Detach the current gate; every identity then reports zero stake.
    pub fn clear_gate(&self, caller: &Identity) -> Result<(), StakeError> {
        let mut state = self.state.write();
        Self::require_owner(&state, caller)?;
        state.gate = None;
        tracing::info!(owner = %caller, "stake gate cleared");
        Ok(())
    }

    pub fn set_minimum_stake(&self, caller: &Identity, minimum: u128) -> Result<(), StakeError> {
        let mut state = self.state.write();
        Self::require_owner(&state, caller)?;
        let previous = state.minimum_stake;
        state.minimum_stake = minimum;
        tracing::info!(owner = %caller, previous = %previous, minimum = %minimum, "minimum stake changed");
        Ok(())
    }

    pub fn transfer_ownership(&self, caller: &Identity, new_owner: Identity) -> Result<(), StakeError> {
        if new_owner.is_zero() {
            return Err(StakeError::InvalidOwner);
        }
        let mut state = self.state.write();
        Self::require_owner(&state, caller)?;
        state.owner = new_owner;
        tracing::info!(from = %caller, to = %new_owner, "stake gate ownership transferred");
        Ok(())
    }

    /// Evaluate `identity` against the configured gate and minimum.
    ///
    /// The configuration lock is released before the gate is queried, so a gate
    /// that calls back into this admin cannot deadlock.
    pub fn check(&self, identity: &Identity) -> StakeCheck {
        let (gate, minimum) = {
            let state = self.state.read();
            (state.gate.clone(), state.minimum_stake)
        };
        let stake = gate.map_or(0, |g| g.current_stake(identity));
        StakeCheck {
            identity: *identity,
            stake,
            minimum,
        }
    }

    fn require_owner(state: &AdminState, caller: &Identity) -> Result<(), StakeError> {
        if state.owner != *caller {
            return Err(StakeError::NotOwner { caller: *caller });
        }
        Ok(())
    }
}

impl std::fmt::Debug for StakeAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("StakeAdmin")
            .field("owner", &state.owner)
            .field("has_gate", &state.gate.is_some())
            .field("minimum_stake", &state.minimum_stake)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> Identity {
        Identity::from_low_u64(n)
    }

    #[test]
    fn no_gate_reports_zero_stake() {
        let admin = StakeAdmin::new(id(1));
        let check = admin.check(&id(2));
        assert_eq!(check.stake, 0);
        assert_eq!(check.minimum, 0);
        assert!(check.is_sufficient());
    }

    #[test]
    fn no_gate_with_positive_minimum_denies() {
        let admin = StakeAdmin::with_minimum(id(1), 5);
        assert!(!admin.check(&id(2)).is_sufficient());
    }

    #[test]
    fn owner_can_configure_gate_and_minimum() {
        let admin = StakeAdmin::new(id(1));
        admin
            .set_gate(&id(1), Arc::new(|_: &Identity| 50u128))
            .unwrap();
        admin.set_minimum_stake(&id(1), 40).unwrap();

        let check = admin.check(&id(9));
        assert_eq!(check.stake, 50);
        assert_eq!(check.minimum, 40);
        assert!(check.is_sufficient());
        assert!(admin.has_gate());

        admin.clear_gate(&id(1)).unwrap();
        assert!(!admin.has_gate());
        assert!(!admin.check(&id(9)).is_sufficient());
    }

    #[test]
    fn non_owner_rejected() {
        let admin = StakeAdmin::new(id(1));
        assert_eq!(
            admin.set_minimum_stake(&id(2), 10),
            Err(StakeError::NotOwner { caller: id(2) })
        );
        assert!(admin
            .set_gate(&id(2), Arc::new(|_: &Identity| 0u128))
            .is_err());
        assert!(admin.clear_gate(&id(2)).is_err());
        assert_eq!(admin.minimum_stake(), 0);
    }

    #[test]
    fn ownership_transfer() {
        let admin = StakeAdmin::new(id(1));
        assert_eq!(
            admin.transfer_ownership(&id(1), Identity::ZERO),
            Err(StakeError::InvalidOwner)
        );
        admin.transfer_ownership(&id(1), id(2)).unwrap();
        assert_eq!(admin.owner(), id(2));
        assert!(admin.set_minimum_stake(&id(1), 3).is_err());
        admin.set_minimum_stake(&id(2), 3).unwrap();
        assert_eq!(admin.minimum_stake(), 3);
    }

    #[test]
    fn gate_may_read_admin_during_check() {
        let admin = Arc::new(StakeAdmin::with_minimum(id(1), 7));
        let inner = Arc::clone(&admin);
        admin
            .set_gate(
                &id(1),
                Arc::new(move |_: &Identity| inner.minimum_stake()),
            )
            .unwrap();
        let check = admin.check(&id(3));
        assert_eq!(check.stake, 7);
        assert!(check.is_sufficient());
    }
}
