//! Rank and score parameters.
//!
//! The defaults are the values every deployment of the graph has used so far;
//! changing them changes every derived rank and score.

use crate::error::ParamsError;
use serde::{Deserialize, Serialize};

/// Stored rank meaning "never ranked". Reads resolve it to the default rank.
pub const UNSET_RANK: u64 = 0;

/// Maximum number of in-neighbours tied at the best rank that improve the
/// computed rank. Fixed: `3k + 1 - m` stays at least 1 only while `m <= 3`.
pub const RANK_TIE_CAP: u64 = 3;

/// Tunable constants for the rank and score engines and the bootstrap window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VouchParams {
    /// Effective rank of an identity whose stored rank is unset.
    pub default_rank: u64,

    /// Highest rank (`R`) that still carries weight: `weight(r) = 2^(R - r)`.
    pub weight_cap: u64,

    /// Number of seeded vouches in the bootstrap window.
    pub max_seed_vouches: u32,

    /// Score bonus per outgoing vouch.
    pub out_bonus: u64,

    /// Outgoing vouches beyond this count earn no further bonus.
    pub out_bonus_cap: u64,
}

impl VouchParams {
    /// Resolve a stored rank to the rank used by every computation.
    pub fn effective_rank(&self, stored: u64) -> u64 {
        if stored == UNSET_RANK {
            self.default_rank
        } else {
            stored
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.default_rank == 0 {
            return Err(ParamsError::ZeroDefaultRank);
        }
        if self.weight_cap == 0 {
            return Err(ParamsError::ZeroWeightCap);
        }
        if self.weight_cap > 32 {
            return Err(ParamsError::WeightCapTooLarge(self.weight_cap));
        }
        if self.weight_cap >= self.default_rank {
            return Err(ParamsError::WeightCapNotBelowDefault {
                weight_cap: self.weight_cap,
                default_rank: self.default_rank,
            });
        }
        Ok(())
    }
}

impl Default for VouchParams {
    fn default() -> Self {
        Self {
            default_rank: 6,
            weight_cap: 5,
            max_seed_vouches: 5,
            out_bonus: 1,
            out_bonus_cap: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = VouchParams::default();
        assert_eq!(params.default_rank, 6);
        assert_eq!(params.weight_cap, 5);
        assert_eq!(params.max_seed_vouches, 5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn unset_rank_resolves_to_default() {
        let params = VouchParams::default();
        assert_eq!(params.effective_rank(UNSET_RANK), 6);
        assert_eq!(params.effective_rank(1), 1);
        assert_eq!(params.effective_rank(17), 17);
    }

    #[test]
    fn weight_cap_must_stay_below_default_rank() {
        let params = VouchParams {
            weight_cap: 6,
            ..VouchParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::WeightCapNotBelowDefault {
                weight_cap: 6,
                default_rank: 6
            })
        );
    }

    #[test]
    fn zero_values_rejected() {
        let zero_default = VouchParams {
            default_rank: 0,
            ..VouchParams::default()
        };
        assert_eq!(zero_default.validate(), Err(ParamsError::ZeroDefaultRank));

        let zero_cap = VouchParams {
            weight_cap: 0,
            ..VouchParams::default()
        };
        assert_eq!(zero_cap.validate(), Err(ParamsError::ZeroWeightCap));
    }

    #[test]
    fn oversized_weight_cap_rejected() {
        let params = VouchParams {
            default_rank: 40,
            weight_cap: 33,
            ..VouchParams::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::WeightCapTooLarge(33)));
    }
}
