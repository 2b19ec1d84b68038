//! Identity and parameter errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity must be {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("identity is not valid hex: {0}")]
    InvalidHex(String),
}

/// Rejected parameter combinations, see [`crate::VouchParams::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("default rank must be non-zero")]
    ZeroDefaultRank,

    #[error("weight cap must be non-zero")]
    ZeroWeightCap,

    #[error("weight cap {weight_cap} must be below the default rank {default_rank}")]
    WeightCapNotBelowDefault { weight_cap: u64, default_rank: u64 },

    #[error("weight cap {0} exceeds the maximum of 32")]
    WeightCapTooLarge(u64),
}
