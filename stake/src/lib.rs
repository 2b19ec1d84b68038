//! Stake gating for new vouches.
//!
//! An identity may only vouch while its committed stake meets a configured
//! minimum. The stake itself lives outside the graph and is read through the
//! one-method [`StakeGate`] capability. Which gate is consulted, and the
//! minimum it is held to, are owned by the [`StakeAdmin`]; the graph only ever
//! reads through it.

pub mod admin;
pub mod error;
pub mod gate;

pub use admin::StakeAdmin;
pub use error::StakeError;
pub use gate::{StakeCheck, StakeGate};
