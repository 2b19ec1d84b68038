//! Fundamental types for the vouch trust graph.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! participant identities and the rank/score parameters.

pub mod error;
pub mod identity;
pub mod params;

pub use error::{IdentityError, ParamsError};
pub use identity::Identity;
pub use params::{VouchParams, RANK_TIE_CAP, UNSET_RANK};
