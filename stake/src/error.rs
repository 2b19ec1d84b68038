//! Administrator errors.

use thiserror::Error;
use vouch_types::Identity;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakeError {
    #[error("{caller} is not the stake gate owner")]
    NotOwner { caller: Identity },

    #[error("the null identity cannot own the stake gate")]
    InvalidOwner,
}
