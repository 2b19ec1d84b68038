//! Graph errors.

use thiserror::Error;
use vouch_types::{Identity, ParamsError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("{0} cannot vouch for itself")]
    SelfLoop(Identity),

    #[error("the null identity cannot be a vouch endpoint")]
    InvalidIdentity,

    #[error("{from} already vouches for {to}")]
    DuplicateEdge { from: Identity, to: Identity },

    #[error("{from} does not vouch for {to}")]
    EdgeNotFound { from: Identity, to: Identity },

    #[error("stake of {identity} is {stake}, minimum is {minimum}")]
    PolicyDenied {
        identity: Identity,
        stake: u128,
        minimum: u128,
    },

    #[error("graph integrity violated: {0}")]
    IntegrityViolation(String),

    #[error("a vouch mutation is already in progress on this graph")]
    Reentrant,

    #[error("invalid parameters: {0}")]
    Params(#[from] ParamsError),
}

/// Failure loading or writing a [`crate::GraphConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid parameters in config: {0}")]
    Params(#[from] ParamsError),
}

/// Coarse classification of [`GraphError`] for callers deciding what to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request: null identity, self-loop, bad parameters.
    Validation,
    /// Request conflicts with the current edges.
    StateConflict,
    /// Stake below the configured minimum.
    PolicyDenied,
    /// Adjacency and edge index disagree. Fatal for the store.
    IntegrityViolation,
    /// Mutation attempted from inside another mutation's callbacks.
    Reentrancy,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfLoop(_) | Self::InvalidIdentity | Self::Params(_) => ErrorKind::Validation,
            Self::DuplicateEdge { .. } | Self::EdgeNotFound { .. } => ErrorKind::StateConflict,
            Self::PolicyDenied { .. } => ErrorKind::PolicyDenied,
            Self::IntegrityViolation(_) => ErrorKind::IntegrityViolation,
            Self::Reentrant => ErrorKind::Reentrancy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let a = Identity::from_low_u64(1);
        let b = Identity::from_low_u64(2);
        assert_eq!(GraphError::SelfLoop(a).kind(), ErrorKind::Validation);
        assert_eq!(GraphError::InvalidIdentity.kind(), ErrorKind::Validation);
        assert_eq!(
            GraphError::DuplicateEdge { from: a, to: b }.kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            GraphError::EdgeNotFound { from: a, to: b }.kind(),
            ErrorKind::StateConflict
        );
        assert_eq!(
            GraphError::PolicyDenied {
                identity: a,
                stake: 1,
                minimum: 2
            }
            .kind(),
            ErrorKind::PolicyDenied
        );
        assert_eq!(GraphError::Reentrant.kind(), ErrorKind::Reentrancy);
        assert_eq!(
            GraphError::from(ParamsError::ZeroWeightCap).kind(),
            ErrorKind::Validation
        );
    }
}
