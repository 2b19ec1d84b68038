//! Nullable infrastructure for deterministic testing.
//!
//! The graph's only external dependency is the stake lookup. This crate
//! provides a programmable stand-in for it plus a deterministic identity
//! source, so tests never need a real staking backend.

pub mod identity;
pub mod stake;

pub use identity::NullIdentities;
pub use stake::NullStakeGate;
