//! Per-identity records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vouch_types::{Identity, UNSET_RANK};

/// Everything the graph keeps for one identity.
///
/// A record is created the first time an edge touches the identity and is
/// never removed afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stored rank; [`UNSET_RANK`] until first ranked or after losing every voucher.
    pub rank: u64,
    pub score: u64,
    pub out_degree: u64,
    pub in_neighbors: HashSet<Identity>,
    pub out_neighbors: HashSet<Identity>,
}

impl NodeRecord {
    pub fn new() -> Self {
        Self {
            rank: UNSET_RANK,
            ..Self::default()
        }
    }
}

/// Aggregate view returned by [`crate::VouchGraph::node_info`].
///
/// Neighbour lists are in no particular order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub identity: Identity,
    /// Whether any edge has ever touched this identity.
    pub activated: bool,
    /// Effective rank.
    pub rank: u64,
    pub score: u64,
    pub out_degree: u64,
    pub in_neighbors: Vec<Identity>,
    pub out_neighbors: Vec<Identity>,
}
