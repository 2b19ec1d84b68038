//! Rank engine.
//!
//! `rank(v) = 3k + 1 - m`, where `k` is the best (lowest) effective rank among
//! `v`'s vouchers and `m` is how many vouchers share it, capped at
//! [`RANK_TIE_CAP`]. No vouchers means the rank is unset.
//!
//! Only the destination of an edge operation is recomputed. Its own followers
//! keep their previous rank until an edge of theirs changes.

use crate::store::GraphStore;
use vouch_types::{Identity, VouchParams, RANK_TIE_CAP, UNSET_RANK};

/// Rank from the effective ranks of a node's in-neighbours.
///
/// Saturates at `u64::MAX` instead of overflowing on very long chains.
pub fn compute_rank<I>(in_ranks: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let mut best: Option<(u64, u64)> = None;
    for rank in in_ranks {
        best = match best {
            None => Some((rank, 1)),
            Some((k, _)) if rank < k => Some((rank, 1)),
            Some((k, m)) if rank == k => Some((k, m + 1)),
            keep => keep,
        };
    }
    match best {
        None => UNSET_RANK,
        Some((k, m)) => k.saturating_mul(3).saturating_add(1) - m.min(RANK_TIE_CAP),
    }
}

/// Recompute and store the rank of `v` from the current graph.
///
/// Returns the new stored rank.
pub fn recompute_rank(store: &mut GraphStore, params: &VouchParams, v: &Identity) -> u64 {
    let rank = compute_rank(
        store
            .in_neighbors(v)
            .map(|u| params.effective_rank(store.stored_rank(u))),
    );
    store.set_rank(v, rank);
    rank
}
