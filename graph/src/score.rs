//! Score engine.
//!
//! `score(a) = Σ weight(rank(u)) over a's vouchers + out_bonus · min(out_degree(a), out_bonus_cap)`
//! with `weight(r) = 2^(R - r)` for ranks `1..=R` below the default rank and 0
//! otherwise. Weights come from each voucher's rank at recompute time, never
//! from the moment the edge was created.

use crate::store::GraphStore;
use vouch_types::{Identity, VouchParams};

/// Weight one voucher of effective rank `rank` contributes.
///
/// Weights that would not fit in a `u64` count as 0; validated parameters
/// never produce one.
pub fn weight(params: &VouchParams, rank: u64) -> u64 {
    if rank < 1 || rank > params.weight_cap || rank >= params.default_rank {
        return 0;
    }
    u32::try_from(params.weight_cap - rank)
        .ok()
        .and_then(|shift| 1u64.checked_shl(shift))
        .unwrap_or(0)
}

pub fn compute_score<I>(params: &VouchParams, in_ranks: I, out_degree: u64) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let inbound = in_ranks
        .into_iter()
        .fold(0u64, |acc, r| acc.saturating_add(weight(params, r)));
    let bonus = params
        .out_bonus
        .saturating_mul(out_degree.min(params.out_bonus_cap));
    inbound.saturating_add(bonus)
}

/// Recompute and store the score of `a` from the current graph.
pub fn recompute_score(store: &mut GraphStore, params: &VouchParams, a: &Identity) -> u64 {
    let score = compute_score(
        params,
        store
            .in_neighbors(a)
            .map(|u| params.effective_rank(store.stored_rank(u))),
        store.out_degree(a),
    );
    store.set_score(a, score);
    score
}
