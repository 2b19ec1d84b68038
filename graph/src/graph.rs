//! The vouch graph façade.
//!
//! Ties the store, the rank and score engines, the bootstrap window and the
//! change notifier into one serialized mutation surface.
//!
//! Every call takes a store-wide reentrant lock. Mutations additionally set a
//! busy flag for their whole duration, including the stake query and
//! notification dispatch, so external code called back by a mutation can read
//! the graph but cannot mutate it.

use crate::bootstrap::BootstrapController;
use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::event::{EventBus, VouchEvent};
use crate::node::NodeInfo;
use crate::rank::recompute_rank;
use crate::score::recompute_score;
use crate::store::GraphStore;
use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use vouch_stake::StakeAdmin;
use vouch_types::{Identity, VouchParams};

/// Rank given to both endpoints of a seeded vouch.
const SEED_RANK: u64 = 1;

/// Complete, comparable copy of a graph's state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub seed_count: u32,
    pub store: GraphStore,
}

struct GraphState {
    store: GraphStore,
    bootstrap: BootstrapController,
}

struct Core {
    state: RefCell<GraphState>,
    busy: Cell<bool>,
    poisoned: Cell<bool>,
}

/// Clears the busy flag when a mutation ends, however it ends.
struct BusyGuard<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

pub struct VouchGraph {
    core: ReentrantMutex<Core>,
    admin: Arc<StakeAdmin>,
    params: VouchParams,
    events: EventBus,
}

impl VouchGraph {
    pub fn new(params: VouchParams, admin: Arc<StakeAdmin>) -> Result<Self, GraphError> {
        params.validate()?;
        let bootstrap = BootstrapController::new(params.max_seed_vouches);
        Ok(Self::with_state(params, admin, GraphStore::new(), bootstrap))
    }

    /// Build a graph with the admin and parameters described by `config`.
    ///
    /// No stake gate is attached; the owner sets one through [`VouchGraph::admin`].
    pub fn from_config(config: &GraphConfig, owner: Identity) -> Result<Self, GraphError> {
        let admin = StakeAdmin::with_minimum(owner, u128::from(config.minimum_stake));
        Self::new(config.params.clone(), Arc::new(admin))
    }

    /// Rebuild a graph from a snapshot after checking its structure.
    pub fn restore(
        params: VouchParams,
        admin: Arc<StakeAdmin>,
        snapshot: GraphSnapshot,
    ) -> Result<Self, GraphError> {
        params.validate()?;
        snapshot.store.verify_integrity()?;
        let bootstrap = BootstrapController::resume(snapshot.seed_count, params.max_seed_vouches);
        Ok(Self::with_state(params, admin, snapshot.store, bootstrap))
    }

    fn with_state(
        params: VouchParams,
        admin: Arc<StakeAdmin>,
        store: GraphStore,
        bootstrap: BootstrapController,
    ) -> Self {
        Self {
            core: ReentrantMutex::new(Core {
                state: RefCell::new(GraphState { store, bootstrap }),
                busy: Cell::new(false),
                poisoned: Cell::new(false),
            }),
            admin,
            params,
            events: EventBus::new(),
        }
    }

    pub fn params(&self) -> &VouchParams {
        &self.params
    }

    pub fn admin(&self) -> &Arc<StakeAdmin> {
        &self.admin
    }

    /// Register a listener for every event emitted after this call.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&VouchEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(listener);
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// `from` vouches for `to`.
    ///
    /// Returns the emitted events in emission order. On error nothing changed
    /// and nothing was emitted.
    pub fn add_edge(&self, from: Identity, to: Identity) -> Result<Vec<VouchEvent>, GraphError> {
        let core = self.core.lock();
        let _busy = Self::begin(&core)?;

        let checked = core.state.borrow().store.check_insert(&from, &to);
        checked.map_err(|e| Self::reject(&core, e))?;

        let stake = self.admin.check(&from);
        if !stake.is_sufficient() {
            warn!(
                from = %from,
                to = %to,
                stake = %stake.stake,
                minimum = %stake.minimum,
                "vouch denied: insufficient stake"
            );
            return Err(GraphError::PolicyDenied {
                identity: from,
                stake: stake.stake,
                minimum: stake.minimum,
            });
        }

        let events = {
            let mut state = core.state.borrow_mut();
            let GraphState { store, bootstrap } = &mut *state;
            self.apply_insert(store, bootstrap, from, to)
        };
        self.events.emit_all(&events);
        Ok(events)
    }

    /// `from` withdraws its vouch for `to`.
    pub fn remove_edge(
        &self,
        from: Identity,
        to: Identity,
    ) -> Result<Vec<VouchEvent>, GraphError> {
        let core = self.core.lock();
        let _busy = Self::begin(&core)?;

        let checked = core.state.borrow().store.check_remove(&from, &to);
        checked.map_err(|e| Self::reject(&core, e))?;

        let events = {
            let mut state = core.state.borrow_mut();
            self.apply_remove(&mut state.store, from, to)
        };
        self.events.emit_all(&events);
        Ok(events)
    }

    fn begin(core: &Core) -> Result<BusyGuard<'_>, GraphError> {
        if core.busy.get() {
            warn!("rejected vouch mutation issued from inside another mutation");
            return Err(GraphError::Reentrant);
        }
        if core.poisoned.get() {
            return Err(GraphError::IntegrityViolation(
                "store poisoned by an earlier integrity violation".to_string(),
            ));
        }
        core.busy.set(true);
        Ok(BusyGuard { busy: &core.busy })
    }

    fn reject(core: &Core, err: GraphError) -> GraphError {
        if let GraphError::IntegrityViolation(detail) = &err {
            error!(detail = %detail, "graph integrity violation, refusing further mutations");
            core.poisoned.set(true);
        }
        err
    }

    fn apply_insert(
        &self,
        store: &mut GraphStore,
        bootstrap: &mut BootstrapController,
        from: Identity,
        to: Identity,
    ) -> Vec<VouchEvent> {
        let params = &self.params;
        let rank_before = params.effective_rank(store.stored_rank(&to));
        let activation = store.insert_edge(from, to);

        let mut events = Vec::new();
        if activation.from {
            events.push(VouchEvent::Activated { identity: from });
        }
        if activation.to {
            events.push(VouchEvent::Activated { identity: to });
        }

        match bootstrap.admit() {
            Some(seed) => {
                store.set_rank(&from, SEED_RANK);
                store.set_rank(&to, SEED_RANK);
                let score_from = recompute_score(store, params, &from);
                let score_to = recompute_score(store, params, &to);
                push_rank_change(&mut events, to, rank_before, SEED_RANK);
                debug!(
                    index = seed.index,
                    from = %from,
                    to = %to,
                    score_from,
                    score_to,
                    "seed vouch created"
                );
                events.push(VouchEvent::SeedVouchCreated {
                    index: seed.index,
                    from,
                    to,
                    rank_to: SEED_RANK,
                    score_from,
                    score_to,
                });
                if seed.completes {
                    info!(seed_count = bootstrap.seed_count(), "bootstrap window closed");
                    events.push(VouchEvent::BootstrapComplete {
                        seed_count: bootstrap.seed_count(),
                    });
                }
            }
            None => {
                let rank_to = params.effective_rank(recompute_rank(store, params, &to));
                let score_from = recompute_score(store, params, &from);
                let score_to = recompute_score(store, params, &to);
                push_rank_change(&mut events, to, rank_before, rank_to);
                debug!(from = %from, to = %to, rank_to, score_from, score_to, "vouch created");
                events.push(VouchEvent::VouchCreated {
                    from,
                    to,
                    rank_to,
                    score_from,
                    score_to,
                });
            }
        }
        events
    }

    fn apply_remove(&self, store: &mut GraphStore, from: Identity, to: Identity) -> Vec<VouchEvent> {
        let params = &self.params;
        let rank_before = params.effective_rank(store.stored_rank(&to));
        store.remove_edge(&from, &to);

        let rank_to = params.effective_rank(recompute_rank(store, params, &to));
        let score_from = recompute_score(store, params, &from);
        let score_to = recompute_score(store, params, &to);

        let mut events = Vec::new();
        push_rank_change(&mut events, to, rank_before, rank_to);
        debug!(from = %from, to = %to, rank_to, score_from, score_to, "vouch removed");
        events.push(VouchEvent::VouchRemoved {
            from,
            to,
            rank_to,
            score_from,
            score_to,
        });
        events
    }

    // ── Queries ────────────────────────────────────────────────────────

    fn read<R>(&self, f: impl FnOnce(&GraphState) -> R) -> R {
        let core = self.core.lock();
        let state = core.state.borrow();
        f(&*state)
    }

    /// Effective rank; unknown identities report the default rank.
    pub fn rank(&self, identity: &Identity) -> u64 {
        let stored = self.read(|s| s.store.stored_rank(identity));
        self.params.effective_rank(stored)
    }

    pub fn score(&self, identity: &Identity) -> u64 {
        self.read(|s| s.store.node(identity).map_or(0, |n| n.score))
    }

    pub fn out_degree(&self, identity: &Identity) -> u64 {
        self.read(|s| s.store.out_degree(identity))
    }

    /// Vouchers of `identity`, sorted.
    pub fn in_neighbors(&self, identity: &Identity) -> Vec<Identity> {
        self.read(|s| sorted(s.store.in_neighbors(identity)))
    }

    /// Identities `identity` vouches for, sorted.
    pub fn out_neighbors(&self, identity: &Identity) -> Vec<Identity> {
        self.read(|s| sorted(s.store.out_neighbors(identity)))
    }

    pub fn has_edge(&self, from: &Identity, to: &Identity) -> bool {
        self.read(|s| s.store.has_edge(from, to))
    }

    pub fn node_info(&self, identity: &Identity) -> NodeInfo {
        self.read(|s| NodeInfo {
            identity: *identity,
            activated: s.store.node(identity).is_some(),
            rank: self.params.effective_rank(s.store.stored_rank(identity)),
            score: s.store.node(identity).map_or(0, |n| n.score),
            out_degree: s.store.out_degree(identity),
            in_neighbors: sorted(s.store.in_neighbors(identity)),
            out_neighbors: sorted(s.store.out_neighbors(identity)),
        })
    }

    pub fn is_activated(&self, identity: &Identity) -> bool {
        self.read(|s| s.store.node(identity).is_some())
    }

    pub fn seed_count(&self) -> u32 {
        self.read(|s| s.bootstrap.seed_count())
    }

    /// Whether the bootstrap window has closed.
    pub fn is_bootstrapped(&self) -> bool {
        self.read(|s| s.bootstrap.is_complete())
    }

    pub fn node_count(&self) -> usize {
        self.read(|s| s.store.node_count())
    }

    pub fn edge_count(&self) -> usize {
        self.read(|s| s.store.edge_count())
    }

    /// Whether an integrity violation has frozen the graph.
    pub fn is_poisoned(&self) -> bool {
        self.core.lock().poisoned.get()
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.read(|s| GraphSnapshot {
            seed_count: s.bootstrap.seed_count(),
            store: s.store.clone(),
        })
    }

    /// Full structural scan. A failure poisons the graph.
    pub fn verify_integrity(&self) -> Result<(), GraphError> {
        let core = self.core.lock();
        let checked = core.state.borrow().store.verify_integrity();
        checked.map_err(|e| Self::reject(&core, e))
    }
}

impl std::fmt::Debug for VouchGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VouchGraph")
            .field("params", &self.params)
            .field("admin", &self.admin)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

fn push_rank_change(events: &mut Vec<VouchEvent>, identity: Identity, old_rank: u64, new_rank: u64) {
    if old_rank != new_rank {
        events.push(VouchEvent::RankChanged {
            identity,
            old_rank,
            new_rank,
        });
    }
}

fn sorted<'a>(ids: impl Iterator<Item = &'a Identity>) -> Vec<Identity> {
    let mut out: Vec<Identity> = ids.copied().collect();
    out.sort_unstable();
    out
}
