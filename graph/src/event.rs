//! Change notifications emitted after each committed mutation.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vouch_types::Identity;

/// Graph-level events that observers can subscribe to via the [`EventBus`].
///
/// For one mutation they are emitted in this order: activations (`from`
/// before `to`), the destination's rank change, the operation summary, and
/// finally [`VouchEvent::BootstrapComplete`] when the window closed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VouchEvent {
    /// An edge touched this identity for the first time.
    Activated { identity: Identity },
    /// The destination's effective rank changed.
    RankChanged {
        identity: Identity,
        old_rank: u64,
        new_rank: u64,
    },
    /// A vouch was added outside the bootstrap window.
    VouchCreated {
        from: Identity,
        to: Identity,
        rank_to: u64,
        score_from: u64,
        score_to: u64,
    },
    /// A vouch was added inside the bootstrap window.
    SeedVouchCreated {
        /// Seed count before this vouch.
        index: u32,
        from: Identity,
        to: Identity,
        rank_to: u64,
        score_from: u64,
        score_to: u64,
    },
    /// The bootstrap window closed. Emitted once per graph.
    BootstrapComplete { seed_count: u32 },
    VouchRemoved {
        from: Identity,
        to: Identity,
        rank_to: u64,
        score_from: u64,
        score_to: u64,
    },
}

type Listener = Arc<dyn Fn(&VouchEvent) + Send + Sync>;

/// Synchronous fan-out bus for [`VouchEvent`]s.
///
/// Listeners run inline on the mutating thread, after the change is committed
/// and with no bus lock held, so a listener may subscribe further listeners
/// or query the graph.
pub struct EventBus {
    listeners: RwLock<Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&VouchEvent) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn emit(&self, event: &VouchEvent) {
        let listeners: Vec<Listener> = self.listeners.read().clone();
        for listener in &listeners {
            listener(event);
        }
    }

    pub fn emit_all(&self, events: &[VouchEvent]) {
        for event in events {
            self.emit(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
