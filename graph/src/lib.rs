//! Vouch trust graph.
//!
//! Identities vouch for each other by adding directed edges. Each edge change
//! recomputes the destination's rank (lower is more trusted) and the scores of
//! both endpoints, then notifies subscribers. The first few vouches of a graph
//! are seeded at rank 1 to give the rank formula somewhere to start.
//!
//! ```
//! use std::sync::Arc;
//! use vouch_graph::{VouchEvent, VouchGraph};
//! use vouch_stake::StakeAdmin;
//! use vouch_types::{Identity, VouchParams};
//!
//! let owner = Identity::from_low_u64(1000);
//! let graph = VouchGraph::new(VouchParams::default(), Arc::new(StakeAdmin::new(owner))).unwrap();
//!
//! let (a, b) = (Identity::from_low_u64(1), Identity::from_low_u64(2));
//! let events = graph.add_edge(a, b).unwrap();
//! assert!(matches!(events.last(), Some(VouchEvent::SeedVouchCreated { index: 0, .. })));
//! assert_eq!(graph.rank(&b), 1);
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod event;
pub mod graph;
pub mod node;
pub mod rank;
pub mod score;
pub mod store;

pub use bootstrap::{BootstrapController, SeedAdmission};
pub use config::GraphConfig;
pub use error::{ConfigError, ErrorKind, GraphError};
pub use event::{EventBus, VouchEvent};
pub use graph::{GraphSnapshot, VouchGraph};
pub use node::{NodeInfo, NodeRecord};
pub use rank::compute_rank;
pub use score::{compute_score, weight};
pub use store::{Activation, GraphStore};
