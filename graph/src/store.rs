//! Graph store: adjacency sets, the edge-existence index and out-degree counters.
//!
//! The store owns every structural mutation. Mutations are split into a
//! fallible `check_*` step that inspects state and an infallible apply step,
//! so a failed request never leaves a partial change behind.

use crate::error::GraphError;
use crate::node::NodeRecord;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use vouch_types::{Identity, UNSET_RANK};

/// Which endpoints an insertion touched for the first time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Activation {
    pub from: bool,
    pub to: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStore {
    nodes: HashMap<Identity, NodeRecord>,
    edges: HashSet<(Identity, Identity)>,
}

/// Reject self-loops first, then the null identity on either end.
pub fn validate_endpoints(from: &Identity, to: &Identity) -> Result<(), GraphError> {
    if from == to {
        return Err(GraphError::SelfLoop(*from));
    }
    if from.is_zero() || to.is_zero() {
        return Err(GraphError::InvalidIdentity);
    }
    Ok(())
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &Identity) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    pub fn has_edge(&self, from: &Identity, to: &Identity) -> bool {
        self.edges.contains(&(*from, *to))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Stored rank, [`UNSET_RANK`] for identities without a record.
    pub fn stored_rank(&self, id: &Identity) -> u64 {
        self.nodes.get(id).map_or(UNSET_RANK, |n| n.rank)
    }

    pub fn in_neighbors(&self, id: &Identity) -> impl Iterator<Item = &Identity> {
        self.nodes.get(id).into_iter().flat_map(|n| n.in_neighbors.iter())
    }

    pub fn out_neighbors(&self, id: &Identity) -> impl Iterator<Item = &Identity> {
        self.nodes.get(id).into_iter().flat_map(|n| n.out_neighbors.iter())
    }

    pub fn out_degree(&self, id: &Identity) -> u64 {
        self.nodes.get(id).map_or(0, |n| n.out_degree)
    }

    fn adjacency_holds(&self, from: &Identity, to: &Identity) -> (bool, bool) {
        let out_has = self
            .nodes
            .get(from)
            .is_some_and(|n| n.out_neighbors.contains(to));
        let in_has = self
            .nodes
            .get(to)
            .is_some_and(|n| n.in_neighbors.contains(from));
        (out_has, in_has)
    }

    /// Validate an insertion without changing anything.
    pub fn check_insert(&self, from: &Identity, to: &Identity) -> Result<(), GraphError> {
        validate_endpoints(from, to)?;
        let (out_has, in_has) = self.adjacency_holds(from, to);
        if self.has_edge(from, to) {
            if !out_has || !in_has {
                return Err(GraphError::IntegrityViolation(format!(
                    "edge {from} -> {to} indexed but missing from adjacency"
                )));
            }
            return Err(GraphError::DuplicateEdge {
                from: *from,
                to: *to,
            });
        }
        if out_has || in_has {
            return Err(GraphError::IntegrityViolation(format!(
                "adjacency holds {from} -> {to} but the edge index does not"
            )));
        }
        Ok(())
    }

    /// Validate a removal without changing anything.
    pub fn check_remove(&self, from: &Identity, to: &Identity) -> Result<(), GraphError> {
        validate_endpoints(from, to)?;
        let (out_has, in_has) = self.adjacency_holds(from, to);
        if !self.has_edge(from, to) {
            if out_has || in_has {
                return Err(GraphError::IntegrityViolation(format!(
                    "adjacency holds {from} -> {to} but the edge index does not"
                )));
            }
            return Err(GraphError::EdgeNotFound {
                from: *from,
                to: *to,
            });
        }
        if !out_has || !in_has || self.out_degree(from) == 0 {
            return Err(GraphError::IntegrityViolation(format!(
                "edge {from} -> {to} indexed but adjacency is inconsistent"
            )));
        }
        Ok(())
    }

    /// Insert an edge that passed [`GraphStore::check_insert`].
    pub fn insert_edge(&mut self, from: Identity, to: Identity) -> Activation {
        let activation = Activation {
            from: !self.nodes.contains_key(&from),
            to: !self.nodes.contains_key(&to),
        };
        self.edges.insert((from, to));
        let source = self.nodes.entry(from).or_insert_with(NodeRecord::new);
        source.out_neighbors.insert(to);
        source.out_degree += 1;
        self.nodes
            .entry(to)
            .or_insert_with(NodeRecord::new)
            .in_neighbors
            .insert(from);
        activation
    }

    /// Remove an edge that passed [`GraphStore::check_remove`].
    pub fn remove_edge(&mut self, from: &Identity, to: &Identity) {
        self.edges.remove(&(*from, *to));
        if let Some(source) = self.nodes.get_mut(from) {
            source.out_neighbors.remove(to);
            source.out_degree = source.out_degree.saturating_sub(1);
        }
        if let Some(target) = self.nodes.get_mut(to) {
            target.in_neighbors.remove(from);
        }
    }

    /// Overwrite a stored rank. Identities without a record are ignored.
    pub fn set_rank(&mut self, id: &Identity, rank: u64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rank = rank;
        }
    }

    /// Overwrite a stored score. Identities without a record are ignored.
    pub fn set_score(&mut self, id: &Identity, score: u64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.score = score;
        }
    }

    /// Full consistency scan of the edge index against both adjacency sides.
    pub fn verify_integrity(&self) -> Result<(), GraphError> {
        let mut adjacency_edges = 0usize;
        for (id, node) in &self.nodes {
            if node.out_degree != node.out_neighbors.len() as u64 {
                return Err(GraphError::IntegrityViolation(format!(
                    "{id} has out-degree {} but {} out-neighbours",
                    node.out_degree,
                    node.out_neighbors.len()
                )));
            }
            for to in &node.out_neighbors {
                if !self.edges.contains(&(*id, *to)) {
                    return Err(GraphError::IntegrityViolation(format!(
                        "out-neighbour {id} -> {to} missing from the edge index"
                    )));
                }
            }
            for from in &node.in_neighbors {
                if !self.edges.contains(&(*from, *id)) {
                    return Err(GraphError::IntegrityViolation(format!(
                        "in-neighbour {from} -> {id} missing from the edge index"
                    )));
                }
            }
            adjacency_edges += node.out_neighbors.len();
        }
        for (from, to) in &self.edges {
            let (forward, backward) = self.adjacency_holds(from, to);
            if !forward || !backward {
                return Err(GraphError::IntegrityViolation(format!(
                    "indexed edge {from} -> {to} missing from adjacency"
                )));
            }
        }
        if adjacency_edges != self.edges.len() {
            return Err(GraphError::IntegrityViolation(format!(
                "{} adjacency entries for {} indexed edges",
                adjacency_edges,
                self.edges.len()
            )));
        }
        Ok(())
    }
}
