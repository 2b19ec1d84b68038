#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use vouch_graph::{GraphError, VouchGraph};
use vouch_stake::{StakeAdmin, StakeGate};
use vouch_types::{Identity, VouchParams};

#[derive(Arbitrary, Debug)]
enum Op {
    Add { from: u8, to: u8 },
    Remove { from: u8, to: u8 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    minimum_stake: u8,
    ops: Vec<Op>,
}

// Identity 0 is the null identity, so small ids also exercise that rejection.
fn id(n: u8) -> Identity {
    Identity::from_low_u64(u64::from(n % 16))
}

// Drive arbitrary add/remove sequences. The store must never report an
// integrity violation and out-degrees must match the adjacency.
fuzz_target!(|input: Input| {
    let owner = Identity::from_low_u64(1_000);
    let admin = Arc::new(StakeAdmin::with_minimum(owner, u128::from(input.minimum_stake)));
    let gate: Arc<dyn StakeGate> = Arc::new(|who: &Identity| u128::from(who.as_bytes()[19]) * 16);
    if admin.set_gate(&owner, gate).is_err() {
        return;
    }
    let Ok(graph) = VouchGraph::new(VouchParams::default(), admin) else {
        return;
    };

    for op in input.ops.iter().take(256) {
        let result = match *op {
            Op::Add { from, to } => graph.add_edge(id(from), id(to)),
            Op::Remove { from, to } => graph.remove_edge(id(from), id(to)),
        };
        if let Err(err) = result {
            assert!(!matches!(err, GraphError::IntegrityViolation(_) | GraphError::Reentrant));
        }
    }

    assert!(graph.verify_integrity().is_ok());
    assert!(graph.seed_count() <= graph.params().max_seed_vouches);
    for n in 1..16u8 {
        let who = id(n);
        assert_eq!(graph.out_degree(&who) as usize, graph.out_neighbors(&who).len());
    }
});
