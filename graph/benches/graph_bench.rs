use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use vouch_graph::{compute_rank, VouchGraph};
use vouch_stake::StakeAdmin;
use vouch_types::{Identity, VouchParams};

/// A graph whose hub already has `in_degree` vouchers, bootstrap window closed.
fn graph_with_hub(in_degree: u64) -> (VouchGraph, Identity) {
    let params = VouchParams {
        max_seed_vouches: 0,
        ..VouchParams::default()
    };
    let graph = VouchGraph::new(params, Arc::new(StakeAdmin::new(Identity::from_low_u64(u64::MAX))))
        .unwrap();
    let hub = Identity::from_low_u64(1);
    for n in 0..in_degree {
        graph.add_edge(Identity::from_low_u64(10 + n), hub).unwrap();
    }
    (graph, hub)
}

fn bench_add_edge(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_edge");

    for in_degree in [1u64, 10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("into_hub", in_degree),
            &in_degree,
            |b, &in_degree| {
                b.iter_batched(
                    || graph_with_hub(in_degree),
                    |(graph, hub)| {
                        black_box(graph.add_edge(Identity::from_low_u64(5), hub).unwrap());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_add_remove_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove_cycle");

    for in_degree in [1u64, 10, 100, 1000] {
        let (graph, hub) = graph_with_hub(in_degree);
        let voucher = Identity::from_low_u64(5);

        group.bench_with_input(
            BenchmarkId::new("hub", in_degree),
            &in_degree,
            |b, _| {
                b.iter(|| {
                    graph.add_edge(black_box(voucher), hub).unwrap();
                    graph.remove_edge(black_box(voucher), hub).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_compute_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_rank");

    for n in [3usize, 30, 300, 3000] {
        let ranks: Vec<u64> = (0..n as u64).map(|i| 1 + i % 7).collect();
        group.bench_with_input(BenchmarkId::new("in_ranks", n), &ranks, |b, ranks| {
            b.iter(|| black_box(compute_rank(black_box(ranks).iter().copied())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_edge, bench_add_remove_cycle, bench_compute_rank);
criterion_main!(benches);
