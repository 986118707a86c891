//! Benchmarks for the routing sweep.
//!
//! Discovery scans the whole node set, so one sweep is O(n^2) distance and
//! cost evaluations.

use bellmesh_core::{discover, Network, NodeId, RoutingParams, UpdateDiscipline};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Lay nodes on a jittered grid with a gateway at the origin.
fn grid_network(side: usize, spacing: f64) -> Network {
    let mut net = Network::new();
    net.add_gateway((0.0, 0.0)).unwrap();
    for i in 0..side {
        for j in 0..side {
            if i == 0 && j == 0 {
                continue;
            }
            let jitter = ((i * 31 + j * 17) % 11) as f64;
            net.add_regular((i as f64 * spacing + jitter, j as f64 * spacing - jitter))
                .unwrap();
        }
    }
    net
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");

    for &side in &[8usize, 16, 32] {
        let nodes = (side * side) as u64;
        group.throughput(Throughput::Elements(nodes));
        group.bench_with_input(BenchmarkId::new("gauss_seidel", nodes), &side, |b, &s| {
            let mut net = grid_network(s, 70.0);
            b.iter(|| black_box(net.sweep()))
        });
        group.bench_with_input(BenchmarkId::new("jacobi", nodes), &side, |b, &s| {
            let mut net = grid_network(s, 70.0).with_discipline(UpdateDiscipline::Jacobi);
            b.iter(|| black_box(net.sweep()))
        });
    }
    group.finish();
}

fn bench_discover(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");
    let params = RoutingParams::default();

    for &side in &[8usize, 16, 32] {
        let net = grid_network(side, 70.0);
        let target = NodeId((side * side / 2) as u64);
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &net, |b, net| {
            let node = net.node(target).unwrap();
            b.iter(|| discover(black_box(node), net.nodes(), &params))
        });
    }
    group.finish();
}

fn bench_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("convergence");
    group.sample_size(20);

    for &side in &[8usize, 16] {
        group.bench_with_input(BenchmarkId::new("ticks_200", side * side), &side, |b, &s| {
            b.iter(|| {
                let mut net = grid_network(s, 70.0);
                net.run(black_box(200))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep, bench_discover, bench_convergence);
criterion_main!(benches);
