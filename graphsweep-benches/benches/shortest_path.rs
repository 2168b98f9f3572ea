//! Single-source shortest-path benchmarks.
//!
//! Measures the `O(n²)` engine on seeded synthetic graphs, cycling through a
//! fixed set of source nodes so no single source dominates.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use graphsweep_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    source::{bench_graph, source_nodes},
};
use graphsweep_core::{Orientation, shortest_paths};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Graph sizes to benchmark.
const NODE_COUNTS: &[usize] = &[100, 250, 500];

/// Distinct source nodes cycled through per graph.
const SOURCES: usize = 16;

fn shortest_paths_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("shortest_paths");
    group.sample_size(20);

    for orientation in [Orientation::Directed, Orientation::Undirected] {
        for &node_count in NODE_COUNTS {
            let params = GraphBenchParams::sparse(node_count, orientation);
            let graph = bench_graph(params, SEED)?;
            let sources = source_nodes(node_count, SOURCES, SEED)?;
            // Fail during setup rather than inside the timed loop.
            shortest_paths(&graph, 0)?;

            group.bench_with_input(
                BenchmarkId::from_parameter(params),
                &(&graph, &sources),
                |b, &(graph, sources)| {
                    let mut next = sources.iter().cycle();
                    b.iter(|| {
                        let source = next.next().copied().unwrap_or_default();
                        let _result = shortest_paths(graph, source);
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn shortest_paths_bench(c: &mut Criterion) {
    if let Err(err) = shortest_paths_impl(c) {
        panic!("shortest_paths benchmark setup failed: {err}");
    }
}

criterion_group!(benches, shortest_paths_bench);
criterion_main!(benches);
