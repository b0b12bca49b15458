// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_proximity::{BackendKind, Metric, Options, Point, ProximityIndex};

use rstar::RTree;

fn gen_grid_coords(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * cell, y as f64 * cell]);
        }
    }
    out
}

fn to_points(coords: &[[f64; 2]]) -> Vec<Point<u32>> {
    coords
        .iter()
        .enumerate()
        .map(|(i, c)| Point::new(format!("p{i}"), *c, i as u32))
        .collect()
}

fn queries() -> Vec<[f64; 2]> {
    (0..256)
        .map(|q| [(q % 16) as f64 * 37.5 + 3.0, (q / 16) as f64 * 41.0 + 1.5])
        .collect()
}

fn bench_nearest_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_external_compare_f64");
    let queries = queries();
    for &n in &[64usize, 128] {
        let coords = gen_grid_coords(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("understory_kd_tree_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_points(&coords),
                |points| {
                    let idx = ProximityIndex::new(
                        points,
                        Options::new()
                            .with_metric(Metric::Euclidean)
                            .with_backend(BackendKind::KdTree),
                    )
                    .unwrap();
                    let mut total = 0.0;
                    for q in &queries {
                        if let Some(hit) = idx.nearest(q) {
                            total += hit.distance;
                        }
                    }
                    black_box(total);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || coords.clone(),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let mut total = 0.0;
                    for q in &queries {
                        if let Some(hit) = tree.nearest_neighbor(q) {
                            let dx = hit[0] - q[0];
                            let dy = hit[1] - q[1];
                            total += (dx * dx + dy * dy).sqrt();
                        }
                    }
                    black_box(total);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nearest_external_compare);
criterion_main!(benches);
