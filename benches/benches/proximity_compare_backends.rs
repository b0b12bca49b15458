// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_proximity::{BackendKind, Metric, Options, Point, ProximityIndex};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(seed: u64, count: usize, dim: usize, extent: f64) -> Vec<Point<u32>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|i| {
            let coords: Vec<f64> = (0..dim).map(|_| rng.next_f64() * extent).collect();
            Point::new(format!("p{i}"), coords, i as u32)
        })
        .collect()
}

fn gen_grid_points(n: usize, cell: f64) -> Vec<Point<u32>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let i = y * n + x;
            out.push(Point::new(
                format!("g{i}"),
                [x as f64 * cell, y as f64 * cell],
                i as u32,
            ));
        }
    }
    out
}

fn gen_clustered_points(
    seed: u64,
    clusters: usize,
    per_cluster: usize,
    spread: f64,
) -> Vec<Point<u32>> {
    let mut rng = Rng::new(seed);
    let mut out = Vec::with_capacity(clusters * per_cluster);
    for _ in 0..clusters {
        let cx = rng.next_f64() * 2000.0;
        let cy = rng.next_f64() * 2000.0;
        for _ in 0..per_cluster {
            let i = out.len();
            let x = cx + (rng.next_f64() - 0.5) * spread;
            let y = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(format!("c{i}"), [x, y], i as u32));
        }
    }
    out
}

fn gen_queries(seed: u64, count: usize, dim: usize, extent: f64) -> Vec<Vec<f64>> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| (0..dim).map(|_| rng.next_f64() * extent).collect())
        .collect()
}

fn options(backend: BackendKind) -> Options {
    Options::new()
        .with_metric(Metric::Euclidean)
        .with_backend(backend)
}

fn label(backend: BackendKind) -> &'static str {
    match backend {
        BackendKind::Linear => "linear",
        BackendKind::KdTree => "kd_tree",
    }
}

const BACKENDS: [BackendKind; 2] = [BackendKind::Linear, BackendKind::KdTree];

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000] {
        let points = gen_uniform_points(0xC0FFEE, n, 3, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        for backend in BACKENDS {
            group.bench_function(format!("{}_n{}", label(backend), n), |b| {
                b.iter_batched(
                    || points.clone(),
                    |pts| {
                        let idx = ProximityIndex::new(pts, options(backend)).unwrap();
                        black_box(idx.len());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    for &n in &[1_000usize, 10_000] {
        let points = gen_uniform_points(0xDEADBEEF, n, 3, 1000.0);
        let queries = gen_queries(7, 256, 3, 1000.0);
        group.throughput(Throughput::Elements(queries.len() as u64));
        for backend in BACKENDS {
            let idx = ProximityIndex::new(points.clone(), options(backend)).unwrap();
            group.bench_function(format!("{}_n{}", label(backend), n), |b| {
                b.iter(|| {
                    let mut total = 0.0;
                    for q in &queries {
                        if let Some(hit) = idx.nearest(q) {
                            total += hit.distance;
                        }
                    }
                    black_box(total);
                })
            });
        }
    }
    group.finish();
}

fn bench_k_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_nearest");
    let points = gen_clustered_points(42, 16, 256, 128.0);
    let queries = gen_queries(11, 128, 2, 2000.0);
    for &k in &[1usize, 8, 32] {
        for backend in BACKENDS {
            let idx = ProximityIndex::new(points.clone(), options(backend)).unwrap();
            group.bench_function(format!("{}_clustered_k{}", label(backend), k), |b| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for q in &queries {
                        hits += idx.k_nearest(q, k).len();
                    }
                    black_box(hits);
                })
            });
        }
    }
    group.finish();
}

fn bench_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("radius");
    let points = gen_grid_points(128, 8.0);
    for backend in BACKENDS {
        let idx = ProximityIndex::new(points.clone(), options(backend)).unwrap();
        group.bench_function(format!("{}_grid_many_queries", label(backend)), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in 0..256 {
                    let x = (q % 64) as f64 * 16.0;
                    let y = (q / 64) as f64 * 16.0;
                    total += idx.radius(&[x, y], 32.0).len();
                }
                black_box(total);
            })
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    let points = gen_uniform_points(99, 1_000, 2, 1000.0);
    let fresh = gen_uniform_points(100, 64, 2, 1000.0);
    for backend in BACKENDS {
        group.bench_function(format!("{}_delete_insert_query", label(backend)), |b| {
            b.iter_batched(
                || ProximityIndex::new(points.clone(), options(backend)).unwrap(),
                |mut idx| {
                    for (i, p) in fresh.iter().enumerate() {
                        let _ = idx.delete_by_id(&format!("p{i}"));
                        let _ = idx.insert(Point::new(
                            format!("n{i}"),
                            p.coords.clone(),
                            p.payload,
                        ));
                        black_box(idx.nearest(&p.coords).map(|n| n.distance));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_metrics_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_metrics");
    let points = gen_uniform_points(5, 4_096, 8, 1.0);
    let queries = gen_queries(6, 64, 8, 1.0);
    let metrics = [
        ("euclidean", Metric::Euclidean),
        ("manhattan", Metric::Manhattan),
        ("chebyshev", Metric::Chebyshev),
        ("cosine", Metric::Cosine),
        (
            "weighted_cosine",
            Metric::WeightedCosine(vec![1.0, 0.5, 0.25, 1.0, 2.0, 1.0, 0.5, 1.0]),
        ),
    ];
    for (name, metric) in metrics {
        let idx = ProximityIndex::new(
            points.clone(),
            Options::new()
                .with_metric(metric)
                .with_backend(BackendKind::Linear),
        )
        .unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for q in &queries {
                    hits += idx.k_nearest(q, 4).len();
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_nearest,
    bench_k_nearest,
    bench_radius,
    bench_churn,
    bench_metrics_linear,
);
criterion_main!(benches);
