// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peer selection by latency and hop count.
//!
//! Normalize two peer attributes into `[0, 1]`, weight them, and ask the index
//! for the best peers under the Manhattan metric. Then drop the winner and ask again.
//!
//! Run:
//! - `cargo run -p understory_proximity_demos --example peer_ping_hop`

use understory_proximity::{BackendKind, Metric, Options, Point, ProximityIndex};

#[derive(Clone, Debug)]
struct Peer {
    id: &'static str,
    ping_ms: f64,
    hops: f64,
}

// Min-max scale each attribute, then multiply by its weight.
fn to_points(peers: &[Peer], weights: [f64; 2]) -> Vec<Point<Peer>> {
    let span = |f: fn(&Peer) -> f64| {
        let lo = peers.iter().map(f).fold(f64::INFINITY, f64::min);
        let hi = peers.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
        (lo, hi)
    };
    let scale = |v: f64, (lo, hi): (f64, f64)| if hi > lo { (v - lo) / (hi - lo) } else { 0.0 };
    let ping = span(|p| p.ping_ms);
    let hops = span(|p| p.hops);
    peers
        .iter()
        .map(|p| {
            Point::new(
                p.id,
                [
                    weights[0] * scale(p.ping_ms, ping),
                    weights[1] * scale(p.hops, hops),
                ],
                p.clone(),
            )
        })
        .collect()
}

fn main() {
    let peers = [
        Peer { id: "A", ping_ms: 22.0, hops: 3.0 },
        Peer { id: "B", ping_ms: 34.0, hops: 2.0 },
        Peer { id: "C", ping_ms: 15.0, hops: 4.0 },
        Peer { id: "D", ping_ms: 55.0, hops: 1.0 },
        Peer { id: "E", ping_ms: 18.0, hops: 2.0 },
    ];

    let mut idx = ProximityIndex::new(
        to_points(&peers, [1.0, 1.0]),
        Options::new()
            .with_metric(Metric::Manhattan)
            .with_backend(BackendKind::KdTree),
    )
    .unwrap();
    println!("index: {idx:?}");

    // Ideal peer: lowest ping, a little above the fewest hops.
    let target = [0.0, 0.3];
    let best = idx.nearest(&target).unwrap();
    println!(
        "best: {} ({} ms, {} hops) at {:.3}",
        best.point.id, best.point.payload.ping_ms, best.point.payload.hops, best.distance
    );
    assert_eq!(best.point.id, "E", "E has low ping and few hops");

    for n in idx.k_nearest(&target, 3) {
        println!("  top3: {} at {:.3}", n.point.id, n.distance);
    }

    // The chosen peer went away; pick again from the rest.
    assert!(idx.delete_by_id("E"));
    let fallback = idx.nearest(&target).unwrap();
    println!("fallback: {} at {:.3}", fallback.point.id, fallback.distance);
    assert_ne!(fallback.point.id, "E", "deleted peers are never returned");

    let close: Vec<_> = idx
        .radius(&target, 0.75)
        .iter()
        .map(|n| n.point.id.as_str())
        .collect();
    println!("within 0.75: {close:?}");
}
