// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Proximity: build, query, mutate, and query again.

use understory_proximity::{Metric, Options, Point, ProximityIndex};

fn main() {
    let mut idx = ProximityIndex::new(
        vec![
            Point::new("a", [0.0], 1_u32),
            Point::new("b", [1.0], 2),
            Point::new("c", [2.0], 3),
        ],
        Options::new().with_metric(Metric::Euclidean),
    )
    .unwrap();
    println!("backend: {:?}", idx.active_backend());

    for n in idx.k_nearest(&[0.6], 2) {
        println!("k-nearest: {} at {:.2}", n.point.id, n.distance);
    }

    // Delete one point and add another; the tree is rebuilt on each call.
    assert!(idx.delete_by_id("b"));
    assert!(idx.insert(Point::new("d", [0.5], 4)));

    let hit = idx.nearest(&[0.6]).unwrap();
    println!("nearest after update: {} at {:.2}", hit.point.id, hit.distance);

    let within: Vec<_> = idx.radius(&[0.0], 1.0).iter().map(|n| n.point.id.clone()).collect();
    println!("within 1.0 of origin: {:?}", within);
}
