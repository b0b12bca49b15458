// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest widget to a cursor.
//!
//! Index widget centres as `kurbo` points and snap a moving cursor to the closest
//! one, ignoring widgets farther away than a snap distance.
//!
//! Run:
//! - `cargo run -p understory_proximity_demos --example cursor_nearest`

use kurbo::{Point, Rect};
use understory_proximity::{Metric, Options, ProximityIndex};

fn main() {
    let widgets = [
        ("ok", Rect::new(10.0, 10.0, 90.0, 40.0)),
        ("cancel", Rect::new(110.0, 10.0, 190.0, 40.0)),
        ("help", Rect::new(210.0, 10.0, 250.0, 40.0)),
        ("slider", Rect::new(10.0, 80.0, 250.0, 100.0)),
    ];

    let points = widgets
        .iter()
        .map(|(name, rect)| understory_proximity::Point::from_kurbo(*name, rect.center(), *rect))
        .collect();
    let idx = ProximityIndex::new(points, Options::new().with_metric(Metric::Euclidean)).unwrap();
    println!("{:?} over {} widgets", idx.active_backend(), idx.len());

    let snap = 40.0;
    let cursor_path = [
        Point::new(20.0, 20.0),
        Point::new(100.0, 25.0),
        Point::new(160.0, 30.0),
        Point::new(130.0, 95.0),
        Point::new(400.0, 400.0),
    ];
    for cursor in cursor_path {
        let hit = idx.nearest(&[cursor.x, cursor.y]).unwrap();
        if hit.distance <= snap {
            println!(
                "cursor {cursor:?} -> {} (contains: {})",
                hit.point.id,
                hit.point.payload.contains(cursor)
            );
        } else {
            println!("cursor {cursor:?} -> nothing within {snap}");
        }
    }

    // Everything a generous halo around the cursor touches, closest first.
    let around: Vec<_> = idx
        .radius(&[150.0, 60.0], 80.0)
        .iter()
        .map(|n| (n.point.id.as_str(), n.distance))
        .collect();
    println!("near (150, 60): {around:?}");
}
