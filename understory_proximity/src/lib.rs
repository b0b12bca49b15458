// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_proximity --heading-base-level=0

//! Understory Proximity: an n-dimensional point index for nearest-neighbor queries.
//!
//! Understory Proximity ranks candidates by distance, for example peers by a weighted
//! mix of latency, hop count, and geography, or widgets by distance from a cursor.
//!
//! - Insert and delete points with string identifiers and user payloads.
//! - Query the nearest point, the `k` nearest points, or every point within a radius.
//! - Choose a metric: Euclidean, Manhattan, Chebyshev, cosine, or weighted cosine.
//!
//! Two backends answer queries behind one [`ProximityIndex`]. The linear backend scans
//! every point and is always correct. The k-d tree backend prunes with a
//! branch-and-bound search and is used when requested, compiled in (the `kd_tree`
//! feature, on by default), and valid for the metric. Otherwise the index falls back to
//! linear scans without reporting an error.
//!
//! # Example
//!
//! ```rust
//! use understory_proximity::{Metric, Options, Point, ProximityIndex};
//!
//! let mut idx = ProximityIndex::new(
//!     vec![
//!         Point::new("A", [0.0, 0.0], 1_u32),
//!         Point::new("B", [1.0, 0.0], 2),
//!     ],
//!     Options::new().with_metric(Metric::Euclidean),
//! )
//! .unwrap();
//!
//! let hit = idx.nearest(&[0.2, 0.0]).unwrap();
//! assert_eq!(hit.point.id, "A");
//! assert!((hit.distance - 0.2).abs() < 1e-12);
//!
//! // Mutations rebuild the tree backend before the next query.
//! assert!(idx.delete_by_id("A"));
//! assert!(idx.insert(Point::new("C", [0.3, 0.1], 3)));
//! let ids: Vec<_> = idx
//!     .k_nearest(&[0.0, 0.0], 2)
//!     .iter()
//!     .map(|n| n.point.id.clone())
//!     .collect();
//! assert_eq!(ids, ["C", "B"]);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`BackendKind::Linear`]: no build cost; mutations are cheap. Every query is O(n).
//!   The only choice for cosine metrics.
//! - [`BackendKind::KdTree`]: O(n log n) rebuild on every insert or delete, with
//!   sub-linear queries on well-spread data. L1, L2, and L∞ only.
//!
//! ```rust
//! use understory_proximity::{BackendKind, Metric, Options, ProximityIndex};
//!
//! // Cosine cannot prune, so the tree request quietly becomes a linear scan.
//! let idx = ProximityIndex::<()>::with_dim(
//!     3,
//!     Options::new()
//!         .with_metric(Metric::Cosine)
//!         .with_backend(BackendKind::KdTree),
//! )
//! .unwrap();
//! assert_eq!(idx.active_backend(), BackendKind::Linear);
//! ```
//!
//! ## Ties
//!
//! Equidistant points come back in an unspecified order, which may differ between
//! backends and across mutations. Only the distances are guaranteed.
//!
//! ## Concurrency
//!
//! Nothing here is synchronized and every call, including a tree rebuild, runs to
//! completion on the calling thread. Serialize writers externally or hand readers a
//! [`ProximityIndex::snapshot_points`] copy.
//!
//! ### Float semantics
//!
//! Coordinates are assumed finite. NaN distances sort last and never win `nearest`.

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod backend;
pub mod backends;
pub mod candidates;
pub mod error;
pub mod index;
pub mod metric;
pub mod points;
pub mod registry;
pub mod types;

pub use backend::Backend;
#[cfg(feature = "kd_tree")]
pub use backends::kdtree::KdTree;
pub use backends::linear::Linear;
pub use candidates::Candidate;
pub use error::BuildError;
pub use index::{Options, ProximityIndex};
pub use metric::Metric;
pub use points::PointSet;
pub use registry::{Handle, Registry};
pub use types::{BackendKind, Neighbor, Point};
