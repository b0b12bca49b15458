// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different query strategies.
//!
//! - `linear`: scans every point; valid for every metric.
//! - `kdtree`: median-split k-d tree with branch-and-bound pruning; L1, L2, and L∞ only.
//!   Compiled with the `kd_tree` feature.
//!
//! Pruning note
//! ------------
//! At a node splitting axis `i` at value `s`, every point on the far side satisfies
//! `|q[i] - p[i]| >= |q[i] - s|`. For L1, L2, and L∞, `distance(q, p) >= |q[i] - p[i]|`,
//! so the far side can be skipped whenever `|q[i] - s|` exceeds the current bound
//! (best distance, k-th best distance, or the radius). Cosine distances do not
//! satisfy this bound and always run on the linear backend.

#[cfg(feature = "kd_tree")]
pub mod kdtree;
pub mod linear;
