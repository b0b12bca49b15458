// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for query engines.

use alloc::vec::Vec;

use crate::candidates::Candidate;
use crate::metric::Metric;
use crate::points::PointSet;

/// Query engine abstraction used by [`ProximityIndex`](crate::ProximityIndex).
///
/// Backends answer with slots into the [`PointSet`] they are given. Every method
/// returns nothing when the query length differs from the set's dimension or the
/// set is empty, so callers see the same degradations whichever backend runs.
pub trait Backend<P> {
    /// Closest slot to `query`.
    fn nearest(&self, points: &PointSet<P>, metric: &Metric, query: &[f64]) -> Option<Candidate>;

    /// Up to `k` closest slots in ascending distance order. Empty when `k == 0`.
    fn k_nearest(
        &self,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        k: usize,
    ) -> Vec<Candidate>;

    /// Every slot within distance `r` (inclusive) in ascending distance order.
    /// Empty when `r` is negative or NaN.
    fn radius(
        &self,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        r: f64,
    ) -> Vec<Candidate>;
}

/// Whether `query` can be answered against `points` at all.
pub(crate) fn is_answerable<P>(points: &PointSet<P>, query: &[f64]) -> bool {
    query.len() == points.dim() && !points.is_empty()
}

/// Whether `r` is a usable radius.
pub(crate) fn is_valid_radius(r: f64) -> bool {
    r >= 0.0
}
