// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points, query results, and backend identifiers.

use alloc::string::String;
use alloc::vec::Vec;

/// A point in n-dimensional space with an optional identifier and a user payload.
///
/// An empty `id` marks the point as anonymous: it can be queried but never deleted
/// by identifier. Non-empty identifiers are unique within one index.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<P> {
    /// Identifier used for delete-by-id. Empty means anonymous.
    pub id: String,
    /// Coordinates. The length must equal the owning index's dimension.
    pub coords: Vec<f64>,
    /// Caller data carried alongside the point.
    pub payload: P,
}

impl<P> Point<P> {
    /// Create a point with an identifier.
    pub fn new(id: impl Into<String>, coords: impl Into<Vec<f64>>, payload: P) -> Self {
        Self {
            id: id.into(),
            coords: coords.into(),
            payload,
        }
    }

    /// Create a point without an identifier.
    pub fn anonymous(coords: impl Into<Vec<f64>>, payload: P) -> Self {
        Self {
            id: String::new(),
            coords: coords.into(),
            payload,
        }
    }

    /// Number of coordinates.
    pub fn dim(&self) -> usize {
        self.coords.len()
    }

    /// Whether the point carries a non-empty identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(feature = "kurbo")]
impl<P> Point<P> {
    /// Create a 2D point from a Kurbo point.
    pub fn from_kurbo(id: impl Into<String>, pt: kurbo::Point, payload: P) -> Self {
        Self::new(id, alloc::vec![pt.x, pt.y], payload)
    }
}

/// A query hit: a borrowed point and its distance from the query.
#[derive(Debug)]
pub struct Neighbor<'a, P> {
    /// The matched point.
    pub point: &'a Point<P>,
    /// Distance from the query under the index metric.
    pub distance: f64,
}

// Derives would require `P: Clone`/`P: Copy`; the neighbor only holds a reference.
impl<P> Clone for Neighbor<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Neighbor<'_, P> {}

/// Query engine selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Brute-force scan over every point. Always available and valid for every metric.
    Linear,
    /// Median-split k-d tree with branch-and-bound search.
    ///
    /// Only usable with metrics whose per-axis difference bounds the full distance
    /// (see [`Metric::is_pruning_compatible`](crate::Metric::is_pruning_compatible))
    /// and when the `kd_tree` feature is enabled.
    KdTree,
}

impl BackendKind {
    /// Whether this backend is compiled into the crate.
    pub const fn is_available(self) -> bool {
        match self {
            Self::Linear => true,
            Self::KdTree => cfg!(feature = "kd_tree"),
        }
    }

    /// The preferred backend for new indexes: the k-d tree when compiled in, else linear.
    pub const fn preferred() -> Self {
        if Self::KdTree.is_available() {
            Self::KdTree
        } else {
            Self::Linear
        }
    }
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::preferred()
    }
}
