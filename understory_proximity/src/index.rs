// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `ProximityIndex` API: owns the points and selects the active backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::{Backend, is_answerable, is_valid_radius};
#[cfg(feature = "kd_tree")]
use crate::backends::kdtree::KdTree;
use crate::backends::linear::Linear;
use crate::candidates::Candidate;
use crate::error::BuildError;
use crate::metric::Metric;
use crate::points::PointSet;
use crate::types::{BackendKind, Neighbor, Point};

/// Construction options for [`ProximityIndex`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Distance metric. Defaults to [`Metric::Euclidean`].
    pub metric: Metric,
    /// Requested backend. Defaults to [`BackendKind::preferred`].
    ///
    /// The request is a preference: an unavailable backend or a metric it cannot
    /// serve silently yields [`BackendKind::Linear`].
    pub backend: BackendKind,
}

impl Options {
    /// Default options: Euclidean metric, preferred backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `metric`.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Request `backend`.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }
}

enum Engine {
    Linear,
    #[cfg(feature = "kd_tree")]
    KdTree(KdTree),
}

impl Engine {
    fn select<P>(requested: BackendKind, points: &PointSet<P>, metric: &Metric) -> Self {
        match requested {
            BackendKind::Linear => Self::Linear,
            BackendKind::KdTree => Self::kd_tree(points, metric),
        }
    }

    #[cfg(feature = "kd_tree")]
    fn kd_tree<P>(points: &PointSet<P>, metric: &Metric) -> Self {
        KdTree::build(points, metric).map_or(Self::Linear, Self::KdTree)
    }

    #[cfg(not(feature = "kd_tree"))]
    fn kd_tree<P>(_points: &PointSet<P>, _metric: &Metric) -> Self {
        Self::Linear
    }

    fn kind(&self) -> BackendKind {
        match self {
            Self::Linear => BackendKind::Linear,
            #[cfg(feature = "kd_tree")]
            Self::KdTree(_) => BackendKind::KdTree,
        }
    }

    fn backend<P>(&self) -> &dyn Backend<P> {
        match self {
            Self::Linear => &Linear,
            #[cfg(feature = "kd_tree")]
            Self::KdTree(tree) => tree,
        }
    }
}

/// A point index answering nearest, k-nearest, and radius queries.
///
/// The index owns its points and one active backend. Mutations update the points
/// and then rebuild a k-d tree backend in full, so queries never see stale slots.
/// If a rebuild fails the index drops to the linear backend for the rest of its life.
///
/// Queries never fail: a query of the wrong dimension, an empty index, `k == 0`,
/// or a negative radius all produce an empty result.
///
/// Not synchronized. Guard mutations with a lock or share
/// [`snapshot_points`](Self::snapshot_points) copies for read-mostly workloads.
pub struct ProximityIndex<P> {
    points: PointSet<P>,
    metric: Metric,
    engine: Engine,
}

impl<P> ProximityIndex<P> {
    /// Build an index over `points`.
    ///
    /// Fails if `points` is empty, the first point has no coordinates, any point's
    /// dimension differs from the first, or two points share a non-empty id.
    pub fn new(points: Vec<Point<P>>, options: Options) -> Result<Self, BuildError> {
        let points = PointSet::from_points(points)?;
        Ok(Self::from_parts(points, options))
    }

    /// Create an empty index of dimension `dim`. Fails if `dim` is zero.
    pub fn with_dim(dim: usize, options: Options) -> Result<Self, BuildError> {
        let points = PointSet::with_dim(dim)?;
        Ok(Self::from_parts(points, options))
    }

    fn from_parts(points: PointSet<P>, options: Options) -> Self {
        let Options { metric, backend } = options;
        let engine = Engine::select(backend, &points, &metric);
        Self {
            points,
            metric,
            engine,
        }
    }

    /// Dimension of every point and query.
    pub fn dim(&self) -> usize {
        self.points.dim()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Metric used for every query.
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    /// Backend currently answering queries.
    pub fn active_backend(&self) -> BackendKind {
        self.engine.kind()
    }

    /// The active k-d tree, if that backend is in use.
    #[cfg(feature = "kd_tree")]
    pub fn kd_tree(&self) -> Option<&KdTree> {
        match &self.engine {
            Engine::KdTree(tree) => Some(tree),
            Engine::Linear => None,
        }
    }

    /// Borrow all points. Order is unspecified and changes on delete.
    pub fn points(&self) -> &[Point<P>] {
        self.points.as_slice()
    }

    /// Point with identifier `id`, if present.
    pub fn get(&self, id: &str) -> Option<&Point<P>> {
        self.points.position(id).and_then(|slot| self.points.get(slot))
    }

    /// Whether a point with identifier `id` is present.
    pub fn contains_id(&self, id: &str) -> bool {
        self.points.contains_id(id)
    }

    /// Insert a point.
    ///
    /// Returns `false` if its dimension is wrong or its non-empty id is already present.
    pub fn insert(&mut self, point: Point<P>) -> bool {
        if !self.points.insert(point) {
            return false;
        }
        self.rebuild();
        true
    }

    /// Delete the point with identifier `id`.
    ///
    /// Returns `false` if `id` is empty or unknown. The last point takes the
    /// removed point's slot.
    pub fn delete_by_id(&mut self, id: &str) -> bool {
        if self.points.remove(id).is_none() {
            return false;
        }
        self.rebuild();
        true
    }

    #[cfg(feature = "kd_tree")]
    fn rebuild(&mut self) {
        if matches!(self.engine, Engine::KdTree(_)) {
            self.engine = Engine::kd_tree(&self.points, &self.metric);
        }
    }

    #[cfg(not(feature = "kd_tree"))]
    fn rebuild(&mut self) {}

    /// Closest point to `query` and its distance.
    ///
    /// `None` if the index is empty or `query` has the wrong dimension.
    pub fn nearest(&self, query: &[f64]) -> Option<Neighbor<'_, P>> {
        if !is_answerable(&self.points, query) {
            return None;
        }
        self.run(
            |b| b.nearest(&self.points, &self.metric, query),
            Option::is_some,
        )
        .and_then(|c| self.neighbor(c))
    }

    /// Up to `k` closest points in ascending distance order.
    ///
    /// Equal distances come back in an unspecified order that may differ
    /// between backends.
    pub fn k_nearest(&self, query: &[f64], k: usize) -> Vec<Neighbor<'_, P>> {
        if k == 0 || !is_answerable(&self.points, query) {
            return Vec::new();
        }
        let hits = self.run(
            |b| b.k_nearest(&self.points, &self.metric, query, k),
            |v| !v.is_empty(),
        );
        self.neighbors(hits)
    }

    /// Every point within distance `r` of `query` (inclusive), in ascending distance order.
    pub fn radius(&self, query: &[f64], r: f64) -> Vec<Neighbor<'_, P>> {
        if !is_valid_radius(r) || !is_answerable(&self.points, query) {
            return Vec::new();
        }
        let hits = self.run(
            |b| b.radius(&self.points, &self.metric, query, r),
            |v| !v.is_empty(),
        );
        self.neighbors(hits)
    }

    /// Run `query` on the active backend. An empty answer from the tree is
    /// re-checked with a linear scan.
    fn run<R>(&self, query: impl Fn(&dyn Backend<P>) -> R, found: impl Fn(&R) -> bool) -> R {
        let out = query(self.engine.backend());
        if self.engine.kind() != BackendKind::Linear && !found(&out) {
            return query(&Linear);
        }
        out
    }

    fn neighbor(&self, c: Candidate) -> Option<Neighbor<'_, P>> {
        self.points.get(c.slot).map(|point| Neighbor {
            point,
            distance: c.distance,
        })
    }

    fn neighbors(&self, hits: Vec<Candidate>) -> Vec<Neighbor<'_, P>> {
        hits.into_iter().filter_map(|c| self.neighbor(c)).collect()
    }
}

impl<P: Clone> ProximityIndex<P> {
    /// Independent copy of every point.
    pub fn snapshot_points(&self) -> Vec<Point<P>> {
        self.points.as_slice().to_vec()
    }
}

impl<P> Debug for ProximityIndex<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("ProximityIndex");
        s.field("metric", &self.metric)
            .field("backend", &self.engine.kind())
            .field("points", &self.points);
        #[cfg(feature = "kd_tree")]
        {
            if let Engine::KdTree(tree) = &self.engine {
                s.field("tree", tree);
            }
        }
        s.finish_non_exhaustive()
    }
}
