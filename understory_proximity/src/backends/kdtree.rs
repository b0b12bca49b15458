// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Median-split k-d tree backend with branch-and-bound search.
//!
//! Each node holds one point: the median of its subtree along the axis with the
//! largest standard deviation. Search descends the query's side first and only
//! visits the far side when the distance from the query to the splitting plane,
//! `|query[axis] - split|`, does not exceed the current bound. That plane distance
//! is a lower bound on the true distance only for L1, L2, and L∞, so the tree
//! refuses to build for any other metric.
//!
//! The tree stores slots, not coordinates. It is tied to the exact
//! [`PointSet`] revision it was built from and answers nothing once that set has
//! been mutated; rebuild it after every insert or remove.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::{Backend, is_answerable, is_valid_radius};
use crate::candidates::{Candidate, KBest, sort_by_distance};
use crate::error::BuildError;
use crate::metric::Metric;
use crate::points::PointSet;

/// A k-d tree over the slots of a [`PointSet`].
pub struct KdTree {
    root: Option<NodeIdx>,
    arena: Vec<Node>,
    dim: usize,
    len: usize,
    revision: u64,
}

struct Node {
    axis: usize,
    slot: usize,
    split: f64,
    left: Option<NodeIdx>,
    right: Option<NodeIdx>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct NodeIdx(usize);

impl NodeIdx {
    const fn new(i: usize) -> Self {
        Self(i)
    }

    const fn get(self) -> usize {
        self.0
    }
}

impl KdTree {
    /// Build a tree over every point currently in `points`.
    ///
    /// Fails with [`BuildError::BackendUnavailable`] if `metric` is not pruning-compatible.
    /// An empty set builds an empty tree.
    pub fn build<P>(points: &PointSet<P>, metric: &Metric) -> Result<Self, BuildError> {
        if !metric.is_pruning_compatible() {
            return Err(BuildError::BackendUnavailable);
        }
        let mut slots: Vec<usize> = (0..points.len()).collect();
        let mut arena = Vec::with_capacity(points.len());
        let root = Self::build_nodes(&mut arena, points, &mut slots);
        Ok(Self {
            root,
            arena,
            dim: points.dim(),
            len: points.len(),
            revision: points.revision(),
        })
    }

    fn build_nodes<P>(
        arena: &mut Vec<Node>,
        points: &PointSet<P>,
        slots: &mut [usize],
    ) -> Option<NodeIdx> {
        if slots.is_empty() {
            return None;
        }
        let axis = widest_axis(points, slots);
        let mid = slots.len() / 2;
        slots.select_nth_unstable_by(mid, |&a, &b| {
            points.coords(a)[axis].total_cmp(&points.coords(b)[axis])
        });
        let slot = slots[mid];
        let idx = arena.len();
        arena.push(Node {
            axis,
            slot,
            split: points.coords(slot)[axis],
            left: None,
            right: None,
        });
        let (lower, rest) = slots.split_at_mut(mid);
        let upper = &mut rest[1..];
        let left = Self::build_nodes(arena, points, lower);
        let right = Self::build_nodes(arena, points, upper);
        arena[idx].left = left;
        arena[idx].right = right;
        Some(NodeIdx::new(idx))
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree indexes no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Dimension of the indexed points.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of nodes; one per indexed point.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Length of the longest root-to-leaf path. Zero for an empty tree.
    pub fn depth(&self) -> usize {
        fn walk(arena: &[Node], n: Option<NodeIdx>) -> usize {
            match n {
                None => 0,
                Some(i) => {
                    let node = &arena[i.get()];
                    1 + walk(arena, node.left).max(walk(arena, node.right))
                }
            }
        }
        walk(&self.arena, self.root)
    }

    // Refuses queries against any set other than the revision it was built from.
    fn serves<P>(&self, points: &PointSet<P>, query: &[f64]) -> bool {
        is_answerable(points, query)
            && self.revision == points.revision()
            && self.len == points.len()
            && self.dim == points.dim()
    }

    fn search<P, V: Visitor>(
        &self,
        node: Option<NodeIdx>,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        visitor: &mut V,
    ) {
        let Some(i) = node else {
            return;
        };
        let n = &self.arena[i.get()];
        let d = metric.distance(query, points.coords(n.slot));
        visitor.visit(Candidate::new(n.slot, d));

        let q = query[n.axis];
        let (near, far) = if q >= n.split {
            (n.right, n.left)
        } else {
            (n.left, n.right)
        };
        self.search(near, points, metric, query, visitor);
        if (q - n.split).abs() <= visitor.bound() {
            self.search(far, points, metric, query, visitor);
        }
    }
}

/// Axis with the largest population standard deviation over `slots`. Ties go to the lower axis.
fn widest_axis<P>(points: &PointSet<P>, slots: &[usize]) -> usize {
    let dim = points.dim();
    let n = slots.len() as f64;
    let mut means = alloc::vec![0.0; dim];
    for &s in slots {
        for (m, c) in means.iter_mut().zip(points.coords(s)) {
            *m += c;
        }
    }
    for m in &mut means {
        *m /= n;
    }
    let mut vars = alloc::vec![0.0; dim];
    for &s in slots {
        for ((v, m), c) in vars.iter_mut().zip(&means).zip(points.coords(s)) {
            let delta = c - m;
            *v += delta * delta;
        }
    }
    // Standard deviation is monotone in variance, so compare variances directly.
    let mut axis = 0;
    let mut widest = vars[0];
    for (d, &v) in vars.iter().enumerate().skip(1) {
        if v > widest {
            widest = v;
            axis = d;
        }
    }
    axis
}

/// Collects candidates during a traversal and supplies the pruning bound.
trait Visitor {
    fn visit(&mut self, candidate: Candidate);

    /// Far subtrees whose splitting plane lies farther than this are skipped.
    fn bound(&self) -> f64;
}

struct Closest(Option<Candidate>);

impl Visitor for Closest {
    fn visit(&mut self, c: Candidate) {
        if !c.distance.is_nan() && self.0.is_none_or(|b| c.distance < b.distance) {
            self.0 = Some(c);
        }
    }

    fn bound(&self) -> f64 {
        self.0.map_or(f64::INFINITY, |b| b.distance)
    }
}

impl Visitor for KBest {
    fn visit(&mut self, c: Candidate) {
        self.offer(c);
    }

    fn bound(&self) -> f64 {
        self.worst()
    }
}

struct Within {
    r: f64,
    hits: Vec<Candidate>,
}

impl Visitor for Within {
    fn visit(&mut self, c: Candidate) {
        if c.distance <= self.r {
            self.hits.push(c);
        }
    }

    fn bound(&self) -> f64 {
        self.r
    }
}

impl<P> Backend<P> for KdTree {
    fn nearest(&self, points: &PointSet<P>, metric: &Metric, query: &[f64]) -> Option<Candidate> {
        if !self.serves(points, query) {
            return None;
        }
        let mut closest = Closest(None);
        self.search(self.root, points, metric, query, &mut closest);
        closest.0
    }

    fn k_nearest(
        &self,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        k: usize,
    ) -> Vec<Candidate> {
        if k == 0 || !self.serves(points, query) {
            return Vec::new();
        }
        let mut best = KBest::new(k.min(self.len));
        self.search(self.root, points, metric, query, &mut best);
        best.into_sorted()
    }

    fn radius(
        &self,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        r: f64,
    ) -> Vec<Candidate> {
        if !is_valid_radius(r) || !self.serves(points, query) {
            return Vec::new();
        }
        let mut within = Within {
            r,
            hits: Vec::new(),
        };
        self.search(self.root, points, metric, query, &mut within);
        sort_by_distance(&mut within.hits);
        within.hits
    }
}

impl Debug for KdTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("dim", &self.dim)
            .field("len", &self.len)
            .field("revision", &self.revision)
            .field("arena_nodes", &self.arena.len())
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}
