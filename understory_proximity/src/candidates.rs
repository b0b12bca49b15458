// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query-time candidate sets.

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;

/// A scored slot produced by a backend query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Slot in the [`PointSet`](crate::PointSet).
    pub slot: usize,
    /// Distance from the query.
    pub distance: f64,
}

impl Candidate {
    /// Create a candidate.
    pub const fn new(slot: usize, distance: f64) -> Self {
        Self { slot, distance }
    }
}

// Ordered by distance only so a `BinaryHeap<Candidate>` is a max-heap on distance.
#[derive(Copy, Clone, Debug)]
struct ByDistance(Candidate);

impl PartialEq for ByDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByDistance {}

impl PartialOrd for ByDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.distance.total_cmp(&other.0.distance)
    }
}

/// Sort candidates by ascending distance. NaN distances sort last.
pub fn sort_by_distance(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

/// The `k` closest candidates seen so far.
///
/// Once full, only candidates strictly closer than the current worst are admitted,
/// each replacing that worst.
#[derive(Debug)]
pub(crate) struct KBest {
    k: usize,
    heap: BinaryHeap<ByDistance>,
}

impl KBest {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Distance a candidate must beat to be admitted; infinite until full.
    pub(crate) fn worst(&self) -> f64 {
        if !self.is_full() {
            return f64::INFINITY;
        }
        match self.heap.peek() {
            Some(top) if !top.0.distance.is_nan() => top.0.distance,
            _ => f64::INFINITY,
        }
    }

    pub(crate) fn offer(&mut self, candidate: Candidate) {
        if self.k == 0 {
            return;
        }
        if !self.is_full() {
            self.heap.push(ByDistance(candidate));
            return;
        }
        if let Some(mut top) = self.heap.peek_mut()
            && candidate.distance.total_cmp(&top.0.distance) == Ordering::Less
        {
            *top = ByDistance(candidate);
        }
    }

    /// Extract the kept candidates in ascending distance order.
    pub(crate) fn into_sorted(self) -> Vec<Candidate> {
        self.heap.into_sorted_vec().into_iter().map(|c| c.0).collect()
    }
}
