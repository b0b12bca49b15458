// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear backend: scans every point. Correct for every metric.

use alloc::vec::Vec;

use crate::backend::{Backend, is_answerable, is_valid_radius};
use crate::candidates::{Candidate, sort_by_distance};
use crate::metric::Metric;
use crate::points::PointSet;

/// Brute-force backend with linear scans.
///
/// Ties on `nearest` go to the lowest slot. `k_nearest` and `radius` use a stable
/// sort, so equal distances keep slot order; slot order itself changes on delete.
#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Linear {
    fn scored<'a, P>(
        points: &'a PointSet<P>,
        metric: &'a Metric,
        query: &'a [f64],
    ) -> impl Iterator<Item = Candidate> + 'a {
        points
            .as_slice()
            .iter()
            .enumerate()
            .map(move |(slot, p)| Candidate::new(slot, metric.distance(query, &p.coords)))
    }
}

impl<P> Backend<P> for Linear {
    fn nearest(&self, points: &PointSet<P>, metric: &Metric, query: &[f64]) -> Option<Candidate> {
        if !is_answerable(points, query) {
            return None;
        }
        let mut best: Option<Candidate> = None;
        for c in Self::scored(points, metric, query) {
            // Strict improvement only; NaN never wins.
            if !c.distance.is_nan() && best.is_none_or(|b| c.distance < b.distance) {
                best = Some(c);
            }
        }
        best
    }

    fn k_nearest(
        &self,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        k: usize,
    ) -> Vec<Candidate> {
        if k == 0 || !is_answerable(points, query) {
            return Vec::new();
        }
        let mut all: Vec<Candidate> = Self::scored(points, metric, query).collect();
        sort_by_distance(&mut all);
        all.truncate(k);
        all
    }

    fn radius(
        &self,
        points: &PointSet<P>,
        metric: &Metric,
        query: &[f64],
        r: f64,
    ) -> Vec<Candidate> {
        if !is_valid_radius(r) || !is_answerable(points, query) {
            return Vec::new();
        }
        let mut hits: Vec<Candidate> = Self::scored(points, metric, query)
            .filter(|c| c.distance <= r)
            .collect();
        sort_by_distance(&mut hits);
        hits
    }
}
