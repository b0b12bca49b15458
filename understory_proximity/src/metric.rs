// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance metrics over equal-length coordinate slices.
//!
//! All metrics are pure and deterministic. Callers (the index and its backends)
//! only pass slices of the index dimension. Given slices of different lengths,
//! the unweighted metrics ignore the extra trailing coordinates, while
//! [`weighted_cosine`] falls back to unweighted [`cosine`].

use alloc::vec::Vec;

/// Distance function used by an index.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Metric {
    /// L2: square root of the sum of squared differences.
    #[default]
    Euclidean,
    /// L1: sum of absolute differences.
    Manhattan,
    /// L∞: largest absolute difference on any axis.
    Chebyshev,
    /// `1 - cos(a, b)`, clamped to `[0, 2]`.
    ///
    /// Two zero vectors are at distance 0; a zero vector and a non-zero vector are at distance 1.
    Cosine,
    /// Cosine distance with per-axis weights applied to the dot product and both norms.
    ///
    /// Falls back to [`Metric::Cosine`] when the weights are empty or their length
    /// does not match the inputs.
    WeightedCosine(Vec<f64>),
}

impl Metric {
    /// Distance between `a` and `b`.
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Euclidean => euclidean(a, b),
            Self::Manhattan => manhattan(a, b),
            Self::Chebyshev => chebyshev(a, b),
            Self::Cosine => cosine(a, b),
            Self::WeightedCosine(w) => weighted_cosine(w, a, b),
        }
    }

    /// Whether `distance(a, b) >= |a[i] - b[i]|` holds for every axis `i`.
    ///
    /// Tree backends prune on this bound and refuse to build for other metrics.
    pub fn is_pruning_compatible(&self) -> bool {
        matches!(self, Self::Euclidean | Self::Manhattan | Self::Chebyshev)
    }
}

/// L2 distance.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    sqrt(sum)
}

/// L1 distance.
pub fn manhattan(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// L∞ distance.
pub fn chebyshev(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Cosine distance, `1 - cos(a, b)`.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut na2 = 0.0;
    let mut nb2 = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na2 += x * x;
        nb2 += y * y;
    }
    cosine_from_parts(dot, na2, nb2)
}

/// Weighted cosine distance. Uses unweighted [`cosine`] if `weights` is empty or mismatched.
pub fn weighted_cosine(weights: &[f64], a: &[f64], b: &[f64]) -> f64 {
    if weights.is_empty() || weights.len() != a.len() || a.len() != b.len() {
        return cosine(a, b);
    }
    let mut dot = 0.0;
    let mut na2 = 0.0;
    let mut nb2 = 0.0;
    for ((w, x), y) in weights.iter().zip(a).zip(b) {
        dot += w * x * y;
        na2 += w * x * x;
        nb2 += w * y * y;
    }
    cosine_from_parts(dot, na2, nb2)
}

fn cosine_from_parts(dot: f64, na2: f64, nb2: f64) -> f64 {
    if na2 == 0.0 && nb2 == 0.0 {
        return 0.0;
    }
    if na2 == 0.0 || nb2 == 0.0 {
        return 1.0;
    }
    let den = sqrt(na2) * sqrt(nb2);
    if den == 0.0 {
        return 1.0;
    }
    let cos = (dot / den).clamp(-1.0, 1.0);
    (1.0 - cos).clamp(0.0, 2.0)
}

#[cfg(feature = "std")]
#[inline]
fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_proximity requires either the `std` or `libm` feature");
