// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.
//!
//! Only index construction can fail. Queries and mutations degrade to empty
//! results or `false` instead of returning errors.

use alloc::string::String;

/// Errors returned when constructing an index or building a backend.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// No points were supplied.
    #[error("no points provided")]
    EmptyInput,
    /// The dimension is zero.
    #[error("points must have at least one dimension")]
    ZeroDimension,
    /// A point's coordinate count differs from the first point's.
    #[error("point {position} has {actual} coordinates, expected {expected}")]
    DimensionMismatch {
        /// Dimension fixed by the first point.
        expected: usize,
        /// Coordinate count of the offending point.
        actual: usize,
        /// Position of the offending point in the input.
        position: usize,
    },
    /// Two points share the same non-empty identifier.
    #[error("duplicate point id {0:?}")]
    DuplicateId(String),
    /// The requested backend cannot serve this index (not compiled in, or the
    /// metric does not support pruning).
    #[error("requested backend unavailable")]
    BackendUnavailable,
}
