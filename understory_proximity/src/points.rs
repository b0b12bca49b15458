// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned point storage with an identifier → slot map.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::BuildError;
use crate::types::Point;

/// Dense point storage shared by every backend.
///
/// Points live in a vector addressed by slot. Removal swaps the last point into
/// the freed slot, so slots are only stable between mutations and point order
/// is not preserved. Backends that cache slots must be rebuilt after any mutation;
/// [`revision`](Self::revision) tells them when that has happened.
pub struct PointSet<P> {
    points: Vec<Point<P>>,
    ids: BTreeMap<String, usize>,
    dim: usize,
    revision: u64,
}

impl<P> PointSet<P> {
    /// Take ownership of `points`, fixing the dimension from the first one.
    pub fn from_points(points: Vec<Point<P>>) -> Result<Self, BuildError> {
        let first = points.first().ok_or(BuildError::EmptyInput)?;
        let dim = first.dim();
        if dim == 0 {
            return Err(BuildError::ZeroDimension);
        }
        let mut ids = BTreeMap::new();
        for (slot, p) in points.iter().enumerate() {
            if p.dim() != dim {
                return Err(BuildError::DimensionMismatch {
                    expected: dim,
                    actual: p.dim(),
                    position: slot,
                });
            }
            if p.has_id() && ids.insert(p.id.clone(), slot).is_some() {
                return Err(BuildError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self {
            points,
            ids,
            dim,
            revision: 0,
        })
    }

    /// Create an empty set with a fixed dimension.
    pub fn with_dim(dim: usize) -> Result<Self, BuildError> {
        if dim == 0 {
            return Err(BuildError::ZeroDimension);
        }
        Ok(Self {
            points: Vec::new(),
            ids: BTreeMap::new(),
            dim,
            revision: 0,
        })
    }

    /// Dimension every point must have.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Counter advanced by every successful insert and remove.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in slot order.
    pub fn as_slice(&self) -> &[Point<P>] {
        &self.points
    }

    /// Point at `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&Point<P>> {
        self.points.get(slot)
    }

    /// Coordinates of the point at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn coords(&self, slot: usize) -> &[f64] {
        &self.points[slot].coords
    }

    /// Current slot of the point with identifier `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    /// Whether a point with identifier `id` is present.
    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Append a point.
    ///
    /// Returns `false` and drops the point if its dimension differs from the set's
    /// or its non-empty identifier is already present.
    pub fn insert(&mut self, point: Point<P>) -> bool {
        if point.dim() != self.dim {
            return false;
        }
        if point.has_id() {
            if self.ids.contains_key(&point.id) {
                return false;
            }
            self.ids.insert(point.id.clone(), self.points.len());
        }
        self.points.push(point);
        self.revision = self.revision.wrapping_add(1);
        true
    }

    /// Remove the point with identifier `id`, moving the last point into its slot.
    pub fn remove(&mut self, id: &str) -> Option<Point<P>> {
        if id.is_empty() {
            return None;
        }
        let slot = self.ids.remove(id)?;
        let removed = self.points.swap_remove(slot);
        if let Some(moved) = self.points.get(slot)
            && moved.has_id()
            && let Some(s) = self.ids.get_mut(&moved.id)
        {
            *s = slot;
        }
        self.revision = self.revision.wrapping_add(1);
        Some(removed)
    }
}

impl<P> Debug for PointSet<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointSet")
            .field("dim", &self.dim)
            .field("len", &self.points.len())
            .field("named", &self.ids.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl<P: Clone> Clone for PointSet<P> {
    fn clone(&self) -> Self {
        Self {
            points: self.points.clone(),
            ids: self.ids.clone(),
            dim: self.dim,
            revision: self.revision,
        }
    }
}
