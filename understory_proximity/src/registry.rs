// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena of indexes addressed by generational handles.
//!
//! Bindings that cannot hold Rust references (foreign-function or scripting
//! bridges) keep their indexes here and pass [`Handle`]s across the boundary.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::index::ProximityIndex;

/// Generational handle to an index stored in a [`Registry`].
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed and every handle to it becomes stale.
/// - On reuse of a freed slot, its generation is incremented, so stale handles
///   never alias the new occupant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Handles are intentionally 32-bit; registries never approach 2^32 slots."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Pack into a single integer for bridges that only carry scalars.
    pub const fn to_bits(self) -> u64 {
        ((self.1 as u64) << 32) | self.0 as u64
    }

    /// Inverse of [`to_bits`](Self::to_bits).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Each half of the packed value is exactly 32 bits."
    )]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits as u32, (bits >> 32) as u32)
    }
}

struct Slot<P> {
    generation: u32,
    index: Option<ProximityIndex<P>>,
}

/// A growable table of [`ProximityIndex`] values.
pub struct Registry<P> {
    slots: Vec<Slot<P>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<P> Default for Registry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Registry<P> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of live indexes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no indexes are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `index` and return its handle.
    pub fn insert(&mut self, index: ProximityIndex<P>) -> Handle {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.wrapping_add(1);
            slot.index = Some(index);
            return Handle::new(idx, slot.generation);
        }
        self.slots.push(Slot {
            generation: 1,
            index: Some(index),
        });
        Handle::new(self.slots.len() - 1, 1)
    }

    /// Whether `handle` refers to a live index.
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Borrow the index behind `handle`.
    pub fn get(&self, handle: Handle) -> Option<&ProximityIndex<P>> {
        let slot = self.slots.get(handle.idx())?;
        if slot.generation != handle.1 {
            return None;
        }
        slot.index.as_ref()
    }

    /// Mutably borrow the index behind `handle`.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut ProximityIndex<P>> {
        let slot = self.slots.get_mut(handle.idx())?;
        if slot.generation != handle.1 {
            return None;
        }
        slot.index.as_mut()
    }

    /// Remove and return the index behind `handle`.
    pub fn remove(&mut self, handle: Handle) -> Option<ProximityIndex<P>> {
        let slot = self.slots.get_mut(handle.idx())?;
        if slot.generation != handle.1 {
            return None;
        }
        let index = slot.index.take()?;
        self.free_list.push(handle.idx());
        self.len -= 1;
        Some(index)
    }

    /// Iterate over live handles and their indexes.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &ProximityIndex<P>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.index
                .as_ref()
                .map(|index| (Handle::new(i, s.generation), index))
        })
    }
}

impl<P> Debug for Registry<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("total_slots", &self.slots.len())
            .field("alive", &self.len)
            .finish_non_exhaustive()
    }
}
