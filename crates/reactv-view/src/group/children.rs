//! The shadow child array of a clipping container.

use reactv_core::ViewId;

/// Ordered record of every logical child, attached or clipped.
///
/// Capacity is managed explicitly: the array starts at a fixed minimum and
/// grows by a fixed increment when an insert finds it full. The number of
/// growth steps is kept for diagnostics.
#[derive(Debug, Clone)]
pub struct ClippedChildren {
    slots: Vec<ViewId>,
    capacity: usize,
    increment: usize,
    reallocations: usize,
}

/// An index outside `0..=len` (insert) or `0..len` (remove).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("shadow index {index} out of range for {len} children")]
pub struct ShadowIndexError {
    pub index: usize,
    pub len: usize,
}

impl ClippedChildren {
    /// Create a shadow array holding `initial`, with room for at least
    /// `min_capacity` children.
    pub fn new(initial: Vec<ViewId>, min_capacity: usize, increment: usize) -> Self {
        let capacity = min_capacity.max(initial.len());
        let mut slots = Vec::with_capacity(capacity);
        slots.extend(initial);
        Self {
            slots,
            capacity,
            increment: increment.max(1),
            reallocations: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Logical capacity of the array.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times the array has grown.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub fn get(&self, index: usize) -> Option<ViewId> {
        self.slots.get(index).copied()
    }

    pub fn position(&self, child: ViewId) -> Option<usize> {
        self.slots.iter().position(|&c| c == child)
    }

    pub fn as_slice(&self) -> &[ViewId] {
        &self.slots
    }

    /// Insert `child` at `index`, shifting later entries right.
    pub fn insert(&mut self, index: usize, child: ViewId) -> Result<(), ShadowIndexError> {
        let len = self.slots.len();
        if index > len {
            return Err(ShadowIndexError { index, len });
        }
        if len == self.capacity {
            self.capacity += self.increment;
            self.reallocations += 1;
            self.slots.reserve_exact(self.capacity - len);
        }
        self.slots.insert(index, child);
        Ok(())
    }

    /// Remove the entry at `index`, shifting later entries left.
    pub fn remove(&mut self, index: usize) -> Result<ViewId, ShadowIndexError> {
        let len = self.slots.len();
        if index >= len {
            return Err(ShadowIndexError { index, len });
        }
        Ok(self.slots.remove(index))
    }

    /// Drop every entry. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
