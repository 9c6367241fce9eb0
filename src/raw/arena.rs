use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes, addressed by [`Handle`].
///
/// Freed slots are recycled through a free list, so a long-lived tree with
/// churn does not grow its slot table past its high-water mark.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocates a slot, recycling a freed handle when one is available.
    ///
    /// When the handle space is exhausted the element is handed back
    /// untouched, so callers that promise atomic failure can return it to
    /// their caller without having relinked anything.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, T> {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            Ok(h)
        } else if self.slots.len() < Handle::MAX {
            // Strict less-than keeps the element count within Handle::MAX.
            self.slots.push(Some(element));
            Ok(Handle::from_index(self.slots.len() - 1))
        } else {
            Err(element)
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element at `handle` and recycles the slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    /// Drops every live element and resets the slot table.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
