//! # Slot Pool
//!
//! Fixed-capacity storage for short-lived game objects (bullets, enemies).

/// An object that can sit in a [`SlotPool`].
///
/// Inactive slots are free; the pool never drops or moves values.
pub trait Slot: Copy + Default {
    /// Returns true if this slot holds a live object.
    fn is_active(&self) -> bool;

    /// Marks the slot free for reuse.
    fn deactivate(&mut self);
}

/// Index of a slot inside a [`SlotPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A pool of `N` slots stored inline.
///
/// Unlike a free-list allocator, spawning always takes the **lowest**
/// inactive slot, so slot order is stable and deterministic: processing
/// the pool front to back always visits objects in the same order for the
/// same command history.
///
/// # Example
///
/// ```rust,ignore
/// let mut bullets: SlotPool<Bullet, 4> = SlotPool::new();
/// match bullets.spawn(Bullet::fired(origin, velocity)) {
///     Some(id) => { /* in flight */ }
///     None => { /* pool full: request dropped */ }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotPool<T: Slot, const N: usize> {
    slots: [T; N],
}

impl<T: Slot, const N: usize> SlotPool<T, N> {
    /// Creates a pool with every slot free.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [T::default(); N],
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the number of live objects.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_active()).count()
    }

    /// Returns the lowest free slot, if any.
    #[must_use]
    pub fn first_free(&self) -> Option<SlotId> {
        self.slots.iter().position(|slot| !slot.is_active()).map(SlotId)
    }

    /// Stores `value` in the lowest free slot.
    ///
    /// Returns `None` (and drops nothing) when every slot is taken.
    pub fn spawn(&mut self, value: T) -> Option<SlotId> {
        let id = self.first_free()?;
        self.slots[id.0] = value;
        Some(id)
    }

    /// Gets a live object.
    #[inline]
    #[must_use]
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).filter(|slot| slot.is_active())
    }

    /// Gets a live object mutably.
    #[inline]
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).filter(|slot| slot.is_active())
    }

    /// Frees every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.deactivate();
        }
    }

    /// Iterates over live objects in slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active())
            .map(|(index, slot)| (SlotId(index), slot))
    }

    /// All slots, live or not, in slot order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slots
    }

    /// All slots mutably, in slot order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots
    }
}

impl<T: Slot, const N: usize> Default for SlotPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
