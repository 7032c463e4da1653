//! # Arena Allocator
//!
//! A bump allocator over one fixed buffer. Allocations are handed out as
//! [`ArenaSlice`] handles (offset + length + epoch) instead of references,
//! so several allocations can be alive inside one command while the arena
//! itself stays the single owner of the bytes.

use std::marker::PhantomData;

use bytemuck::Pod;

/// Backing word size. Storage is a `u64` slice so every offset that is a
/// multiple of the requested alignment is also aligned in memory.
const WORD: usize = std::mem::size_of::<u64>();

/// A bump-pointer arena with a hard capacity.
///
/// Allocation only moves the cursor forward. There is no individual free:
/// [`Arena::reset`] zeroes the whole buffer, rewinds the cursor and bumps the
/// epoch, which turns every outstanding handle stale.
///
/// # Invariants
///
/// - `used() <= capacity()` at all times
/// - A request that does not fit returns `None` and leaves the cursor alone
///
/// # Example
///
/// ```rust,ignore
/// let mut arena = Arena::new(256);
/// let depths = arena.alloc::<u16>(40).unwrap();
/// arena.slice_mut(&depths).unwrap()[0] = 7;
///
/// arena.begin_transaction();
/// assert!(arena.slice(&depths).is_none()); // stale after reset
/// ```
pub struct Arena {
    /// The backing storage, allocated once.
    storage: Box<[u64]>,
    /// Usable capacity in bytes.
    capacity: usize,
    /// Current allocation offset in bytes.
    offset: usize,
    /// Incremented on every reset; handles from older epochs are rejected.
    epoch: u32,
    /// Largest offset ever reached.
    high_water: usize,
}

/// Handle to a typed allocation inside an [`Arena`].
///
/// Only valid until the next reset of the arena that produced it.
#[derive(Debug, PartialEq, Eq)]
pub struct ArenaSlice<T> {
    offset: usize,
    len: usize,
    epoch: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ArenaSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaSlice<T> {}

impl<T> ArenaSlice<T> {
    /// Number of elements in the allocation.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true for a zero-length allocation.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Epoch of the arena when this handle was issued.
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }
}

impl Arena {
    /// Creates a new arena with the specified capacity in bytes.
    ///
    /// This is the only point where the arena touches the heap.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let words = capacity.div_ceil(WORD);
        Self {
            storage: vec![0u64; words].into_boxed_slice(),
            capacity,
            offset: 0,
            epoch: 0,
            high_water: 0,
        }
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current used space in bytes.
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.offset
    }

    /// Returns the remaining free space in bytes.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity - self.offset
    }

    /// Largest number of bytes ever in use at once.
    #[inline]
    #[must_use]
    pub const fn high_water(&self) -> usize {
        self.high_water
    }

    /// Current epoch (number of resets so far, wrapping).
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Reserves `count` zeroed elements of `T`.
    ///
    /// Returns `None` when the request does not fit in the remaining space,
    /// when `T` is zero-sized, or when `T` needs more than 8-byte alignment.
    /// A failed request never moves the cursor.
    pub fn alloc<T: Pod>(&mut self, count: usize) -> Option<ArenaSlice<T>> {
        let size_of = std::mem::size_of::<T>();
        let align = std::mem::align_of::<T>();
        if size_of == 0 || align > WORD {
            return None;
        }

        let size = size_of.checked_mul(count)?;
        let start = self.offset.checked_add(align - 1)? & !(align - 1);
        let end = start.checked_add(size)?;
        if end > self.capacity {
            return None;
        }

        self.offset = end;
        self.high_water = self.high_water.max(end);

        Some(ArenaSlice {
            offset: start,
            len: count,
            epoch: self.epoch,
            _marker: PhantomData,
        })
    }

    /// Borrows an allocation. `None` if the handle is from an older epoch.
    #[must_use]
    pub fn slice<T: Pod>(&self, handle: &ArenaSlice<T>) -> Option<&[T]> {
        let range = self.byte_range(handle)?;
        let bytes: &[u8] = bytemuck::cast_slice(&self.storage[..]);
        bytemuck::try_cast_slice(bytes.get(range)?).ok()
    }

    /// Mutably borrows an allocation. `None` if the handle is stale.
    pub fn slice_mut<T: Pod>(&mut self, handle: &ArenaSlice<T>) -> Option<&mut [T]> {
        let range = self.byte_range(handle)?;
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.storage[..]);
        bytemuck::try_cast_slice_mut(bytes.get_mut(range)?).ok()
    }

    /// Starts a new transaction: everything allocated so far is discarded.
    ///
    /// Must be called before any transient buffer of the transaction is
    /// requested.
    #[inline]
    pub fn begin_transaction(&mut self) {
        self.reset();
    }

    /// Zeroes the buffer, rewinds the cursor and invalidates all handles.
    pub fn reset(&mut self) {
        self.storage.fill(0);
        self.offset = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn byte_range<T>(&self, handle: &ArenaSlice<T>) -> Option<std::ops::Range<usize>> {
        if handle.epoch != self.epoch {
            return None;
        }
        let end = handle.offset + std::mem::size_of::<T>() * handle.len;
        (end <= self.offset).then_some(handle.offset..end)
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.offset)
            .field("high_water", &self.high_water)
            .field("epoch", &self.epoch)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_allocation() {
        let mut arena = Arena::new(1024);
        let handle = arena.alloc::<u16>(10).unwrap();
        assert_eq!(handle.len(), 10);
        assert_eq!(arena.used(), 20);
        assert_eq!(arena.slice(&handle).unwrap(), &[0u16; 10]);
    }

    #[test]
    fn test_arena_fails_closed() {
        let mut arena = Arena::new(16);
        assert!(arena.alloc::<u32>(4).is_some());
        assert!(arena.alloc::<u8>(1).is_none());
        assert_eq!(arena.used(), 16);
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn test_arena_failed_request_keeps_cursor() {
        let mut arena = Arena::new(10);
        let _ = arena.alloc::<u8>(3).unwrap();
        assert!(arena.alloc::<u32>(3).is_none());
        assert_eq!(arena.used(), 3);
    }

    #[test]
    fn test_arena_alignment() {
        let mut arena = Arena::new(64);
        let _ = arena.alloc::<u8>(1).unwrap();
        let words = arena.alloc::<u32>(2).unwrap();
        assert_eq!(arena.used(), 12);
        arena.slice_mut(&words).unwrap().copy_from_slice(&[7, 9]);
        assert_eq!(arena.slice(&words).unwrap(), &[7, 9]);
    }

    #[test]
    fn test_arena_reset_zeroes_and_invalidates() {
        let mut arena = Arena::new(64);
        let handle = arena.alloc::<u8>(8).unwrap();
        arena.slice_mut(&handle).unwrap().fill(0xAB);

        arena.begin_transaction();
        assert_eq!(arena.used(), 0);
        assert!(arena.slice(&handle).is_none());

        let fresh = arena.alloc::<u8>(8).unwrap();
        assert_eq!(arena.slice(&fresh).unwrap(), &[0u8; 8]);
        assert_eq!(arena.high_water(), 8);
    }

    #[test]
    fn test_arena_cursor_never_exceeds_capacity() {
        let mut arena = Arena::new(100);
        while arena.alloc::<u16>(7).is_some() {}
        assert!(arena.used() <= arena.capacity());
        assert!(arena.alloc::<u64>(usize::MAX).is_none());
    }
}
