//! Placement construction and destruction of objects in raw storage.
//!
//! Nothing here allocates or frees memory. These functions only move slots between the
//! "raw" and "live" states.

use core::{marker::PhantomData, mem, ptr};

use crate::traits::Allocator;

/// Constructs `value` at `ptr`.
///
/// ## Safety
/// - `ptr` must be valid for writes and properly aligned.
/// - The slot must not hold a live object (it would be overwritten without being dropped).
#[inline]
pub unsafe fn construct<T>(ptr: *mut T, value: T) {
    ptr.write(value);
}

/// Default-constructs a `T` at `ptr`.
///
/// ## Safety
/// Same as [`construct`].
#[inline]
pub unsafe fn construct_default<T: Default>(ptr: *mut T) {
    ptr.write(T::default());
}

/// Destroys the object at `ptr`, leaving its storage raw.
///
/// ## Safety
/// `ptr` must point to a live `T` that is not used again until it is reconstructed.
#[inline]
pub unsafe fn destroy<T>(ptr: *mut T) {
    ptr::drop_in_place(ptr);
}

/// Destroys `count` consecutive objects starting at `first`, front to back.
///
/// Skipped entirely when `T` has no drop glue.
///
/// ## Safety
/// Every slot in `[first, first + count)` must hold a live `T`.
#[inline]
pub unsafe fn destroy_range<T>(first: *mut T, count: usize) {
    if mem::needs_drop::<T>() && count != 0 {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, count));
    }
}

/// Scoped construction of a run of consecutive slots through the hooks of `A`.
///
/// Tracks how many slots have been constructed from `start`. If dropped before
/// [`finish`](Self::finish), every constructed slot is destroyed with [`Allocator::destroy`] in
/// reverse order, so a panic or an early return never leaks or half-builds a range.
pub(crate) struct ConstructGuard<T, A: Allocator> {
    start: *mut T,
    len: usize,
    _alloc: PhantomData<fn() -> A>,
}

impl<T, A: Allocator> ConstructGuard<T, A> {
    pub(crate) fn new(start: *mut T) -> Self {
        Self {
            start,
            len: 0,
            _alloc: PhantomData,
        }
    }

    /// Constructs the next slot from `value`.
    ///
    /// ## Safety
    /// The slot `start + len` must be valid raw storage for a `T`.
    #[inline]
    pub(crate) unsafe fn push(&mut self, value: T) {
        A::construct(self.start.add(self.len), value);
        self.len += 1;
    }

    /// Default-constructs the next slot.
    ///
    /// ## Safety
    /// Same as [`push`](Self::push).
    #[inline]
    pub(crate) unsafe fn push_default(&mut self)
    where
        T: Default,
    {
        A::construct_default(self.start.add(self.len));
        self.len += 1;
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Commits the constructed slots and returns how many there are.
    pub(crate) fn finish(self) -> usize {
        let len = self.len;
        mem::forget(self);
        len
    }
}

impl<T, A: Allocator> Drop for ConstructGuard<T, A> {
    fn drop(&mut self) {
        while self.len > 0 {
            self.len -= 1;
            // SAFETY: slots below `len` were constructed by `push` and not yet destroyed
            unsafe { A::destroy(self.start.add(self.len)) };
        }
    }
}
