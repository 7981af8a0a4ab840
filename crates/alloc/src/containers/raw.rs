use core::{fmt, marker::PhantomData, mem, mem::MaybeUninit, ptr::NonNull, slice};

use crate::{
    error::AllocError,
    global::Global,
    traits::{max_elements, Allocator},
};

/// One owned allocation with room for `capacity` values of `T`.
///
/// `RawBuf` only knows about raw slots: it never constructs or drops a `T`. Dropping it returns
/// the storage to `A`, so whoever holds live elements inside must destroy or move them out first.
/// Zero-sized types and zero capacities never touch the allocator.
pub struct RawBuf<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<(T, fn() -> A)>,
}

// SAFETY: RawBuf uniquely owns its storage, like Box<[MaybeUninit<T>]>
unsafe impl<T: Send, A: Allocator> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: Allocator> Sync for RawBuf<T, A> {}

impl<T, A: Allocator> RawBuf<T, A> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An empty buffer that owns no allocation.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: if Self::IS_ZST { usize::MAX } else { 0 },
            _marker: PhantomData,
        }
    }

    /// Allocates storage for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `capacity` exceeds [`max_capacity`](Self::max_capacity) or `A` cannot
    /// satisfy the request.
    pub fn try_allocate(capacity: usize) -> Result<Self, AllocError> {
        if Self::IS_ZST || capacity == 0 {
            return Ok(Self::new());
        }
        if capacity > Self::max_capacity() {
            return Err(AllocError::CapacityOverflow);
        }
        let ptr = A::allocate::<T>(capacity)?;
        Ok(Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        })
    }

    /// Largest capacity a buffer of `T` can have.
    pub const fn max_capacity() -> usize {
        max_elements::<T>()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Every slot of the buffer, live or not.
    ///
    /// ## Safety
    /// The caller must not create overlapping references to slots it also reads as `T`.
    #[inline]
    pub(crate) unsafe fn slots_mut(&mut self, start: usize, len: usize) -> &mut [MaybeUninit<T>] {
        debug_assert!(start.checked_add(len).is_some_and(|end| end <= self.cap));
        slice::from_raw_parts_mut(self.ptr().add(start).cast(), len)
    }
}

impl<T, A: Allocator> Default for RawBuf<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> fmt::Debug for RawBuf<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuf")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        if !Self::IS_ZST && self.cap != 0 {
            // SAFETY: ptr came from A::allocate::<T>(cap)
            unsafe { A::deallocate(self.ptr, self.cap) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_owns_nothing() {
        let buf = RawBuf::<u64>::new();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.ptr(), NonNull::dangling().as_ptr());
    }

    #[test]
    fn allocate_exact_capacity() {
        let mut buf = RawBuf::<u32>::try_allocate(5).unwrap();
        assert_eq!(buf.capacity(), 5);
        let slots = unsafe { buf.slots_mut(0, 5) };
        for (i, slot) in slots.iter_mut().enumerate() {
            slot.write(i as u32);
        }
        assert_eq!(unsafe { *buf.ptr().add(4) }, 4);
    }

    #[test]
    fn zero_sized_types_have_unbounded_capacity() {
        let buf = RawBuf::<()>::try_allocate(3).unwrap();
        assert_eq!(buf.capacity(), usize::MAX);
    }

    #[test]
    fn too_large_request_fails() {
        let err = RawBuf::<u64>::try_allocate(RawBuf::<u64>::max_capacity() + 1).unwrap_err();
        assert_eq!(err, AllocError::CapacityOverflow);
    }
}
