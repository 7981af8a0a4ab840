use core::{alloc::Layout, mem, ptr::NonNull};

use crate::{construct, error::AllocError};

/// A stateless source of raw, uninitialized storage for arrays of `T`.
///
/// Every function is an associated function: an allocator is selected by type and never carries
/// per-instance state. Storage returned by [`allocate`](Allocator::allocate) holds no objects; the
/// construct/destroy hooks move individual slots in and out of the live state.
///
/// ## Safety
/// Implementors must return storage that is valid for `n` properly aligned `T`s, stays valid until
/// passed back to [`deallocate`](Allocator::deallocate) with the same `n`, and does not overlap any
/// other live allocation. Zero-byte requests must succeed with a dangling, aligned pointer.
pub unsafe trait Allocator {
    /// Allocates storage for exactly `n` elements of `T`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `n` elements cannot be described by a [`Layout`] or if the request cannot
    /// be satisfied.
    fn allocate<T>(n: usize) -> Result<NonNull<T>, AllocError>;

    /// Releases storage obtained from [`allocate`](Allocator::allocate).
    ///
    /// ## Safety
    /// `ptr` must come from `Self::allocate::<T>(n)` with the same `n` and must not have been
    /// released already. Any objects still in the storage are not dropped.
    unsafe fn deallocate<T>(ptr: NonNull<T>, n: usize);

    /// Constructs `value` in a raw slot.
    ///
    /// ## Safety
    /// See [`construct::construct`].
    #[inline]
    unsafe fn construct<T>(ptr: *mut T, value: T) {
        construct::construct(ptr, value);
    }

    /// Default-constructs a `T` in a raw slot.
    ///
    /// ## Safety
    /// See [`construct::construct_default`].
    #[inline]
    unsafe fn construct_default<T: Default>(ptr: *mut T) {
        construct::construct_default(ptr);
    }

    /// ## Safety
    /// See [`construct::destroy`].
    #[inline]
    unsafe fn destroy<T>(ptr: *mut T) {
        construct::destroy(ptr);
    }

    /// ## Safety
    /// See [`construct::destroy_range`].
    #[inline]
    unsafe fn destroy_range<T>(first: *mut T, count: usize) {
        construct::destroy_range(first, count);
    }
}

/// Returns the layout of `n` consecutive `T`s.
///
/// # Errors
///
/// Returns [`AllocError::CapacityOverflow`] if the array would exceed `isize::MAX` bytes.
pub fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow)
}

/// Largest element count any allocator can be asked for.
pub const fn max_elements<T>() -> usize {
    match mem::size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}
