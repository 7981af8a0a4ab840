//! Algorithms that populate raw storage from a source range or a repeated value.
//!
//! Element-wise algorithms build into `&mut [MaybeUninit<T>]` and hand back the newly live
//! prefix as `&mut [T]`. If building any element fails (a panicking `clone`, or an `Err` from a
//! fallible producer), every element built so far is destroyed in reverse order before the
//! failure propagates, and the source is left untouched. The caller owns the returned elements;
//! forgetting them leaks but is never unsound.
//!
//! Each element-wise algorithm has an `_in` form that constructs and destroys through the hooks of
//! an [`Allocator`]; the plain form uses [`Global`].
//!
//! Relocation (`uninitialized_move`) and bitwise copying (`uninitialized_copy_trivial`) work on
//! raw pointers and tolerate overlapping source and destination. Neither runs a hook: a bitwise
//! copy builds no object that a hook could observe.

use core::{convert::Infallible, mem::MaybeUninit, ptr, slice};

use crate::{construct::ConstructGuard, error::ElementError, global::Global, traits::Allocator};

/// Clones every element of `src` into the front of `dest`.
///
/// Returns the `src.len()` newly live elements.
///
/// # Panics
///
/// Panics if `dest` is shorter than `src`. A panic from `T::clone` is propagated after the
/// partially built prefix has been destroyed.
pub fn uninitialized_copy<'a, T: Clone>(src: &[T], dest: &'a mut [MaybeUninit<T>]) -> &'a mut [T] {
    uninitialized_copy_in::<Global, T>(src, dest)
}

/// [`uninitialized_copy`] constructing through `A`.
pub fn uninitialized_copy_in<'a, A: Allocator, T: Clone>(
    src: &[T],
    dest: &'a mut [MaybeUninit<T>],
) -> &'a mut [T] {
    assert!(
        dest.len() >= src.len(),
        "destination holds {} slots, source has {} elements",
        dest.len(),
        src.len()
    );
    let start = dest.as_mut_ptr().cast::<T>();
    let mut guard = ConstructGuard::<T, A>::new(start);
    for value in src {
        debug_assert!(guard.len() < dest.len());
        // SAFETY: guard.len() < src.len() <= dest.len()
        unsafe { guard.push(value.clone()) };
    }
    let len = guard.finish();
    // SAFETY: the first `len` slots were just constructed
    unsafe { slice::from_raw_parts_mut(start, len) }
}

/// Fills every slot of `dest` with a clone of `value`.
pub fn uninitialized_fill<'a, T: Clone>(dest: &'a mut [MaybeUninit<T>], value: &T) -> &'a mut [T] {
    uninitialized_fill_in::<Global, T>(dest, value)
}

/// [`uninitialized_fill`] constructing through `A`.
pub fn uninitialized_fill_in<'a, A: Allocator, T: Clone>(
    dest: &'a mut [MaybeUninit<T>],
    value: &T,
) -> &'a mut [T] {
    uninitialized_fill_with_in::<A, T, _>(dest, |_| value.clone())
}

/// Fills the first `n` slots of `dest` with clones of `value`.
///
/// # Panics
///
/// Panics if `n > dest.len()`.
pub fn uninitialized_fill_n<'a, T: Clone>(
    dest: &'a mut [MaybeUninit<T>],
    n: usize,
    value: &T,
) -> &'a mut [T] {
    uninitialized_fill(&mut dest[..n], value)
}

/// Default-constructs every slot of `dest` through `A`.
pub fn uninitialized_default_in<A: Allocator, T: Default>(dest: &mut [MaybeUninit<T>]) -> &mut [T] {
    let start = dest.as_mut_ptr().cast::<T>();
    let mut guard = ConstructGuard::<T, A>::new(start);
    for _ in 0..dest.len() {
        // SAFETY: guard.len() < dest.len()
        unsafe { guard.push_default() };
    }
    let len = guard.finish();
    // SAFETY: every slot was constructed
    unsafe { slice::from_raw_parts_mut(start, len) }
}

/// Fills every slot of `dest` with `f(index)`.
pub fn uninitialized_fill_with<T, F>(dest: &mut [MaybeUninit<T>], f: F) -> &mut [T]
where
    F: FnMut(usize) -> T,
{
    uninitialized_fill_with_in::<Global, T, F>(dest, f)
}

/// [`uninitialized_fill_with`] constructing through `A`.
pub fn uninitialized_fill_with_in<A, T, F>(dest: &mut [MaybeUninit<T>], mut f: F) -> &mut [T]
where
    A: Allocator,
    F: FnMut(usize) -> T,
{
    match try_uninitialized_fill_with_in::<A, T, Infallible, _>(dest, |i| Ok(f(i))) {
        Ok(live) => live,
        Err(err) => match err.error {},
    }
}

/// Fills every slot of `dest` with `f(index)`, stopping at the first error.
///
/// # Errors
///
/// Returns the first error of `f` together with its index. All elements built before it have
/// been destroyed (last built first), so `dest` holds no live objects.
pub fn try_uninitialized_fill_with<T, E, F>(
    dest: &mut [MaybeUninit<T>],
    f: F,
) -> Result<&mut [T], ElementError<E>>
where
    F: FnMut(usize) -> Result<T, E>,
{
    try_uninitialized_fill_with_in::<Global, T, E, F>(dest, f)
}

/// [`try_uninitialized_fill_with`] constructing through `A`.
///
/// # Errors
///
/// Same as [`try_uninitialized_fill_with`].
pub fn try_uninitialized_fill_with_in<A, T, E, F>(
    dest: &mut [MaybeUninit<T>],
    mut f: F,
) -> Result<&mut [T], ElementError<E>>
where
    A: Allocator,
    F: FnMut(usize) -> Result<T, E>,
{
    let start = dest.as_mut_ptr().cast::<T>();
    let mut guard = ConstructGuard::<T, A>::new(start);
    for index in 0..dest.len() {
        let value = f(index).map_err(|error| ElementError { index, error })?;
        // SAFETY: index < dest.len()
        unsafe { guard.push(value) };
    }
    let len = guard.finish();
    // SAFETY: every slot was constructed
    Ok(unsafe { slice::from_raw_parts_mut(start, len) })
}

/// Relocates `count` elements from `src` to `dest` and returns the end of the destination range.
///
/// A Rust move is a bitwise copy, so this is a single `memmove`. It cannot fail and the regions
/// may overlap. Afterwards the source slots outside the destination range are raw: they must not
/// be read or dropped.
///
/// ## Safety
/// - `src` must be valid for reads of `count` live elements.
/// - `dest` must be valid for writes of `count` elements, and every destination slot not also
///   in the source range must be raw.
#[inline]
pub unsafe fn uninitialized_move<T>(src: *const T, dest: *mut T, count: usize) -> *mut T {
    ptr::copy(src, dest, count);
    dest.add(count)
}

/// Bitwise-copies `count` elements from `src` to `dest` and returns the end of the destination
/// range.
///
/// The copy is the observable equivalent of cloning each element, and overlapping regions shift
/// correctly. The source stays live.
///
/// ## Safety
/// - `src` must be valid for reads of `count` elements.
/// - `dest` must be valid for writes of `count` elements.
#[inline]
pub unsafe fn uninitialized_copy_trivial<T: Copy>(
    src: *const T,
    dest: *mut T,
    count: usize,
) -> *mut T {
    ptr::copy(src, dest, count);
    dest.add(count)
}
