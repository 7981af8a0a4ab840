use core::{
    cmp::Ordering,
    convert::Infallible,
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem::{self, ManuallyDrop, MaybeUninit},
    ops::{Bound, Deref, DerefMut, RangeBounds},
    slice,
};

use log::trace;

use super::raw::RawBuf;
use crate::{
    constants::{GROWTH_FACTOR, MIN_NON_ZERO_CAP},
    error::{AllocError, ConstructError, ElementError, OutOfRange},
    global::Global,
    traits::Allocator,
    uninit::{
        try_uninitialized_fill_with_in, uninitialized_copy_in, uninitialized_copy_trivial,
        uninitialized_default_in, uninitialized_fill_in, uninitialized_move,
    },
};

/// A contiguous growable array type, written as `Vec<T>`, short for 'vector'.
///
/// The first `len` slots of the buffer hold live elements and the remaining
/// `capacity - len` slots are raw. The array owns every element and the allocation.
///
/// # Failure guarantees
///
/// Operations that build elements (`insert*`, `emplace*`, `push`, `resize*`, the constructors)
/// either complete or leave the array exactly as it was: same elements, same capacity. This holds
/// whether the failure is an allocation error, a panicking `clone`, or an `Err` from a fallible
/// producer. Reallocation invalidates every pointer into the array; inserting or erasing in place
/// moves the elements after the affected position.
///
/// # Allocator hooks and bulk copies
///
/// Every element the array builds goes through [`Allocator::construct`] or
/// [`Allocator::construct_default`], and every element it drops goes through
/// [`Allocator::destroy`] or [`Allocator::destroy_range`]. Relocation on growth is a bitwise move
/// and runs no hook. The `Clone`-based operations (`from_slice`, `insert_slice`, `clone`) clone
/// element by element even for `Copy` types; [`from_copy_slice`](Vec::from_copy_slice),
/// [`insert_copy_slice`](Self::insert_copy_slice) and
/// [`extend_from_copy_slice`](Self::extend_from_copy_slice) are the opt-in block-copy forms.
pub struct Vec<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    len: usize,
}

/// Moves `tail` elements from `from` to `to` and publishes them in `len` when dropped.
///
/// Used while a span of the array is being built or torn down: the trailing elements are hidden
/// from `len`, and land back in place on every exit path.
struct TailShift<'a, T> {
    base: *mut T,
    len: &'a mut usize,
    from: usize,
    to: usize,
    tail: usize,
}

impl<T> Drop for TailShift<'_, T> {
    fn drop(&mut self) {
        // SAFETY: [from, from + tail) is live, [to, to + tail) lies within the allocation and
        // holds nothing outside the source range
        unsafe {
            uninitialized_move(self.base.add(self.from), self.base.add(self.to), self.tail);
        }
        *self.len = self.to + self.tail;
    }
}

fn alloc_only(err: ConstructError<Infallible>) -> AllocError {
    match err {
        ConstructError::Alloc(err) => err,
        ConstructError::Element(err) => match err.error {},
    }
}

impl<T> Vec<T> {
    /// Constructs a new, empty `Vec<T>`. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in()
    }

    /// Constructs an empty `Vec<T>` with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity)
    }

    /// Constructs a `Vec<T>` holding `n` clones of `value`.
    pub fn from_elem(n: usize, value: &T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(n, value)
    }

    /// Constructs a `Vec<T>` holding clones of every element of `src`.
    pub fn from_slice(src: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(src)
    }

    /// Constructs a `Vec<T>` holding a bitwise copy of `src`.
    pub fn from_copy_slice(src: &[T]) -> Self
    where
        T: Copy,
    {
        Self::from_copy_slice_in(src)
    }

    /// Constructs a `Vec<T>` of `n` elements, the `i`th being `f(i)`.
    pub fn from_fn<F>(n: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_fn_in(n, f)
    }
}

// construction
impl<T, A: Allocator> Vec<T, A> {
    /// Constructs a new, empty array backed by `A`. Does not allocate.
    pub const fn new_in() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    pub fn with_capacity_in(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| err.handle())
    }

    /// # Errors
    ///
    /// Returns `Err` if the storage cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBuf::try_allocate(capacity)?,
            len: 0,
        })
    }

    pub fn from_elem_in(n: usize, value: &T) -> Self
    where
        T: Clone,
    {
        Self::try_from_elem(n, value).unwrap_or_else(|err| err.handle())
    }

    /// Allocates exactly `n` slots and fills them with clones of `value`.
    ///
    /// If a clone panics, the clones made so far are dropped and the allocation is released
    /// before the panic continues.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the storage cannot be allocated.
    pub fn try_from_elem(n: usize, value: &T) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut buf = RawBuf::<T, A>::try_allocate(n)?;
        // SAFETY: the buffer holds at least n slots and no live elements
        let len = uninitialized_fill_in::<A, T>(unsafe { buf.slots_mut(0, n) }, value).len();
        Ok(Self { buf, len })
    }

    pub fn from_slice_in(src: &[T]) -> Self
    where
        T: Clone,
    {
        let mut buf = RawBuf::<T, A>::try_allocate(src.len()).unwrap_or_else(|err| err.handle());
        // SAFETY: the buffer holds at least src.len() slots and no live elements
        let len = uninitialized_copy_in::<A, T>(src, unsafe { buf.slots_mut(0, src.len()) }).len();
        Self { buf, len }
    }

    pub fn from_fn_in<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        match Self::try_from_fn(n, |i| Ok::<T, Infallible>(f(i))) {
            Ok(vec) => vec,
            Err(err) => alloc_only(err).handle(),
        }
    }

    /// Constructs an array of `n` elements from a fallible producer.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the storage cannot be allocated or if `f` fails. In the latter case every
    /// element already produced is dropped (last first) and the storage is released.
    pub fn try_from_fn<E, F>(n: usize, f: F) -> Result<Self, ConstructError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut buf = RawBuf::<T, A>::try_allocate(n)?;
        // SAFETY: the buffer holds at least n slots and no live elements
        let len = try_uninitialized_fill_with_in::<A, T, E, F>(unsafe { buf.slots_mut(0, n) }, f)?.len();
        Ok(Self { buf, len })
    }
}

// capacity and access
impl<T, A: Allocator> Vec<T, A> {
    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the array can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are live
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first len slots are live
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Returns the element at `index`, or [`OutOfRange`] if there is none.
    ///
    /// Unlike indexing, this never panics.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Mutable counterpart of [`at`](Self::at).
    ///
    /// # Errors
    ///
    /// Returns `Err` if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Returns the raw slots after the live elements.
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let spare = self.spare();
        // SAFETY: slots from len onwards hold no live elements
        unsafe { self.buf.slots_mut(self.len, spare) }
    }

    /// Sets the number of live elements.
    ///
    /// ## Safety
    /// - `new_len` must not exceed the capacity.
    /// - Every slot below `new_len` must hold a live element, and slots dropped from the live
    ///   range become the caller's responsibility.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Exchanges contents (elements and allocation) with `other`.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    #[inline]
    fn spare(&self) -> usize {
        self.buf.capacity() - self.len
    }

    /// Capacity to reallocate to so that `additional` more elements fit.
    fn grown_capacity(&self, additional: usize) -> Result<usize, AllocError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;
        let amortized = self
            .len
            .saturating_mul(GROWTH_FACTOR)
            .min(RawBuf::<T, A>::max_capacity());
        Ok(required.max(amortized).max(MIN_NON_ZERO_CAP))
    }

    /// Moves the live elements into a fresh allocation of `capacity` slots.
    ///
    /// Nothing changes if the allocation fails.
    fn try_relocate(&mut self, capacity: usize) -> Result<(), AllocError> {
        debug_assert!(capacity >= self.len);
        let new_buf = RawBuf::<T, A>::try_allocate(capacity)?;
        trace!(
            "relocating {} elements: capacity {} -> {}",
            self.len,
            self.buf.capacity(),
            new_buf.capacity()
        );
        // SAFETY: the new buffer holds at least len raw slots and does not overlap the old one;
        // after the move the old slots are raw and the old storage is released below
        unsafe { uninitialized_move(self.buf.ptr(), new_buf.ptr(), self.len) };
        self.buf = new_buf;
        Ok(())
    }

    /// Resolves `range` against the live elements.
    fn bounds<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start
                .checked_add(1)
                .unwrap_or_else(|| panic!("range start overflows usize")),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end
                .checked_add(1)
                .unwrap_or_else(|| panic!("range end overflows usize")),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        assert!(start <= end, "range start {start} is after range end {end}");
        assert!(
            end <= self.len,
            "range end {end} out of bounds for length {}",
            self.len
        );
        (start, end)
    }
}

// reservation
impl<T, A: Allocator> Vec<T, A> {
    /// Reserves room for at least `additional` more elements, growing geometrically.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts if the allocation fails.
    pub fn reserve(&mut self, additional: usize) {
        self.try_reserve(additional).unwrap_or_else(|err| err.handle());
    }

    /// # Errors
    ///
    /// Returns `Err` if the storage cannot be allocated; the array is left untouched.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        if self.spare() >= additional {
            return Ok(());
        }
        let capacity = self.grown_capacity(additional)?;
        self.try_relocate(capacity)
    }

    /// Reserves room for exactly `additional` more elements.
    pub fn reserve_exact(&mut self, additional: usize) {
        self.try_reserve_exact(additional)
            .unwrap_or_else(|err| err.handle());
    }

    /// # Errors
    ///
    /// Returns `Err` if the storage cannot be allocated; the array is left untouched.
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), AllocError> {
        if self.spare() >= additional {
            return Ok(());
        }
        let capacity = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;
        self.try_relocate(capacity)
    }

    /// Releases all spare capacity.
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().unwrap_or_else(|err| err.handle());
    }

    /// Moves the elements into an allocation of exactly `len` slots.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the smaller allocation cannot be obtained; the original allocation is kept.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocError> {
        if self.capacity() > self.len && mem::size_of::<T>() != 0 {
            trace!(
                "releasing {} spare slots",
                self.capacity() - self.len
            );
            self.try_relocate(self.len)?;
        }
        Ok(())
    }
}

// insertion
impl<T, A: Allocator> Vec<T, A> {
    /// Opens `count` slots at `index` and lets `fill` construct them.
    ///
    /// `fill` must either construct every slot it is given or fail with all of them raw, which is
    /// what the `uninit` algorithms do. When spare capacity suffices the tail is shifted in place;
    /// otherwise the new elements are built in a fresh allocation before anything is moved.
    /// Whichever way `fill` fails (error or panic), the array keeps its old elements, order and
    /// capacity.
    fn try_insert_with<E, F>(
        &mut self,
        index: usize,
        count: usize,
        fill: F,
    ) -> Result<(), ConstructError<E>>
    where
        F: FnOnce(&mut [MaybeUninit<T>]) -> Result<(), ElementError<E>>,
    {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        if count == 0 {
            return Ok(());
        }

        if self.spare() >= count {
            let base = self.buf.ptr();
            let tail = len - index;
            // SAFETY: index + count + tail <= capacity, and the slots past len are raw
            unsafe { uninitialized_move(base.add(index), base.add(index + count), tail) };
            self.len = index;
            let restore = TailShift {
                base,
                len: &mut self.len,
                from: index + count,
                to: index,
                tail,
            };
            // SAFETY: the gap was vacated by the shift above
            fill(unsafe { self.buf.slots_mut(index, count) })?;
            mem::forget(restore);
            self.len = len + count;
        } else {
            let capacity = self.grown_capacity(count)?;
            let mut new_buf = RawBuf::<T, A>::try_allocate(capacity)?;
            // SAFETY: index + count <= capacity of the fresh buffer
            fill(unsafe { new_buf.slots_mut(index, count) })?;
            trace!(
                "relocating {} elements around {} new ones: capacity {} -> {}",
                len,
                count,
                self.buf.capacity(),
                new_buf.capacity()
            );
            let src = self.buf.ptr();
            let dst = new_buf.ptr();
            // SAFETY: both halves land in raw slots of the new buffer, around the filled gap
            unsafe {
                uninitialized_move(src, dst, index);
                uninitialized_move(src.add(index), dst.add(index + count), len - index);
            }
            self.buf = new_buf;
            self.len = len + count;
        }
        Ok(())
    }

    fn try_insert_fill(&mut self, index: usize, count: usize, value: &T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_insert_with(index, count, |gap| {
            uninitialized_fill_in::<A, T>(gap, value);
            Ok(())
        })
        .map_err(alloc_only)
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value)
            .unwrap_or_else(|err| err.handle());
    }

    /// # Errors
    ///
    /// Returns `Err` if growing fails. `value` is dropped and the array is left untouched.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        self.try_insert_with(index, 1, |gap| {
            // SAFETY: the gap is one raw slot
            unsafe { A::construct(gap[0].as_mut_ptr(), value) };
            Ok(())
        })
        .map_err(alloc_only)
    }

    /// Appends `value` to the back of the array.
    pub fn push(&mut self, value: T) {
        self.try_push(value).unwrap_or_else(|err| err.handle());
    }

    /// # Errors
    ///
    /// Returns `Err` if growing fails. `value` is dropped and the array is left untouched.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocError> {
        self.try_insert(self.len, value)
    }

    /// Builds an element with `f` directly in its slot at `index`.
    ///
    /// If growth is needed, the slot is in the new allocation; if `f` panics the array is
    /// unchanged.
    pub fn emplace<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.try_insert_with(index, 1, |gap| {
            let value = f();
            // SAFETY: the gap is one raw slot
            unsafe { A::construct(gap[0].as_mut_ptr(), value) };
            Ok(())
        })
        .map_err(alloc_only)
        .unwrap_or_else(|err| err.handle());
        &mut self.as_mut_slice()[index]
    }

    /// Builds an element with `f` directly in the slot after the last element.
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.emplace(self.len, f)
    }

    /// Inserts a default-constructed element at `index` and returns it.
    pub fn insert_default(&mut self, index: usize) -> &mut T
    where
        T: Default,
    {
        self.try_insert_with(index, 1, |gap| {
            uninitialized_default_in::<A, T>(gap);
            Ok(())
        })
        .map_err(alloc_only)
        .unwrap_or_else(|err| err.handle());
        &mut self.as_mut_slice()[index]
    }

    /// Inserts `n` clones of `value` at `index`.
    pub fn insert_n(&mut self, index: usize, n: usize, value: T)
    where
        T: Clone,
    {
        self.try_insert_fill(index, n, &value)
            .unwrap_or_else(|err| err.handle());
    }

    /// Inserts clones of every element of `src` at `index`.
    pub fn insert_slice(&mut self, index: usize, src: &[T])
    where
        T: Clone,
    {
        self.try_insert_slice(index, src)
            .unwrap_or_else(|err| err.handle());
    }

    /// # Errors
    ///
    /// Returns `Err` if growing fails; the array is left untouched.
    pub fn try_insert_slice(&mut self, index: usize, src: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_insert_with(index, src.len(), |gap| {
            uninitialized_copy_in::<A, T>(src, gap);
            Ok(())
        })
        .map_err(alloc_only)
    }

    /// Inserts every item of `iter` at `index`, in order.
    ///
    /// The items are gathered before the array is touched, so a panicking iterator leaves it
    /// unchanged.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut staged = iter.into_iter().collect::<Self>();
        let count = staged.len;
        self.try_insert_with(index, count, |gap| {
            // SAFETY: gap has count raw slots; staged gives up its elements
            unsafe {
                uninitialized_move(staged.as_ptr(), gap.as_mut_ptr().cast::<T>(), count);
                staged.set_len(0);
            }
            Ok(())
        })
        .map_err(alloc_only)
        .unwrap_or_else(|err| err.handle());
    }

    /// Appends clones of every element of `src`.
    pub fn extend_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        self.insert_slice(self.len, src);
    }

    /// # Errors
    ///
    /// Returns `Err` if growing fails; the array is left untouched.
    pub fn try_extend_from_slice(&mut self, src: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.try_insert_slice(self.len, src)
    }

    /// Inserts a bitwise copy of `src` at `index` in one block move.
    ///
    /// Equivalent to [`insert_slice`](Self::insert_slice) for `Copy` types, without per-element
    /// clones or allocator construct hooks.
    pub fn insert_copy_slice(&mut self, index: usize, src: &[T])
    where
        T: Copy,
    {
        self.try_insert_with(index, src.len(), |gap| {
            // SAFETY: gap has src.len() raw slots and cannot overlap a shared borrow
            unsafe { uninitialized_copy_trivial(src.as_ptr(), gap.as_mut_ptr().cast(), src.len()) };
            Ok(())
        })
        .map_err(alloc_only)
        .unwrap_or_else(|err| err.handle());
    }

    /// Appends a bitwise copy of `src` in one block move.
    pub fn extend_from_copy_slice(&mut self, src: &[T])
    where
        T: Copy,
    {
        self.insert_copy_slice(self.len, src);
    }

    /// Constructs an array holding a bitwise copy of `src`.
    pub fn from_copy_slice_in(src: &[T]) -> Self
    where
        T: Copy,
    {
        let mut vec = Self::with_capacity_in(src.len());
        vec.insert_copy_slice(0, src);
        vec
    }
}

// removal
impl<T, A: Allocator> Vec<T, A> {
    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside the live range
        Some(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        let base = self.buf.ptr();
        // SAFETY: index < len; the read leaves a hole that the shift closes
        unsafe {
            let value = base.add(index).read();
            uninitialized_move(base.add(index + 1), base.add(index), len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Drops the elements in `range` and closes the gap. Capacity is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends past `len`.
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        let (start, end) = self.bounds(range);
        if start == end {
            return;
        }
        let base = self.buf.ptr();
        let tail = self.len - end;
        self.len = start;
        let _shift = TailShift {
            base,
            len: &mut self.len,
            from: end,
            to: start,
            tail,
        };
        // SAFETY: [start, end) is live and already outside `len`; a panicking drop still
        // closes the gap through `_shift`
        unsafe { A::destroy_range(base.add(start), end - start) };
    }

    /// Drops every element from `new_len` on. Does nothing if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let removed = self.len - new_len;
        self.len = new_len;
        // SAFETY: the slots were live and are now outside the live range
        unsafe { A::destroy_range(self.buf.ptr().add(new_len), removed) };
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

// resizing and assignment
impl<T, A: Allocator> Vec<T, A> {
    /// Grows to `new_len` with clones of `value`, or truncates.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len > self.len {
            self.try_insert_fill(self.len, new_len - self.len, &value)
                .unwrap_or_else(|err| err.handle());
        } else {
            self.truncate(new_len);
        }
    }

    /// Grows to `new_len` with default-constructed elements, or truncates.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > self.len {
            self.try_insert_with(self.len, new_len - self.len, |gap| {
                uninitialized_default_in::<A, T>(gap);
                Ok(())
            })
            .map_err(alloc_only)
            .unwrap_or_else(|err| err.handle());
        } else {
            self.truncate(new_len);
        }
    }

    /// Grows to `new_len` with values produced by `f`, or truncates.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if let Err(err) = self.try_resize_with(new_len, || Ok::<T, Infallible>(f())) {
            alloc_only(err).handle();
        }
    }

    /// Grows to `new_len` with values from a fallible producer, or truncates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if growing fails or `f` fails; either way the array is left untouched.
    pub fn try_resize_with<E, F>(&mut self, new_len: usize, mut f: F) -> Result<(), ConstructError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        if new_len > self.len {
            self.try_insert_with(self.len, new_len - self.len, |gap| {
                try_uninitialized_fill_with_in::<A, T, E, _>(gap, |_| f()).map(|_| ())
            })
        } else {
            self.truncate(new_len);
            Ok(())
        }
    }

    /// Replaces the contents with `n` clones of `value`.
    ///
    /// Existing capacity is reused when it is large enough; otherwise a new array is built and
    /// swapped in, so a failure leaves the old contents in place.
    pub fn assign(&mut self, n: usize, value: &T)
    where
        T: Clone,
    {
        if n > self.capacity() {
            *self = Self::from_elem_in(n, value);
            return;
        }
        let overwrite = n.min(self.len);
        for slot in &mut self.as_mut_slice()[..overwrite] {
            slot.clone_from(value);
        }
        if n > self.len {
            self.try_insert_fill(self.len, n - self.len, value)
                .unwrap_or_else(|err| err.handle());
        } else {
            self.truncate(n);
        }
    }

    /// Replaces the contents with clones of `src`, reusing capacity when possible.
    pub fn assign_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        if src.len() > self.capacity() {
            *self = Self::from_slice_in(src);
            return;
        }
        let overwrite = src.len().min(self.len);
        self.as_mut_slice()[..overwrite].clone_from_slice(&src[..overwrite]);
        if src.len() > self.len {
            self.extend_from_slice(&src[overwrite..]);
        } else {
            self.truncate(src.len());
        }
    }

    /// Replaces the contents with the items of `iter`.
    ///
    /// Live elements are overwritten one by one; leftovers are dropped, or extra items appended.
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let mut written = 0;
        while written < self.len {
            match iter.next() {
                Some(value) => {
                    self.as_mut_slice()[written] = value;
                    written += 1;
                }
                None => break,
            }
        }
        if written < self.len {
            self.truncate(written);
        } else {
            self.extend(iter);
        }
    }
}

impl<T, A: Allocator> Drop for Vec<T, A> {
    fn drop(&mut self) {
        // SAFETY: the first len slots are live; the storage is released by RawBuf
        unsafe { A::destroy_range(self.buf.ptr(), self.len) };
    }
}

impl<T, A: Allocator> Deref for Vec<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vec<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone, A: Allocator> Clone for Vec<T, A> {
    /// Copies into an allocation of exactly `len` slots.
    fn clone(&self) -> Self {
        Self::from_slice_in(self)
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from_slice(source);
    }
}

impl<T, A: Allocator> Default for Vec<T, A> {
    fn default() -> Self {
        Self::new_in()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T, U, A, B> PartialEq<Vec<U, B>> for Vec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &Vec<U, B>) -> bool {
        self[..] == other[..]
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for Vec<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self[..] == other[..]
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for Vec<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self[..] == other[..]
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Vec<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self[..] == other[..]
    }
}

impl<T: Eq, A: Allocator> Eq for Vec<T, A> {}

impl<T: PartialOrd, A: Allocator> PartialOrd for Vec<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        PartialOrd::partial_cmp(&**self, &**other)
    }
}

impl<T: Ord, A: Allocator> Ord for Vec<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&**self, &**other)
    }
}

impl<T: Hash, A: Allocator> Hash for Vec<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&**self, state);
    }
}

impl<T, A: Allocator> FromIterator<T> for Vec<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new_in();
        vec.extend(iter);
        vec
    }
}

impl<T, A: Allocator> Extend<T> for Vec<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Vec<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, A: Allocator, const N: usize> From<[T; N]> for Vec<T, A> {
    fn from(array: [T; N]) -> Self {
        let mut vec = Self::with_capacity_in(N);
        let array = ManuallyDrop::new(array);
        // SAFETY: capacity is N; the array's elements are moved out and never dropped there
        unsafe {
            uninitialized_move(array.as_ptr(), vec.as_mut_ptr(), N);
            vec.set_len(N);
        }
        vec
    }
}

impl<T: Clone, A: Allocator> From<&[T]> for Vec<T, A> {
    fn from(src: &[T]) -> Self {
        Self::from_slice_in(src)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: Allocator> IntoIterator for Vec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let mut this = ManuallyDrop::new(self);
        IntoIter {
            buf: mem::take(&mut this.buf),
            start: 0,
            end: this.len,
        }
    }
}

/// An iterator that moves elements out of a [`Vec`].
///
/// Elements not yielded are dropped with the iterator.
pub struct IntoIter<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) is live
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: start is live and leaves the live range
        let value = unsafe { self.buf.ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: end was live and leaves the live range
        Some(unsafe { self.buf.ptr().add(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // SAFETY: [start, end) is live; the storage is released by RawBuf
        unsafe { A::destroy_range(self.buf.ptr().add(self.start), self.end - self.start) };
    }
}

/// Creates a [`Vec`] from a list of elements or from `value; n`.
///
/// ```
/// use tinystl_alloc::tvec;
///
/// let v = tvec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
/// let w = tvec![7; 5];
/// assert_eq!(w.len(), 5);
/// ```
#[macro_export]
macro_rules! tvec {
    () => {
        $crate::containers::vec::Vec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::containers::vec::Vec::from_elem($n, &$elem)
    };
    ($($x:expr),+ $(,)?) => {
        <$crate::containers::vec::Vec<_>>::from([$($x),+])
    };
}
