//! Fixtures shared by the integration tests.
//!
//! Counters are thread-local so tests running in parallel do not see each other.

#![allow(dead_code)]

use std::{cell::Cell, ptr::NonNull};

use tinystl_alloc::{traits::array_layout, AllocError, Allocator, Global};

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static CONSTRUCTIONS: Cell<usize> = const { Cell::new(0) };
    static DESTRUCTIONS: Cell<usize> = const { Cell::new(0) };
    static FAIL_AT: Cell<Option<usize>> = const { Cell::new(None) };
    static ALLOC_BUDGET: Cell<usize> = const { Cell::new(usize::MAX) };
}

/// An element that counts its constructions and destructions and can be told to fail.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tracked(u32);

impl Tracked {
    pub fn new(value: u32) -> Self {
        on_construct();
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.set(LIVE.get() - 1);
        DESTRUCTIONS.set(DESTRUCTIONS.get() + 1);
    }
}

fn on_construct() {
    let n = CONSTRUCTIONS.get() + 1;
    if FAIL_AT.get() == Some(n) {
        FAIL_AT.set(None);
        panic!("construction #{n} failed");
    }
    CONSTRUCTIONS.set(n);
    LIVE.set(LIVE.get() + 1);
}

/// Clears every counter and disarms failures.
pub fn reset() {
    LIVE.set(0);
    CONSTRUCTIONS.set(0);
    DESTRUCTIONS.set(0);
    FAIL_AT.set(None);
    ALLOC_BUDGET.set(usize::MAX);
}

/// Lets `successes` more constructions through and fails the one after.
pub fn fail_after(successes: usize) {
    FAIL_AT.set(Some(CONSTRUCTIONS.get() + successes + 1));
}

pub fn live() -> isize {
    LIVE.get()
}

pub fn constructions() -> usize {
    CONSTRUCTIONS.get()
}

pub fn destructions() -> usize {
    DESTRUCTIONS.get()
}

pub fn values<'a>(items: impl IntoIterator<Item = &'a Tracked>) -> Vec<u32> {
    items.into_iter().map(Tracked::value).collect()
}

/// Heap allocator that refuses requests once its per-thread budget is spent.
pub struct Limited;

impl Limited {
    pub fn set_budget(allocations: usize) {
        ALLOC_BUDGET.set(allocations);
    }
}

unsafe impl Allocator for Limited {
    fn allocate<T>(n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = array_layout::<T>(n)?;
        match ALLOC_BUDGET.get() {
            0 => Err(AllocError::OutOfMemory { layout }),
            left => {
                ALLOC_BUDGET.set(left - 1);
                Global::allocate(n)
            }
        }
    }

    unsafe fn deallocate<T>(ptr: NonNull<T>, n: usize) {
        Global::deallocate(ptr, n);
    }
}
