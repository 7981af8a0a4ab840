use core::ptr::NonNull;
use std::alloc;

use bytesize::ByteSize;
use log::error;

use crate::{
    error::AllocError,
    traits::{array_layout, Allocator},
};

/// The process-wide heap, reached through [`std::alloc`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

unsafe impl Allocator for Global {
    fn allocate<T>(n: usize) -> Result<NonNull<T>, AllocError> {
        let layout = array_layout::<T>(n)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: layout has non-zero size
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or_else(|| {
            error!(
                "global allocator refused a request of {} ({} x {})",
                ByteSize::b(layout.size() as u64).to_string_as(true),
                n,
                core::any::type_name::<T>()
            );
            AllocError::OutOfMemory { layout }
        })
    }

    unsafe fn deallocate<T>(ptr: NonNull<T>, n: usize) {
        // a layout that could not be built was never allocated
        let Ok(layout) = array_layout::<T>(n) else {
            return;
        };
        if layout.size() != 0 {
            alloc::dealloc(ptr.as_ptr().cast(), layout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_then_write_and_release() {
        let ptr = Global::allocate::<u64>(8).unwrap();
        unsafe {
            for i in 0..8 {
                Global::construct(ptr.as_ptr().add(i), i as u64 * 3);
            }
            assert_eq!(*ptr.as_ptr().add(7), 21);
            Global::destroy_range(ptr.as_ptr(), 8);
            Global::deallocate(ptr, 8);
        }
    }

    #[test]
    fn zero_requests_are_dangling() {
        let ptr = Global::allocate::<u32>(0).unwrap();
        assert_eq!(ptr, NonNull::dangling());
        unsafe { Global::deallocate(ptr, 0) };

        let ptr = Global::allocate::<()>(1000).unwrap();
        assert_eq!(ptr, NonNull::dangling());
        unsafe { Global::deallocate(ptr, 1000) };
    }

    #[test]
    fn oversized_request_is_capacity_overflow() {
        assert_eq!(
            Global::allocate::<u32>(usize::MAX).unwrap_err(),
            AllocError::CapacityOverflow
        );
    }

    #[test]
    fn allocations_are_aligned() {
        #[repr(align(64))]
        struct Wide(#[allow(dead_code)] u8);

        let ptr = Global::allocate::<Wide>(3).unwrap();
        assert_eq!(ptr.as_ptr() as usize % 64, 0);
        unsafe { Global::deallocate(ptr, 3) };
    }
}
