//! A default-instance façade implementing [`core::alloc::GlobalAlloc`].
//!
//! The core [`Tlsf`] is deliberately free of synchronization; this wrapper
//! supplies the external serialization the core requires by bracketing every
//! entry point with a spin lock.

use core::{
    alloc::{GlobalAlloc, Layout},
    mem::MaybeUninit,
    ptr::{self, NonNull},
};

use spin::Mutex;

use crate::{Tlsf, ALIGN_SIZE};

/// A spin-locked [`Tlsf`] suitable for `#[global_allocator]`.
///
/// Starts empty; call [`GlobalTlsf::init`] with backing storage before the
/// first allocation. Allocations made before that fail (return null) rather
/// than crash.
pub struct GlobalTlsf {
    inner: Mutex<Option<Tlsf<'static>>>,
}

impl GlobalTlsf {
    /// An allocator with no storage bound yet.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Bind backing storage.
    ///
    /// The first call installs the control structure at the front of `mem`
    /// and admits the remainder as the initial pool; subsequent calls attach
    /// further pools. Returns whether the storage was accepted.
    pub fn init(&self, mem: &'static mut [MaybeUninit<u8>]) -> bool {
        let mut inner = self.inner.lock();
        match inner.as_mut() {
            Some(tlsf) => tlsf.add_pool(mem),
            None => match Tlsf::create_with_pool(mem) {
                Some(tlsf) => {
                    *inner = Some(tlsf);
                    true
                }
                None => false,
            },
        }
    }
}

impl Default for GlobalTlsf {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for GlobalTlsf {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let mut inner = self.inner.lock();
        inner
            .as_mut()
            .and_then(|tlsf| tlsf.allocate(layout))
            .map(NonNull::as_ptr)
            .unwrap_or(ptr::null_mut())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        let mut inner = self.inner.lock();
        if let (Some(tlsf), Some(ptr)) = (inner.as_mut(), NonNull::new(ptr)) {
            tlsf.deallocate(ptr);
        }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = self.alloc(layout);
        if !ptr.is_null() {
            ptr::write_bytes(ptr, 0, layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let mut inner = self.inner.lock();
        let tlsf = match inner.as_mut() {
            Some(tlsf) => tlsf,
            None => return ptr::null_mut(),
        };

        let ptr = match NonNull::new(ptr) {
            Some(ptr) => ptr,
            None => {
                // Reallocating null is plain allocation.
                let layout = Layout::from_size_align_unchecked(new_size, layout.align());
                return tlsf
                    .allocate(layout)
                    .map(NonNull::as_ptr)
                    .unwrap_or(ptr::null_mut());
            }
        };

        if layout.align() <= ALIGN_SIZE {
            tlsf.reallocate(ptr, new_size)
                .map(NonNull::as_ptr)
                .unwrap_or(ptr::null_mut())
        } else {
            // The in-place path only preserves the granularity alignment;
            // over-aligned blocks must be moved with their alignment intact.
            let new_layout = Layout::from_size_align_unchecked(new_size, layout.align());
            if let Some(new_ptr) = tlsf.allocate(new_layout) {
                ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr(), layout.size().min(new_size));
                tlsf.deallocate(ptr);
                new_ptr.as_ptr()
            } else {
                ptr::null_mut()
            }
        }
    }
}
