//! This crate implements the TLSF (Two-Level Segregated Fit) dynamic memory
//! allocation algorithm¹ over caller-supplied memory pools.
//!
//!  - **Allocation, deallocation, and in-place reallocation are guaranteed to
//!    complete in constant time.** Every free-list search is resolved by two
//!    bit scans over fixed-width bitmaps; there are no loops whose iteration
//!    count depends on the heap state.
//!
//!  - **Low overhead.** A live allocation costs one machine word of metadata.
//!    The remaining bookkeeping (physical back link, free-list links) is
//!    stored inside the payload of *free* blocks, where it costs nothing.
//!
//!  - **The memory is provided by the application.** The control structure and
//!    every pool live in storage the caller hands in: a `static` array, a
//!    region reserved by a linker script, or an arena carved out of another
//!    allocator.
//!
//!  - **This crate supports `#![no_std]`.** It can be used in bare-metal and
//!    RTOS-based applications.
//!
//! <sub>¹ M. Masmano, I. Ripoll, A. Crespo and J. Real, "TLSF: a new dynamic
//! memory allocator for real-time systems," *Proceedings. 16th Euromicro
//! Conference on Real-Time Systems*, 2004.</sub>
//!
//! # Examples
//!
//! ## `Tlsf`: Core API
//!
//! ```rust
//! use segfit::Tlsf;
//! use core::{alloc::Layout, mem::MaybeUninit};
//!
//! #[repr(align(16))]
//! struct Arena([MaybeUninit<u8>; 8192]);
//!
//! let mut arena = Arena([MaybeUninit::uninit(); 8192]);
//!
//! // The control structure is carved out of the front of `arena`; the rest
//! // becomes the first memory pool.
//! let mut tlsf = Tlsf::create_with_pool(&mut arena.0).unwrap();
//!
//! unsafe {
//!     let mut p = tlsf.allocate(Layout::new::<u64>()).unwrap().cast::<u64>();
//!     *p.as_mut() = 42;
//!     assert_eq!(*p.as_ref(), 42);
//!     tlsf.deallocate(p.cast());
//! }
//! ```
//!
//! ## `GlobalTlsf`: Global Allocator
//!
//! [`GlobalTlsf`] wraps a default instance in a spin lock so it can serve as
//! `#[global_allocator]`:
//!
//! ```rust,no_run
//! use core::mem::MaybeUninit;
//!
//! #[global_allocator]
//! static HEAP: segfit::GlobalTlsf = segfit::GlobalTlsf::new();
//!
//! #[repr(align(16))]
//! struct Arena([MaybeUninit<u8>; 65536]);
//! static mut ARENA: Arena = Arena([MaybeUninit::uninit(); 65536]);
//!
//! fn main() {
//!     unsafe { HEAP.init(&mut *core::ptr::addr_of_mut!(ARENA.0)) };
//!
//!     let mut v = vec![1u32, 2, 3];
//!     v.push(4);
//! }
//! ```
//!
//! # Synchronization
//!
//! [`Tlsf`] itself performs no locking: every operation takes `&mut self` and
//! runs to completion without suspension points. Sharing an instance between
//! threads or with an interrupt handler is the caller's job — wrap it in a
//! mutex, or bracket every call with interrupt disable/restore on bare metal.
//! [`GlobalTlsf`] is the mutex flavor of that discipline.
#![no_std]

mod bits;
mod global;
mod tlsf;
mod utils;

pub use self::{
    global::GlobalTlsf,
    tlsf::{Tlsf, ALIGN_SIZE, BLOCK_SIZE_MAX, BLOCK_SIZE_MIN},
};

#[cfg(any(test, feature = "std"))]
extern crate std;
