//! Atomic Views over Raw Memory
//!
//! The buffer never owns the atomics it operates on; it reinterprets bytes of
//! an external region as `core::sync::atomic` integers for the duration of a
//! single operation. This module is the only place that performs that cast.
//!
//! There is no loom variant: loom atomics are standalone objects and cannot
//! be laid over memory supplied by another process.

pub(crate) mod atomic {
    //! Re-exports from `core::sync::atomic` used by the buffer.

    pub(crate) use core::sync::atomic::{AtomicI32, AtomicI64, Ordering};
}

use atomic::{AtomicI32, AtomicI64};

/// Views four bytes at `ptr` as an `AtomicI32`.
///
/// # Safety
///
/// `ptr` must be valid for reads and writes of 4 bytes for `'a`, aligned to
/// 4 bytes, and every concurrent access to those bytes must be atomic.
#[inline(always)]
pub(crate) unsafe fn atomic_i32<'a>(ptr: *mut u8) -> &'a AtomicI32 {
    // SAFETY: Caller guarantees validity, alignment and atomic-only access
    unsafe { AtomicI32::from_ptr(ptr.cast::<i32>()) }
}

/// Views eight bytes at `ptr` as an `AtomicI64`.
///
/// # Safety
///
/// `ptr` must be valid for reads and writes of 8 bytes for `'a`, aligned to
/// 8 bytes, and every concurrent access to those bytes must be atomic.
#[inline(always)]
pub(crate) unsafe fn atomic_i64<'a>(ptr: *mut u8) -> &'a AtomicI64 {
    // SAFETY: Caller guarantees validity, alignment and atomic-only access
    unsafe { AtomicI64::from_ptr(ptr.cast::<i64>()) }
}
