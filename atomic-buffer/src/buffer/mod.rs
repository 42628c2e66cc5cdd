//! Atomic Buffer View
//!
//! [`AtomicBuffer`] is a `(base, capacity)` pair over memory it never owns.
//! Producer and consumer each wrap the same region, typically a memory-mapped
//! file or shared-memory segment, and communicate purely through the typed
//! operations defined here.
//!
//! # Layout
//!
//! ```text
//!   ptr()                                             ptr() + capacity()
//!     │                                                       │
//!     ▼                                                       ▼
//!     ┌──────────┬──────────┬──────────────────┬──────────────┐
//!     │ i64 @ 0  │ i32 @ 8  │ bytes @ 12..40   │     ...      │
//!     └──────────┴──────────┴──────────────────┴──────────────┘
//!     every access (offset, width) must satisfy offset + width <= capacity
//! ```
//!
//! The buffer imposes no layout; the caller owns offset computation, record
//! framing and cross-field consistency.
//!
//! # Ownership
//!
//! Views built with [`AtomicBuffer::wrap`] borrow the region for `'a`. Views
//! built with [`AtomicBuffer::from_raw_parts`] trust the caller to keep the
//! region alive and mapped for `'a`. Dropping a view never frees anything.
//!
//! # Thread Safety
//!
//! `AtomicBuffer` is `Copy`, `Send` and `Sync`; copies alias the same bytes.
//! Only the `_volatile`, `_ordered` and read-modify-write operations carry
//! cross-thread guarantees. Plain operations and bulk copies on bytes another
//! thread is writing concurrently, or mixing plain and atomic access to the
//! same bytes from different threads, are a data race the caller must
//! prevent.
//!
//! Every operation takes `&self`, so no method returns a Rust reference into
//! the region. Zero-copy reads ([`AtomicBuffer::get_bytes_array`],
//! [`AtomicBuffer::view`]) yield another `AtomicBuffer` over the same bytes.

mod bulk;
mod typed;

use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::bounds;
use crate::{Error, Result};

/// A non-owning, bounds-checked view over a contiguous byte region.
///
/// # Example
///
/// ```rust
/// use atomic_buffer::AtomicBuffer;
///
/// let mut bytes = [0u8; 16];
/// let buffer = AtomicBuffer::wrap(&mut bytes);
///
/// buffer.put_u16(2, 0xBEEF);
/// assert_eq!(buffer.get_u16(2), 0xBEEF);
/// assert_eq!(buffer.capacity(), 16);
/// ```
#[derive(Clone, Copy)]
pub struct AtomicBuffer<'a> {
    /// Base of the externally owned region
    ptr: *mut u8,

    /// Addressable length in bytes
    capacity: usize,

    /// Borrow of shared, interior-mutable bytes
    _marker: PhantomData<&'a UnsafeCell<[u8]>>,
}

// SAFETY: The view only hands out access through atomic operations or
// explicitly unsynchronized ones whose races are the caller's contract.
unsafe impl Send for AtomicBuffer<'_> {}
unsafe impl Sync for AtomicBuffer<'_> {}

impl<'a> AtomicBuffer<'a> {
    /// Wraps a byte slice, taking its length as the capacity.
    ///
    /// The slice stays borrowed for as long as the view, or any copy of it,
    /// is alive.
    pub fn wrap(region: &'a mut [u8]) -> Self {
        let capacity = region.len();
        // SAFETY: The slice is valid for reads and writes of its length for 'a
        unsafe { Self::from_raw_parts(region.as_mut_ptr(), capacity) }
    }

    /// Wraps the first `length` bytes of a byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientCapacity`] if `length` exceeds the slice.
    ///
    /// # Example
    ///
    /// ```rust
    /// use atomic_buffer::AtomicBuffer;
    ///
    /// let mut bytes = [0u8; 64];
    /// let buffer = AtomicBuffer::wrap_prefix(&mut bytes, 32).unwrap();
    /// assert_eq!(buffer.capacity(), 32);
    ///
    /// let mut small = [0u8; 8];
    /// assert!(AtomicBuffer::wrap_prefix(&mut small, 16).is_err());
    /// ```
    pub fn wrap_prefix(region: &'a mut [u8], length: usize) -> Result<Self> {
        if length > region.len() {
            return Err(Error::InsufficientCapacity {
                required: length,
                available: region.len(),
            });
        }

        // SAFETY: length is within the slice, valid for 'a
        Ok(unsafe { Self::from_raw_parts(region.as_mut_ptr(), length) })
    }

    /// Wraps `length` bytes starting at `ptr`.
    ///
    /// This is the constructor for regions whose owner lives outside Rust's
    /// borrow tracking: `mmap`'d files, shared-memory segments, or memory
    /// handed over by another component.
    ///
    /// # Safety
    ///
    /// For the whole of `'a`, `ptr` must be valid for reads and writes of
    /// `length` bytes, and the region must not be freed or unmapped. Other
    /// views of the same memory, in this process or another, are allowed.
    pub unsafe fn from_raw_parts(ptr: *mut u8, length: usize) -> Self {
        log::trace!("wrapped {} byte region at {:p}", length, ptr);
        Self {
            ptr,
            capacity: length,
            _marker: PhantomData,
        }
    }

    /// Creates a zero-capacity view.
    ///
    /// Every access except zero-length bulk operations is out of bounds.
    pub const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling().as_ptr(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Points this view at a different slice.
    ///
    /// Copies taken before the call keep referring to the old region.
    pub fn rewrap(&mut self, region: &'a mut [u8]) {
        *self = Self::wrap(region);
    }

    /// Points this view at `length` bytes starting at `ptr`.
    ///
    /// # Safety
    ///
    /// Same contract as [`AtomicBuffer::from_raw_parts`].
    pub unsafe fn rewrap_raw(&mut self, ptr: *mut u8, length: usize) {
        // SAFETY: Forwarded to the caller
        *self = unsafe { Self::from_raw_parts(ptr, length) };
    }

    /// Returns the raw base address, for handing the region to external I/O.
    #[inline]
    pub fn ptr(&self) -> *mut u8 {
        self.ptr
    }

    /// Returns the capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns whether the view has zero capacity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Validates `[offset, offset + length)` against the capacity.
    ///
    /// Unlike the access operations this never halts; it lets a caller prove
    /// a range once before entering a path built for the unchecked mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the range does not fit.
    #[inline]
    pub fn check_bounds(&self, offset: usize, length: usize) -> Result<()> {
        bounds::check_range(offset, length, self.capacity)
    }

    /// Returns a view of `length` bytes starting at `offset`.
    ///
    /// The sub-view aliases this buffer: writes through either are visible
    /// through both. Offsets in the sub-view are relative to `offset`.
    pub fn view(&self, offset: usize, length: usize) -> AtomicBuffer<'a> {
        let ptr = self.at(offset, length);
        Self {
            ptr,
            capacity: length,
            _marker: PhantomData,
        }
    }

    /// Sets every byte in `[0, capacity)` to `value`.
    ///
    /// Intended for initialization; it touches the whole region.
    pub fn fill(&self, value: u8) {
        if self.capacity == 0 {
            return;
        }
        // SAFETY: The whole region is valid for writes
        unsafe { core::ptr::write_bytes(self.ptr, value, self.capacity) };
    }

    /// Sets `length` bytes starting at `offset` to `value`.
    pub fn set_memory(&self, offset: usize, length: usize, value: u8) {
        let ptr = self.at(offset, length);
        // SAFETY: Range checked above
        unsafe { core::ptr::write_bytes(ptr, value, length) };
    }

    /// Bounds-checks `[index, index + length)` and returns its start address.
    #[inline(always)]
    fn at(&self, index: usize, length: usize) -> *mut u8 {
        bounds::bounds_check(index, length, self.capacity);
        self.ptr.wrapping_add(index)
    }

    /// Like [`Self::at`], additionally requiring natural alignment of `width`.
    #[inline(always)]
    fn atomic_at(&self, index: usize, width: usize) -> *mut u8 {
        let ptr = self.at(index, width);
        bounds::alignment_check(ptr as usize, width);
        ptr
    }
}

impl Default for AtomicBuffer<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> From<&'a mut [u8]> for AtomicBuffer<'a> {
    fn from(region: &'a mut [u8]) -> Self {
        Self::wrap(region)
    }
}

impl fmt::Debug for AtomicBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicBuffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}
