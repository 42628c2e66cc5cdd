//! Typed load and store operations.
//!
//! Plain accessors read and write native-endian integers at any offset with
//! no alignment requirement. Every other accessor goes through a core atomic
//! and needs the address to be aligned to the width of the value.

use core::ptr;

use super::AtomicBuffer;
use crate::sync::atomic::Ordering;
use crate::sync::{atomic_i32, atomic_i64};

impl AtomicBuffer<'_> {
    // ------------------------------------------------------------------
    // Plain
    // ------------------------------------------------------------------

    /// Reads a `u8` at `offset`.
    #[inline]
    pub fn get_u8(&self, offset: usize) -> u8 {
        let p = self.at(offset, 1);
        // SAFETY: One byte in range
        unsafe { p.read() }
    }

    /// Reads an `i8` at `offset`.
    #[inline]
    pub fn get_i8(&self, offset: usize) -> i8 {
        self.get_u8(offset) as i8
    }

    /// Reads a native-endian `u16` at `offset`.
    #[inline]
    pub fn get_u16(&self, offset: usize) -> u16 {
        let p = self.at(offset, 2);
        // SAFETY: Two bytes in range, unaligned read
        unsafe { ptr::read_unaligned(p.cast::<u16>()) }
    }

    /// Reads a native-endian `i16` at `offset`.
    #[inline]
    pub fn get_i16(&self, offset: usize) -> i16 {
        self.get_u16(offset) as i16
    }

    /// Reads a native-endian `i32` at `offset`.
    #[inline]
    pub fn get_i32(&self, offset: usize) -> i32 {
        let p = self.at(offset, 4);
        // SAFETY: Four bytes in range, unaligned read
        unsafe { ptr::read_unaligned(p.cast::<i32>()) }
    }

    /// Reads a native-endian `i64` at `offset`.
    #[inline]
    pub fn get_i64(&self, offset: usize) -> i64 {
        let p = self.at(offset, 8);
        // SAFETY: Eight bytes in range, unaligned read
        unsafe { ptr::read_unaligned(p.cast::<i64>()) }
    }

    /// Writes a `u8` at `offset`.
    #[inline]
    pub fn put_u8(&self, offset: usize, value: u8) {
        let p = self.at(offset, 1);
        // SAFETY: One byte in range
        unsafe { p.write(value) }
    }

    /// Writes an `i8` at `offset`.
    #[inline]
    pub fn put_i8(&self, offset: usize, value: i8) {
        self.put_u8(offset, value as u8)
    }

    /// Writes a native-endian `u16` at `offset`.
    #[inline]
    pub fn put_u16(&self, offset: usize, value: u16) {
        let p = self.at(offset, 2);
        // SAFETY: Two bytes in range, unaligned write
        unsafe { ptr::write_unaligned(p.cast::<u16>(), value) }
    }

    /// Writes a native-endian `i16` at `offset`.
    #[inline]
    pub fn put_i16(&self, offset: usize, value: i16) {
        self.put_u16(offset, value as u16)
    }

    /// Writes a native-endian `i32` at `offset`.
    #[inline]
    pub fn put_i32(&self, offset: usize, value: i32) {
        let p = self.at(offset, 4);
        // SAFETY: Four bytes in range, unaligned write
        unsafe { ptr::write_unaligned(p.cast::<i32>(), value) }
    }

    /// Writes a native-endian `i64` at `offset`.
    #[inline]
    pub fn put_i64(&self, offset: usize, value: i64) {
        let p = self.at(offset, 8);
        // SAFETY: Eight bytes in range, unaligned write
        unsafe { ptr::write_unaligned(p.cast::<i64>(), value) }
    }

    // ------------------------------------------------------------------
    // Acquire / release
    // ------------------------------------------------------------------

    /// Reads an `i32` at `offset` with acquire ordering.
    ///
    /// Observes any value published by a release store to the same offset
    /// and keeps later reads from moving before it.
    #[inline]
    pub fn get_i32_volatile(&self, offset: usize) -> i32 {
        let p = self.atomic_at(offset, 4);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i32(p) };
        atomic.load(Ordering::Acquire)
    }

    /// Reads an `i64` at `offset` with acquire ordering.
    #[inline]
    pub fn get_i64_volatile(&self, offset: usize) -> i64 {
        let p = self.atomic_at(offset, 8);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i64(p) };
        atomic.load(Ordering::Acquire)
    }

    /// Writes an `i32` at `offset` with release ordering.
    ///
    /// Every write this thread made before the call is visible to a reader
    /// that observes this value through an acquire load.
    #[inline]
    pub fn put_i32_ordered(&self, offset: usize, value: i32) {
        let p = self.atomic_at(offset, 4);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i32(p) };
        atomic.store(value, Ordering::Release)
    }

    /// Writes an `i64` at `offset` with release ordering.
    #[inline]
    pub fn put_i64_ordered(&self, offset: usize, value: i64) {
        let p = self.atomic_at(offset, 8);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i64(p) };
        atomic.store(value, Ordering::Release)
    }

    /// Writes the low 32 bits of `value` at `offset` with release ordering.
    ///
    /// Higher bits are discarded; the stored field is always four bytes.
    #[inline]
    pub fn put_int_ordered(&self, offset: usize, value: isize) {
        self.put_i32_ordered(offset, value as i32)
    }

    // ------------------------------------------------------------------
    // Read-modify-write, sequentially consistent
    // ------------------------------------------------------------------

    /// Atomically adds `delta` to the `i64` at `offset`, returning the
    /// previous value. Wraps on overflow.
    #[inline]
    pub fn get_and_add_i64(&self, offset: usize, delta: i64) -> i64 {
        let p = self.atomic_at(offset, 8);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i64(p) };
        atomic.fetch_add(delta, Ordering::SeqCst)
    }

    /// Atomically adds `delta` to the `i32` at `offset`, returning the
    /// previous value. Wraps on overflow.
    #[inline]
    pub fn get_and_add_i32(&self, offset: usize, delta: i32) -> i32 {
        let p = self.atomic_at(offset, 4);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i32(p) };
        atomic.fetch_add(delta, Ordering::SeqCst)
    }

    /// Atomically replaces the `i64` at `offset`, returning the previous value.
    #[inline]
    pub fn get_and_set_i64(&self, offset: usize, value: i64) -> i64 {
        let p = self.atomic_at(offset, 8);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i64(p) };
        atomic.swap(value, Ordering::SeqCst)
    }

    /// Atomically stores `update` at `offset` if it currently holds
    /// `expected`. Returns whether the swap happened.
    ///
    /// A mismatch is a normal outcome, not an error.
    #[inline]
    pub fn compare_and_set_i32(&self, offset: usize, expected: i32, update: i32) -> bool {
        let p = self.atomic_at(offset, 4);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i32(p) };
        atomic
            .compare_exchange(expected, update, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Atomically stores `update` at `offset` if it currently holds
    /// `expected`. Returns whether the swap happened.
    #[inline]
    pub fn compare_and_set_i64(&self, offset: usize, expected: i64, update: i64) -> bool {
        let p = self.atomic_at(offset, 8);
        // SAFETY: In range and aligned
        let atomic = unsafe { atomic_i64(p) };
        atomic
            .compare_exchange(expected, update, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}
