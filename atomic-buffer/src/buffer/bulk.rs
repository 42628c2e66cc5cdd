//! Bulk byte operations.
//!
//! Copies into the buffer use memmove semantics, so source and destination
//! may overlap, including when both live in the same region.
//!
//! No operation here returns a Rust reference into the region. Any view can
//! write through `&self`, so a live `&[u8]` over shared bytes could be
//! invalidated by an unrelated call. Zero-copy access is handed out as an
//! aliasing [`AtomicBuffer`] instead.

use alloc::vec::Vec;
use core::ptr;

use super::AtomicBuffer;

impl<'a> AtomicBuffer<'a> {
    /// Copies `length` bytes from `src` at `src_offset` into this buffer at
    /// `index`.
    ///
    /// Both ranges are bounds-checked. Overlapping ranges are copied as if
    /// through an intermediate buffer.
    pub fn put_bytes(
        &self,
        index: usize,
        src: &AtomicBuffer<'_>,
        src_offset: usize,
        length: usize,
    ) {
        let dst = self.at(index, length);
        let from = src.at(src_offset, length);
        // SAFETY: Both ranges checked; `copy` tolerates overlap
        unsafe { ptr::copy(from, dst, length) };
    }

    /// Copies `length` bytes of `src` starting at `src_offset` into this
    /// buffer at `index`.
    ///
    /// Moves within one region go through [`AtomicBuffer::put_bytes`].
    pub fn put_bytes_array(&self, index: usize, src: &[u8], src_offset: usize, length: usize) {
        let dst = self.at(index, length);
        crate::bounds::bounds_check(src_offset, length, src.len());
        let from = src.as_ptr().wrapping_add(src_offset);
        // SAFETY: Both ranges checked; `src` is borrowed from outside the region
        unsafe { ptr::copy(from, dst, length) };
    }

    /// Returns `length` bytes starting at `offset` without copying.
    ///
    /// The result is a sub-view, exactly as [`AtomicBuffer::view`]: writes
    /// through it land in this buffer and writes through this buffer are
    /// visible in it. Use [`AtomicBuffer::get_bytes`] for an isolated copy.
    #[inline]
    pub fn get_bytes_array(&self, offset: usize, length: usize) -> AtomicBuffer<'a> {
        self.view(offset, length)
    }

    /// Copies `dst.len()` bytes starting at `offset` into `dst`.
    pub fn get_bytes(&self, offset: usize, dst: &mut [u8]) {
        let length = dst.len();
        let p = self.at(offset, length);
        // SAFETY: Range checked; `dst` is exclusively borrowed
        unsafe { ptr::copy(p, dst.as_mut_ptr(), length) };
    }

    /// Appends `length` bytes starting at `offset` to `dest`.
    ///
    /// The sink grows once, up front, by `length`.
    pub fn write_bytes(&self, dest: &mut Vec<u8>, offset: usize, length: usize) {
        let p = self.at(offset, length);
        dest.reserve(length);
        let len = dest.len();
        // SAFETY: Range checked; `reserve` made room for `length` more bytes
        // and the copy initializes all of them before `set_len`
        unsafe {
            ptr::copy_nonoverlapping(p, dest.as_mut_ptr().add(len), length);
            dest.set_len(len + length);
        }
    }
}
