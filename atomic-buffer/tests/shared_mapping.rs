//! Views over an anonymous shared `mmap` region, including across `fork`.

#![cfg(unix)]

use std::ptr;
use std::thread;

use atomic_buffer::util::{align, CACHE_LINE_LENGTH, SIZE_OF_INT64};
use atomic_buffer::AtomicBuffer;

const MAP_LEN: usize = 4096;

/// Anonymous `MAP_SHARED` mapping, unmapped on drop.
struct SharedMapping {
    ptr: *mut u8,
    len: usize,
}

impl SharedMapping {
    fn new(len: usize) -> Self {
        let ptr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        assert_ne!(ptr, libc::MAP_FAILED, "mmap failed");
        Self {
            ptr: ptr as *mut u8,
            len,
        }
    }

    fn view(&self) -> AtomicBuffer<'_> {
        // SAFETY: The mapping stays valid until `self` is dropped
        unsafe { AtomicBuffer::from_raw_parts(self.ptr, self.len) }
    }
}

impl Drop for SharedMapping {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.ptr as *mut libc::c_void, self.len);
        }
    }
}

#[test]
fn independent_views_alias_one_mapping() {
    let mapping = SharedMapping::new(MAP_LEN);
    let writer = mapping.view();
    let reader = mapping.view();

    assert_eq!(writer.capacity(), MAP_LEN);
    assert_eq!(writer.ptr(), reader.ptr());

    writer.fill(0);
    writer.put_i64_ordered(0, 0x5EED);
    assert_eq!(reader.get_i64_volatile(0), 0x5EED);
}

#[test]
fn cache_line_slots_across_threads() {
    const SLOTS: usize = 16;
    const INCREMENTS: i64 = 5_000;

    let mapping = SharedMapping::new(MAP_LEN);
    let buffer = mapping.view();
    let stride = align(SIZE_OF_INT64, CACHE_LINE_LENGTH);

    thread::scope(|s| {
        for slot in 0..SLOTS {
            s.spawn(move || {
                for _ in 0..INCREMENTS {
                    buffer.get_and_add_i64(slot * stride, 1);
                }
            });
        }
    });

    for slot in 0..SLOTS {
        assert_eq!(buffer.get_i64_volatile(slot * stride), INCREMENTS);
    }
}

#[cfg(target_os = "linux")]
#[test]
fn counter_shared_with_child_process() {
    const COUNTER: usize = 0;
    const DONE: usize = 8;
    const INCREMENTS: i64 = 10_000;

    let mapping = SharedMapping::new(MAP_LEN);
    let buffer = mapping.view();
    buffer.put_i64_ordered(COUNTER, 0);
    buffer.put_i64_ordered(DONE, 0);

    let pid = unsafe { libc::fork() };
    assert!(pid >= 0, "fork failed");

    if pid == 0 {
        for _ in 0..INCREMENTS {
            buffer.get_and_add_i64(COUNTER, 1);
        }
        buffer.put_i64_ordered(DONE, 1);
        unsafe { libc::_exit(0) };
    }

    for _ in 0..INCREMENTS {
        buffer.get_and_add_i64(COUNTER, 1);
    }

    let mut status = 0;
    let waited = unsafe { libc::waitpid(pid, &mut status, 0) };
    assert_eq!(waited, pid);
    assert!(libc::WIFEXITED(status));
    assert_eq!(libc::WEXITSTATUS(status), 0);

    assert_eq!(buffer.get_i64_volatile(DONE), 1);
    assert_eq!(buffer.get_i64_volatile(COUNTER), 2 * INCREMENTS);
}
