use alloc::string::String;
use core::fmt::{self, Write};

/// Rounds `value` up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two. Any other value yields a meaningless
/// result; callers are expected to validate with [`is_power_of_two`].
///
/// ```rust
/// use atomic_buffer::util::align_i32;
///
/// assert_eq!(align_i32(5, 8), 8);
/// assert_eq!(align_i32(8, 8), 8);
/// assert_eq!(align_i32(0, 64), 0);
/// ```
#[inline]
pub const fn align_i32(value: i32, alignment: i32) -> i32 {
    value.wrapping_add(alignment - 1) & !(alignment - 1)
}

/// Rounds a buffer offset up to the next multiple of `alignment`.
///
/// Same precondition as [`align_i32`].
#[inline]
pub const fn align(value: usize, alignment: usize) -> usize {
    value.wrapping_add(alignment - 1) & !(alignment - 1)
}

/// Returns whether `value` is a positive power of two.
///
/// Zero and every negative value, including `i64::MIN`, are rejected.
#[inline]
pub const fn is_power_of_two(value: i64) -> bool {
    value > 0 && (value & value.wrapping_neg()) == value
}

/// Formats `len` bytes at `ptr` as space-terminated lowercase hex pairs.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes.
pub unsafe fn mem_print(ptr: *const u8, len: usize) -> String {
    let mut output = String::with_capacity(len * 3);
    for i in 0..len {
        // SAFETY: Caller guarantees `len` readable bytes
        let byte = unsafe { ptr.add(i).read() };
        let _ = write!(output, "{:02x} ", byte);
    }
    output
}

/// Hex dump of a byte slice.
///
/// Bytes render as `"{:02x} "`; a `" :  "` separator splits each row at
/// 16 bytes and a newline ends every row of 32.
///
/// ```rust
/// use atomic_buffer::util::HexDump;
///
/// assert_eq!(HexDump(&[0x00, 0xab, 0x10]).to_string(), "00 ab 10 ");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 && i % 16 == 0 && i % 32 != 0 {
                f.write_str(" :  ")?;
            }
            if i > 0 && i % 32 == 0 {
                f.write_str("\n")?;
            }
            write!(f, "{:02x} ", byte)?;
        }
        Ok(())
    }
}

/// Writes a [`HexDump`] of `bytes` followed by a newline to standard output.
#[cfg(feature = "std")]
pub fn print(bytes: &[u8]) {
    println!("{}", HexDump(bytes));
}
