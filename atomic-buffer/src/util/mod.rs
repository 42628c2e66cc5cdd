//! Bit and Alignment Utilities
//!
//! Pure helpers used to compute valid buffer offsets, plus diagnostic hex
//! dumps. Nothing here touches a correctness path of the buffer itself.

mod bits;

pub use bits::{align, align_i32, is_power_of_two, mem_print, HexDump};

#[cfg(feature = "std")]
pub use bits::print;

pub use crate::config::{CACHE_LINE_LENGTH, SIZE_OF_INT32, SIZE_OF_INT64};
