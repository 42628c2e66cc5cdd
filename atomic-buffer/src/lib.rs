//! Atomic Buffer: Typed, Ordered Access to Externally Owned Shared Memory
//!
//! This crate provides [`AtomicBuffer`], a non-owning view over a contiguous
//! memory region with bounds-checked typed loads and stores at several memory
//! ordering strengths. It is the access primitive a messaging layer uses to
//! place fixed-width fields and framed records directly into heap, memory-mapped
//! or shared-memory segments and exchange them between threads or processes
//! without locks.
//!
//! # Architecture
//!
//! - [`buffer`]: the [`AtomicBuffer`] view with plain, acquire, release and
//!   sequentially consistent operations plus bulk copy
//! - [`bounds`]: the bounds-check policy every buffer operation goes through
//! - [`util`]: alignment arithmetic, power-of-two test and hex dumps
//! - [`config`]: fixed size and alignment constants
//!
//! # Ordering Contract
//!
//! | Operation family | Ordering |
//! |------------------|----------|
//! | `get_*` / `put_*` | plain, no cross-thread visibility |
//! | `get_*_volatile` | acquire |
//! | `put_*_ordered` | release |
//! | `get_and_add_*`, `get_and_set_*`, `compare_and_set_*` | sequentially consistent |
//!
//! A writer publishing with `put_i64_ordered` and a reader observing with
//! `get_i64_volatile` is the minimal producer/consumer handshake.
//!
//! # Example
//!
//! ```rust
//! use atomic_buffer::AtomicBuffer;
//!
//! #[repr(C, align(64))]
//! struct Region([u8; 128]);
//!
//! let mut region = Region([0; 128]);
//! let buffer = AtomicBuffer::wrap(&mut region.0);
//!
//! buffer.put_i64(0, 10);
//! assert_eq!(buffer.get_and_add_i64(0, 5), 10);
//! assert_eq!(buffer.get_i64(0), 15);
//!
//! assert!(buffer.compare_and_set_i64(0, 15, 20));
//! assert!(!buffer.compare_and_set_i64(0, 15, 20));
//! ```
//!
//! # Feature Flags
//!
//! - `std` (default): `std::error::Error` impls and [`util::print`]
//! - `bounds-check`: keep bounds and alignment checks in optimized builds
//!
//! Debug builds always check. Optimized builds without `bounds-check` skip
//! the checks entirely, and an out-of-range access is undefined behavior.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod sync;

pub mod bounds;
pub mod buffer;
pub mod util;

pub use buffer::AtomicBuffer;

/// Error types for the atomic-buffer crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Access range extends past the end of the buffer
    OutOfBounds {
        /// Start offset of the access
        index: usize,
        /// Width of the access in bytes
        length: usize,
        /// Capacity of the buffer
        capacity: usize,
    },
    /// Atomic access on an address that is not naturally aligned
    Misaligned {
        /// Absolute address of the access
        address: usize,
        /// Required alignment in bytes
        alignment: usize,
    },
    /// Requested view is longer than the backing region
    InsufficientCapacity {
        /// Requested length
        required: usize,
        /// Length of the backing region
        available: usize,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::OutOfBounds {
                index,
                length,
                capacity,
            } => write!(
                f,
                "out of bounds: index {} + length {} exceeds capacity {}",
                index, length, capacity
            ),
            Error::Misaligned { address, alignment } => write!(
                f,
                "misaligned atomic access: address {:#x} is not aligned to {} bytes",
                address, alignment
            ),
            Error::InsufficientCapacity {
                required,
                available,
            } => write!(
                f,
                "insufficient capacity: required {}, available {}",
                required, available
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for atomic-buffer operations
pub type Result<T> = core::result::Result<T, Error>;

/// Compile-time configuration constants
pub mod config {
    /// Cache line size for alignment
    pub const CACHE_LINE_LENGTH: usize = 64;

    /// Width of an `i32` in bytes
    pub const SIZE_OF_INT32: usize = core::mem::size_of::<i32>();

    /// Width of an `i64` in bytes
    pub const SIZE_OF_INT64: usize = core::mem::size_of::<i64>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_config_constants() {
        assert_eq!(config::CACHE_LINE_LENGTH, 64);
        assert_eq!(config::SIZE_OF_INT32, 4);
        assert_eq!(config::SIZE_OF_INT64, 8);
    }

    #[test]
    fn test_error_display() {
        let err = Error::OutOfBounds {
            index: 60,
            length: 8,
            capacity: 64,
        };
        assert_eq!(
            err.to_string(),
            "out of bounds: index 60 + length 8 exceeds capacity 64"
        );

        let err = Error::Misaligned {
            address: 0x1003,
            alignment: 4,
        };
        assert_eq!(
            err.to_string(),
            "misaligned atomic access: address 0x1003 is not aligned to 4 bytes"
        );

        let err = Error::InsufficientCapacity {
            required: 32,
            available: 16,
        };
        assert_eq!(
            err.to_string(),
            "insufficient capacity: required 32, available 16"
        );
    }
}
