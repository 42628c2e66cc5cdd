//! Bounds-Check Policy
//!
//! Every [`AtomicBuffer`](crate::AtomicBuffer) operation calls
//! [`bounds_check`] before touching memory. The policy is chosen at build
//! time:
//!
//! - **Checked** (`debug_assertions`, or the `bounds-check` feature): a range
//!   past the end of the buffer logs the diagnostic and panics. The access is
//!   a logic error in the caller and is never reported as a recoverable value.
//! - **Unchecked** (optimized builds without the feature): the check compiles
//!   to nothing and an out-of-range access is undefined behavior.
//!
//! Atomic operations additionally go through [`alignment_check`] under the
//! same policy.
//!
//! Callers that want to validate a range once, ahead of a hot path, use
//! [`check_range`] which reports the violation as a [`Result`].

use crate::{Error, Result};

/// Whether this build performs bounds and alignment checks.
pub const ENABLED: bool = cfg!(any(debug_assertions, feature = "bounds-check"));

/// Returns `Ok` when `[index, index + length)` lies within `capacity`.
///
/// The sum is computed without overflow, so an `index` near `usize::MAX`
/// is reported as out of bounds rather than wrapping into range.
#[inline]
pub const fn check_range(index: usize, length: usize, capacity: usize) -> Result<()> {
    match index.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(Error::OutOfBounds {
            index,
            length,
            capacity,
        }),
    }
}

/// Returns `Ok` when `address` is a multiple of `alignment`.
///
/// `alignment` must be a power of two.
#[inline]
pub const fn check_alignment(address: usize, alignment: usize) -> Result<()> {
    if address & (alignment - 1) == 0 {
        Ok(())
    } else {
        Err(Error::Misaligned { address, alignment })
    }
}

/// Halts with a diagnostic if `[index, index + length)` exceeds `capacity`.
///
/// # Panics
///
/// Panics in checked builds when the range is out of bounds.
#[cfg(any(debug_assertions, feature = "bounds-check"))]
#[inline]
#[track_caller]
pub fn bounds_check(index: usize, length: usize, capacity: usize) {
    if let Err(err) = check_range(index, length, capacity) {
        fail(err);
    }
}

/// No-op in unchecked builds.
#[cfg(not(any(debug_assertions, feature = "bounds-check")))]
#[inline(always)]
pub fn bounds_check(_index: usize, _length: usize, _capacity: usize) {}

/// Halts with a diagnostic if `address` is not aligned to `alignment`.
///
/// # Panics
///
/// Panics in checked builds when the address is misaligned.
#[cfg(any(debug_assertions, feature = "bounds-check"))]
#[inline]
#[track_caller]
pub fn alignment_check(address: usize, alignment: usize) {
    if let Err(err) = check_alignment(address, alignment) {
        fail(err);
    }
}

/// No-op in unchecked builds.
#[cfg(not(any(debug_assertions, feature = "bounds-check")))]
#[inline(always)]
pub fn alignment_check(_address: usize, _alignment: usize) {}

#[cfg(any(debug_assertions, feature = "bounds-check"))]
#[cold]
#[inline(never)]
#[track_caller]
fn fail(err: Error) -> ! {
    log::error!("{}", err);
    panic!("{}", err)
}
