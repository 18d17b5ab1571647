//! Fallible allocation for buffers that cross the C boundary
//!
//! Every array handed to libsvm (node arrays, label, probability and
//! decision-value buffers) is obtained here. Allocation failure is
//! reported as [`SvmError::ResourceExhausted`](crate::SvmError) instead
//! of aborting the process, so the failing operation returns an error
//! and the caller decides how to wind down. Release is deterministic:
//! each buffer has exactly one owner and is freed by `Drop` on every
//! exit path, including early returns on libsvm failures.

use crate::core::Result;

/// Allocate a zero-initialized buffer of exactly `len` elements.
pub(crate) fn try_buffer<T: Default + Clone>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, T::default());
    Ok(buf)
}

/// Allocate an empty buffer with capacity for exactly `len` elements.
pub(crate) fn try_with_capacity<T>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    Ok(buf)
}
