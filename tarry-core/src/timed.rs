// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-call deadline capabilities.
//!
//! A timed call either returns data before the deadline or reports
//! [`tarry_error::Timeout`]. A timeout only abandons the wait: the read behind
//! it keeps running and its result is handed to a later call.

use core::time::Duration;

use tarry_error::Result;

/// Slice reads with a deadline.
pub trait TimedRead {
    /// Fills as much of `buf` as becomes available before `timeout`.
    ///
    /// Returns a short count when some, but not all, data arrived in time.
    /// Reports a timeout only when nothing arrived at all.
    ///
    /// # Errors
    /// [`tarry_error::ReadError::Timeout`] with zero bytes, or the source error.
    fn read_with_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

/// Single-byte reads with a deadline.
pub trait TimedByteRead {
    /// # Errors
    /// [`tarry_error::ReadError::Timeout`], or the source error (including end of input).
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<u8>;
}

/// Codepoint reads with a deadline.
pub trait TimedRuneRead {
    /// Returns the codepoint and its encoded width in bytes.
    ///
    /// # Errors
    /// [`tarry_error::ReadError::Timeout`], or the source error (including end of input).
    fn read_rune_with_timeout(&mut self, timeout: Duration) -> Result<(char, usize)>;
}

impl<T: TimedRead + ?Sized> TimedRead for &mut T {
    fn read_with_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        (**self).read_with_timeout(buf, timeout)
    }
}

impl<T: TimedByteRead + ?Sized> TimedByteRead for &mut T {
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<u8> {
        (**self).read_byte_with_timeout(timeout)
    }
}

impl<T: TimedRuneRead + ?Sized> TimedRuneRead for &mut T {
    fn read_rune_with_timeout(&mut self, timeout: Duration) -> Result<(char, usize)> {
        (**self).read_rune_with_timeout(timeout)
    }
}
