// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use std::io;

use tarry_core::{ByteSource, RuneSource, TimedByteRead, TimedRead, TimedRuneRead};

/// A timed reader with its timeout bound, usable as a plain reader.
///
/// Every call goes through the timed path with the bound timeout. A timeout
/// surfaces as an `io::Error` of kind [`io::ErrorKind::TimedOut`] wrapping
/// [`tarry_core::Timeout`]; see [`tarry_error::is_timeout_error`].
///
/// # Example
///
/// ```rust
/// use std::io::{Cursor, Read};
/// use std::time::Duration;
/// use tarry_read::BufferedTimedReader;
///
/// let mut reader = BufferedTimedReader::new(Cursor::new(b"abc".to_vec()))
///     .with_timeout(Duration::from_secs(1));
/// let mut text = String::new();
/// reader.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "abc");
/// ```
#[derive(Debug)]
pub struct WithTimeout<T> {
    inner: T,
    timeout: Duration,
}

impl<T> WithTimeout<T> {
    pub const fn new(inner: T, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub const fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: TimedRead> io::Read for WithTimeout<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.inner.read_with_timeout(buf, self.timeout)?)
    }
}

impl<T: TimedByteRead> ByteSource for WithTimeout<T> {
    fn read_byte(&mut self) -> io::Result<u8> {
        Ok(self.inner.read_byte_with_timeout(self.timeout)?)
    }
}

impl<T: TimedRuneRead> RuneSource for WithTimeout<T> {
    fn read_rune(&mut self) -> io::Result<(char, usize)> {
        Ok(self.inner.read_rune_with_timeout(self.timeout)?)
    }
}
