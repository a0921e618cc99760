// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use std::io;

use tarry_core::{ByteSource, Result, TimedByteRead};
use tarry_runtime::{runtime::Runtime, DefaultRuntime};

use crate::unit::UnitFlight;
use crate::WithTimeout;

/// Reads single bytes from a blocking [`ByteSource`] with a per-call timeout.
///
/// A call that times out leaves its read running; the byte it produces is
/// returned by the next call, timed or not.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use std::time::Duration;
/// use tarry_core::IoBytes;
/// use tarry_read::TimedByteReader;
///
/// let mut reader = TimedByteReader::new(IoBytes::new(Cursor::new(b"hi".to_vec())));
/// assert_eq!(reader.read_byte_with_timeout(Duration::from_secs(1)).unwrap(), b'h');
/// ```
#[derive(Debug)]
pub struct TimedByteReader<S, R = DefaultRuntime> {
    unit: UnitFlight<S, u8, R>,
}

#[cfg(feature = "runtime-smol")]
impl<S: ByteSource + Send + 'static> TimedByteReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_runtime(source, DefaultRuntime::default())
    }
}

impl<S, R> TimedByteReader<S, R>
where
    S: ByteSource + Send + 'static,
    R: Runtime,
{
    pub fn with_runtime(source: S, runtime: R) -> Self {
        Self {
            unit: UnitFlight::new(source, runtime),
        }
    }

    /// Reads one byte, giving up the wait after `timeout`.
    ///
    /// # Errors
    /// [`tarry_core::ReadError::Timeout`] when the byte is not available in
    /// time, or whatever the source reported.
    pub fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<u8> {
        self.unit.read_with_timeout(S::read_byte, timeout)
    }

    /// True while a timed-out read has not been collected yet
    pub const fn is_reading(&self) -> bool {
        self.unit.is_reading()
    }

    /// Binds `timeout` so the reader can stand in for a plain [`ByteSource`].
    pub const fn with_timeout(self, timeout: Duration) -> WithTimeout<Self> {
        WithTimeout::new(self, timeout)
    }
}

impl<S, R> TimedByteRead for TimedByteReader<S, R>
where
    S: ByteSource + Send + 'static,
    R: Runtime,
{
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<u8> {
        Self::read_byte_with_timeout(self, timeout)
    }
}

/// Deadline-less read: drains a read left behind by a timeout instead of
/// starting a new one.
impl<S, R> ByteSource for TimedByteReader<S, R>
where
    S: ByteSource + Send + 'static,
    R: Runtime,
{
    fn read_byte(&mut self) -> io::Result<u8> {
        self.unit.read(S::read_byte)
    }
}
