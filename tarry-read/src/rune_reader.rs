// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use std::io;

use tarry_core::{Result, RuneSource, TimedRuneRead};
use tarry_runtime::{runtime::Runtime, DefaultRuntime};

use crate::unit::UnitFlight;
use crate::WithTimeout;

/// Reads single codepoints from a blocking [`RuneSource`] with a per-call timeout.
#[derive(Debug)]
pub struct TimedRuneReader<S, R = DefaultRuntime> {
    unit: UnitFlight<S, (char, usize), R>,
}

#[cfg(feature = "runtime-smol")]
impl<S: RuneSource + Send + 'static> TimedRuneReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_runtime(source, DefaultRuntime::default())
    }
}

impl<S, R> TimedRuneReader<S, R>
where
    S: RuneSource + Send + 'static,
    R: Runtime,
{
    pub fn with_runtime(source: S, runtime: R) -> Self {
        Self {
            unit: UnitFlight::new(source, runtime),
        }
    }

    /// Reads one codepoint and its width, giving up the wait after `timeout`.
    ///
    /// # Errors
    /// [`tarry_core::ReadError::Timeout`] when the codepoint is not available
    /// in time, or whatever the source reported.
    pub fn read_rune_with_timeout(&mut self, timeout: Duration) -> Result<(char, usize)> {
        self.unit.read_with_timeout(S::read_rune, timeout)
    }

    pub const fn is_reading(&self) -> bool {
        self.unit.is_reading()
    }

    /// Binds `timeout` so the reader can stand in for a plain [`RuneSource`].
    pub const fn with_timeout(self, timeout: Duration) -> WithTimeout<Self> {
        WithTimeout::new(self, timeout)
    }
}

impl<S, R> TimedRuneRead for TimedRuneReader<S, R>
where
    S: RuneSource + Send + 'static,
    R: Runtime,
{
    fn read_rune_with_timeout(&mut self, timeout: Duration) -> Result<(char, usize)> {
        Self::read_rune_with_timeout(self, timeout)
    }
}

impl<S, R> RuneSource for TimedRuneReader<S, R>
where
    S: RuneSource + Send + 'static,
    R: Runtime,
{
    fn read_rune(&mut self) -> io::Result<(char, usize)> {
        self.unit.read(S::read_rune)
    }
}
