// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::pin;
use core::time::Duration;
use std::io;

use tarry_core::{debug, ReadError, SingleFlight, Timeout};
use tarry_runtime::{runtime::Runtime, timer::Timer};

/// Shared machinery of the single-unit readers: one source call per unit.
pub(crate) struct UnitFlight<S, U, R> {
    flight: SingleFlight<S, io::Result<U>, R>,
}

impl<S, U, R> UnitFlight<S, U, R>
where
    S: Send + 'static,
    U: Send + 'static,
    R: Runtime,
{
    pub(crate) fn new(source: S, runtime: R) -> Self {
        Self {
            flight: SingleFlight::new(source, runtime),
        }
    }

    pub(crate) const fn is_reading(&self) -> bool {
        self.flight.is_in_flight()
    }

    pub(crate) fn read_with_timeout(
        &mut self,
        read: fn(&mut S) -> io::Result<U>,
        timeout: Duration,
    ) -> Result<U, ReadError> {
        self.flight.launch(read);
        let timer = self.flight.runtime().timer();
        let deadline = pin!(timer.sleep_future(timeout));
        match self.flight.wait_until(deadline) {
            Some(delivered) => Ok(delivered??),
            None => {
                debug!("unit read still pending after {timeout:?}");
                Err(Timeout.into())
            }
        }
    }

    /// Collects a read left behind by an earlier timeout, or reads directly.
    pub(crate) fn read(&mut self, read: fn(&mut S) -> io::Result<U>) -> io::Result<U> {
        if self.flight.is_in_flight() {
            self.flight.wait()?
        } else {
            self.flight.direct(read)
        }
    }
}

impl<S, U, R: core::fmt::Debug> core::fmt::Debug for UnitFlight<S, U, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.flight.fmt(f)
    }
}
