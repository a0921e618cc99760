// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! At most one background read per source.
//!
//! This module provides the primitive every timed reader is built on: it runs
//! one blocking call against the source on a worker thread and hands the result
//! back through a one-shot completion slot. Waiting on the slot can be raced
//! against a deadline; losing the race leaves the slot in place for the next
//! wait.

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::channel::oneshot;
use futures::future::{self, Either};
use parking_lot::Mutex;
use tarry_runtime::runtime::Runtime;

use crate::warn;

/// Owner of a blocking source and its (at most one) outstanding read.
///
/// The source sits behind `Arc<parking_lot::Mutex<_>>` so the worker thread can
/// borrow it for the duration of one call. The lock is never contended: while
/// a read is in flight the owner only touches the completion slot, and a
/// direct read happens only while idle.
///
/// # Lifecycle of the slot
///
/// - [`launch`](Self::launch) creates it (no-op while one exists)
/// - [`wait_until`](Self::wait_until) consumes it if the read wins the race,
///   keeps it if the deadline wins
/// - [`wait`](Self::wait) consumes it unconditionally
///
/// A result is therefore retrieved exactly once, by whichever call observes it.
///
/// # Example
///
/// ```rust
/// use std::pin::pin;
/// use std::time::Duration;
/// use tarry_core::SingleFlight;
/// use tarry_runtime::{runtime::Runtime, timer::Timer, DefaultRuntime};
///
/// let mut flight = SingleFlight::new(vec![1_u8, 2, 3], DefaultRuntime::default());
/// assert!(flight.launch(|source| source.pop()));
/// assert!(!flight.launch(|source| source.pop()));
///
/// let deadline = pin!(flight.runtime().timer().sleep_future(Duration::from_secs(5)));
/// let popped = flight.wait_until(deadline).expect("read beats a 5s deadline").unwrap();
/// assert_eq!(popped, Some(3));
/// assert!(!flight.is_in_flight());
/// ```
pub struct SingleFlight<S, T, R> {
    source: Arc<Mutex<S>>,
    slot: Option<oneshot::Receiver<T>>,
    runtime: R,
}

impl<S, T, R> SingleFlight<S, T, R>
where
    S: Send + 'static,
    T: Send + 'static,
    R: Runtime,
{
    pub fn new(source: S, runtime: R) -> Self {
        Self {
            source: Arc::new(Mutex::new(source)),
            slot: None,
            runtime,
        }
    }

    /// True while a background read has not been collected
    pub const fn is_in_flight(&self) -> bool {
        self.slot.is_some()
    }

    pub const fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Starts `op` against the source on a worker thread.
    ///
    /// Returns `false` without doing anything when a read is already in
    /// flight: a second read never starts against the same source.
    pub fn launch<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut S) -> T + Send + 'static,
    {
        if self.slot.is_some() {
            return false;
        }

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        self.runtime.spawn_blocking(move || {
            // A panicking source drops `tx`, which the waiter sees as a vanished result
            if let Ok(output) = panic::catch_unwind(AssertUnwindSafe(|| op(&mut source.lock()))) {
                // Nobody to deliver to once the owner is dropped
                let _ = tx.send(output);
            }
        });
        self.slot = Some(rx);
        true
    }

    /// Blocks until the outstanding read completes or `deadline` fires,
    /// whichever happens first.
    ///
    /// Returns `None` when the deadline won; the read stays in flight. A
    /// completion that is already available wins over an elapsed deadline.
    ///
    /// The deadline is borrowed so one deadline can cover several waits.
    pub fn wait_until<D>(&mut self, deadline: Pin<&mut D>) -> Option<io::Result<T>>
    where
        D: Future<Output = ()>,
    {
        let delivered = {
            let Some(slot) = self.slot.as_mut() else {
                return Some(Err(idle()));
            };
            match self.runtime.block_on(future::select(slot, deadline)) {
                Either::Left((delivered, _)) => delivered,
                Either::Right(_) => return None,
            }
        };
        self.slot = None;
        Some(delivered.map_err(|_| vanished()))
    }

    /// Blocks until the outstanding read completes, without a deadline.
    ///
    /// # Errors
    /// Fails when nothing is in flight or the worker ended without a result.
    pub fn wait(&mut self) -> io::Result<T> {
        let Some(slot) = self.slot.take() else {
            return Err(idle());
        };
        self.runtime.block_on(slot).map_err(|_| vanished())
    }

    /// Runs `op` against the source on the calling thread.
    ///
    /// Only meaningful while idle; with a read in flight this blocks until the
    /// worker releases the source.
    pub fn direct<U>(&mut self, op: impl FnOnce(&mut S) -> U) -> U {
        debug_assert!(
            self.slot.is_none(),
            "direct read while a background read is in flight"
        );
        op(&mut self.source.lock())
    }
}

impl<S, T, R: fmt::Debug> fmt::Debug for SingleFlight<S, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.slot.is_some())
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}

fn idle() -> io::Error {
    io::Error::other("no background read in flight")
}

fn vanished() -> io::Error {
    warn!("background read ended without delivering a result");
    io::Error::other("background read ended without delivering a result")
}
