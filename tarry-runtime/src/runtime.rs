// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::Timer;
use core::fmt::Debug;
use core::future::Future;

/// Host for the background half of a timed read.
///
/// Cloning is cheap; clones share the same underlying executor.
pub trait Runtime: Clone + Send + Sync + Debug + 'static {
    type Timer: Timer;

    /// The deadline gate of this runtime
    fn timer(&self) -> Self::Timer;

    /// Runs a blocking closure on a worker thread and detaches it.
    ///
    /// The closure is never cancelled; it runs until it returns.
    fn spawn_blocking<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static;

    /// Blocks the calling thread until `future` completes.
    ///
    /// Must not be called from inside an async context of the same runtime.
    fn block_on<F: Future>(&self, future: F) -> F::Output;
}
