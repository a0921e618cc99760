// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;
use core::time::Duration;

/// Deadline gate: produces a future that completes once after a duration.
pub trait Timer: Clone + Send + Sync + Debug + 'static {
    type Sleep: Future<Output = ()> + Send;

    /// Creates a future that sleeps for the specified duration.
    /// The caller pins it and may poll it across several waits.
    fn sleep_future(&self, duration: Duration) -> Self::Sleep;
}
