// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::time::Duration;

use crate::{runtime::Runtime, timer::Timer};

/// Runs background reads on the `blocking` thread pool and waits with
/// `async-io`'s reactor. Needs no setup.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmolRuntime;

impl Runtime for SmolRuntime {
    type Timer = SmolTimer;

    fn timer(&self) -> Self::Timer {
        SmolTimer
    }

    fn spawn_blocking<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        smol::unblock(task).detach();
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        smol::block_on(future)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SmolTimer;

#[derive(Debug)]
pub struct SmolSleep {
    timer: async_io::Timer,
}

impl SmolSleep {
    fn new(duration: Duration) -> Self {
        Self {
            timer: async_io::Timer::after(duration),
        }
    }
}

impl Future for SmolSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.timer).poll(cx).map(|_| ())
    }
}

impl Timer for SmolTimer {
    type Sleep = SmolSleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        SmolSleep::new(duration)
    }
}
