// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use std::{io, sync::Arc, time::Duration};

use tokio::runtime::{Builder, Handle};

use crate::{runtime::Runtime, timer::Timer};

/// Runs background reads on tokio's blocking pool and waits on an owned
/// current-thread runtime with the time driver enabled.
///
/// Dropping the last clone shuts the runtime down in the background: a source
/// that never returns does not block the dropping thread.
#[derive(Clone, Debug)]
pub struct TokioRuntime {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    runtime: Option<tokio::runtime::Runtime>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl TokioRuntime {
    /// Builds a dedicated current-thread runtime.
    ///
    /// # Errors
    /// Returns the io error tokio reports when the runtime cannot be built.
    pub fn new() -> io::Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_time()
            .thread_name("tarry-blocking")
            .build()?;
        Ok(Self {
            shared: Arc::new(Shared {
                runtime: Some(runtime),
            }),
        })
    }

    fn runtime(&self) -> &tokio::runtime::Runtime {
        match &self.shared.runtime {
            Some(runtime) => runtime,
            None => unreachable!("runtime is only taken when the last handle drops"),
        }
    }

    /// Handle to the owned runtime
    #[must_use]
    pub fn handle(&self) -> &Handle {
        self.runtime().handle()
    }
}

impl Runtime for TokioRuntime {
    type Timer = TokioTimer;

    fn timer(&self) -> Self::Timer {
        TokioTimer {
            handle: self.handle().clone(),
        }
    }

    fn spawn_blocking<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        drop(self.runtime().spawn_blocking(task));
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime().block_on(future)
    }
}

/// Tokio sleeps bound to a specific runtime, so they can be created outside of
/// any runtime context.
#[derive(Clone, Debug)]
pub struct TokioTimer {
    handle: Handle,
}

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        let _entered = self.handle.enter();
        tokio::time::sleep(duration)
    }
}
