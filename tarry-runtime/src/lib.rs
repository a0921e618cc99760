// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deadline and background-task abstraction for timed readers.
//!
//! A timed read needs three things from its environment: a deadline gate that
//! fires once after a duration ([`timer::Timer`]), somewhere to run a blocking
//! call without blocking the caller, and a way to block the caller until the
//! first of several events happens. [`runtime::Runtime`] bundles them.
//!
//! # Runtime Support
//!
//! - `runtime-smol` (default) - `SmolRuntime`, backed by the `blocking` pool and `async-io` timers
//! - `runtime-tokio` - `TokioRuntime`, an owned current-thread tokio runtime

#[cfg(not(any(feature = "runtime-smol", feature = "runtime-tokio")))]
compile_error!("enable at least one of the `runtime-smol` or `runtime-tokio` features");

pub mod impls;
pub mod runtime;
pub mod timer;

#[cfg(feature = "runtime-smol")]
pub use impls::smol::{SmolRuntime, SmolSleep, SmolTimer};

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{TokioRuntime, TokioTimer};

/// Runtime used by reader constructors that do not take one explicitly.
#[cfg(feature = "runtime-smol")]
pub type DefaultRuntime = SmolRuntime;

/// Runtime used by reader constructors that do not take one explicitly.
#[cfg(all(feature = "runtime-tokio", not(feature = "runtime-smol")))]
pub type DefaultRuntime = TokioRuntime;
