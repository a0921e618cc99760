// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Tarry
//!
//! Timed reads over blocking sources, where a timeout abandons the wait and
//! never the data.
//!
//! ## Overview
//!
//! A blocking source (a pipe, a serial port, stdin) offers no way to give up
//! on a read once it started. Tarry runs that read on a worker thread and lets
//! the caller wait for it with a deadline. When the deadline wins, the read
//! keeps going; whatever it produces is returned by the next call on the same
//! reader, timed or not.
//!
//! ## Design Philosophy
//!
//! - **One outstanding read per reader**: a timed-out read is collected, never
//!   duplicated
//! - **Timeouts are not errors of the source**: [`ReadError`] keeps
//!   [`Timeout`] apart from whatever the source reported
//! - **Drop-in plain readers**: [`WithTimeout`] binds a timeout so a timed
//!   reader works wherever `io::Read`, [`ByteSource`] or [`RuneSource`] is
//!   expected
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tarry::prelude::*;
//!
//! let mut input = BufferedTimedReader::new(std::io::stdin());
//! loop {
//!     match input.read_rune_with_timeout(Duration::from_millis(250)) {
//!         Ok((rune, _)) => println!("typed {rune:?}"),
//!         Err(e) if e.is_timeout() => println!("still waiting"),
//!         Err(e) => break eprintln!("{e}"),
//!     }
//! }
//! ```

// Re-export error types
pub use tarry_error::{is_timeout_error, ReadError, Result, Timeout};

// Re-export source and capability traits
pub use tarry_core::{
    ByteSource, IoBytes, RuneSource, TimedByteRead, TimedRead, TimedRuneRead, Utf8Runes,
};

// Re-export the readers
pub use tarry_read::{
    BufferedTimedReader, TimedByteReader, TimedRuneReader, WithTimeout, DEFAULT_CAPACITY,
    MIN_CAPACITY,
};

// Re-export runtimes
pub use tarry_runtime::runtime::Runtime;
pub use tarry_runtime::timer::Timer;
pub use tarry_runtime::DefaultRuntime;
#[cfg(feature = "runtime-smol")]
pub use tarry_runtime::SmolRuntime;
#[cfg(feature = "runtime-tokio")]
pub use tarry_runtime::TokioRuntime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BufferedTimedReader, ByteSource, ReadError, RuneSource, TimedByteRead, TimedByteReader,
        TimedRead, TimedRuneRead, TimedRuneReader, Timeout, WithTimeout,
    };
}
