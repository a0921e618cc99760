// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timed readers over blocking sources.
//!
//! Every reader here runs at most one background read against its source.
//! A timed call waits for that read until a deadline; when the deadline wins,
//! the read keeps running and its result goes to the next call on the same
//! reader. Nothing that arrives late is lost.
//!
//! - **`TimedByteReader`** - one byte per call over a [`ByteSource`](tarry_core::ByteSource)
//! - **`TimedRuneReader`** - one codepoint per call over a [`RuneSource`](tarry_core::RuneSource)
//! - **`BufferedTimedReader`** - slice, byte and codepoint reads over any `io::Read`
//! - **`WithTimeout`** - binds a fixed timeout so a timed reader works where a
//!   plain `io::Read`, `ByteSource` or `RuneSource` is expected
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tarry_read::BufferedTimedReader;
//!
//! let mut stdin = BufferedTimedReader::new(std::io::stdin());
//! let mut line = [0u8; 128];
//! match stdin.read_with_timeout(&mut line, Duration::from_secs(5)) {
//!     Ok(n) => println!("read {n} bytes"),
//!     Err(e) if e.is_timeout() => println!("no input received"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! # One caller at a time
//!
//! Readers take `&mut self` for every call and carry no internal locking. To
//! share one across threads, move it or wrap it in a mutex.

mod buffered;
mod byte_reader;
mod rune_reader;
mod unit;
mod with_timeout;

pub use buffered::{BufferedTimedReader, DEFAULT_CAPACITY, MIN_CAPACITY};
pub use byte_reader::TimedByteReader;
pub use rune_reader::TimedRuneReader;
pub use with_timeout::WithTimeout;
