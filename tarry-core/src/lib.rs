// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core traits and primitives shared by the tarry timed readers.
//!
//! - [`source`] - blocking unit sources (`ByteSource`, `RuneSource`) and shims over `io::Read`
//! - [`timed`] - the per-call deadline capabilities (`TimedRead`, `TimedByteRead`, `TimedRuneRead`)
//! - [`single_flight`] - at most one outstanding background read per source
//! - [`utf8`] - completeness checks and decoding for codepoint reads

pub mod logging;
pub mod single_flight;
pub mod source;
pub mod timed;
pub mod utf8;

pub use self::single_flight::SingleFlight;
pub use self::source::{ByteSource, IoBytes, RuneSource, Utf8Runes};
pub use self::timed::{TimedByteRead, TimedRead, TimedRuneRead};
pub use tarry_error::{ReadError, Result, Timeout};
