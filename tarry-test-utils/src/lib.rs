// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the tarry timed readers.
//!
//! Timed reads are only testable when the test decides when data shows up.
//! The sources here block until the test feeds them, so a test can arrange
//! "nothing yet", then time out, then feed, then read, without relying on
//! sleeps racing each other.
//!
//! # Architecture
//!
//! - **Production**: readers own a blocking source and read it on a worker thread
//! - **Testing**: the source is the receiving end of an `async_channel`; the
//!   [`Feeder`] stays with the test
//!
//! Every chunk fed is returned by exactly one `read` call on the source (split
//! only when the caller's buffer is too small), so fill boundaries are the
//! chunk boundaries.
//!
//! # Example
//!
//! ```rust
//! use std::io::Read;
//! use tarry_test_utils::channel_reader;
//!
//! let (feeder, mut source) = channel_reader();
//! feeder.feed("hel").unwrap();
//! feeder.feed("lo").unwrap();
//! drop(feeder);
//!
//! let mut buf = [0u8; 8];
//! assert_eq!(source.read(&mut buf).unwrap(), 3);
//! assert_eq!(source.read(&mut buf).unwrap(), 2);
//! assert_eq!(source.read(&mut buf).unwrap(), 0);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod channel_source;

use tarry_core::{IoBytes, Utf8Runes};

pub use channel_source::{ChannelReader, Feeder};

/// Creates a scripted slice source and the feeder that drives it.
///
/// The source reports end of input once the feeder is dropped or closed.
#[must_use]
pub fn channel_reader() -> (Feeder, ChannelReader) {
    channel_source::pair()
}

/// Same as [`channel_reader`], as a one-byte-per-call source.
#[must_use]
pub fn channel_bytes() -> (Feeder, IoBytes<ChannelReader>) {
    let (feeder, reader) = channel_reader();
    (feeder, IoBytes::new(reader))
}

/// Same as [`channel_reader`], as a UTF-8 codepoint source.
#[must_use]
pub fn channel_runes() -> (Feeder, Utf8Runes<ChannelReader>) {
    let (feeder, reader) = channel_reader();
    (feeder, Utf8Runes::new(reader))
}
