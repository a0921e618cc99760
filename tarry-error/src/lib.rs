// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the tarry timed-read library
//!
//! Two things can go wrong with a timed read: the deadline elapses before the
//! requested data is available, or the underlying source reports an error.
//! [`ReadError`] keeps the two apart so a caller never mistakes a slow source
//! for a broken one.
//!
//! # Examples
//!
//! ```
//! use tarry_error::{ReadError, Result, Timeout};
//!
//! fn poll_once(ready: bool) -> Result<u8> {
//!     if ready {
//!         Ok(b'x')
//!     } else {
//!         Err(Timeout.into())
//!     }
//! }
//!
//! assert!(poll_once(false).unwrap_err().is_timeout());
//! ```

use std::io;

/// Marker reported when a deadline elapsed before the requested unit(s)
/// became available.
///
/// Carries no payload. The read that timed out is still running in the
/// background and its result is delivered by a later call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, thiserror::Error)]
#[error("operation timed out")]
pub struct Timeout;

/// Root error type for all timed reads
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The deadline fired first
    #[error(transparent)]
    Timeout(#[from] Timeout),

    /// The underlying source failed
    ///
    /// Passed through verbatim, including end of input reported as
    /// [`io::ErrorKind::UnexpectedEof`] by unit reads.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ReadError {
    /// Check if this error is the timeout marker
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if the source ran out of input
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Kind of the underlying io error, `TimedOut` for the marker
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Timeout(_) => io::ErrorKind::TimedOut,
            Self::Io(e) => e.kind(),
        }
    }

    /// Convert into an `io::Error` for use behind plain `io` traits
    #[must_use]
    pub fn into_io(self) -> io::Error {
        self.into()
    }
}

impl From<ReadError> for io::Error {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::Timeout(marker) => io::Error::new(io::ErrorKind::TimedOut, marker),
            ReadError::Io(e) => e,
        }
    }
}

/// Recognise a [`Timeout`] that crossed a plain `io::Error` boundary.
///
/// A source can report `ErrorKind::TimedOut` on its own; only errors that wrap
/// the marker count.
#[must_use]
pub fn is_timeout_error(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::TimedOut
        && error.get_ref().is_some_and(|inner| inner.is::<Timeout>())
}

/// The error a unit read reports when the source has no more input
#[must_use]
pub fn unexpected_eof() -> io::Error {
    io::Error::from(io::ErrorKind::UnexpectedEof)
}

/// Specialized Result type for timed reads
pub type Result<T> = std::result::Result<T, ReadError>;
