// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Buffered timed reads over any [`io::Read`].
//!
//! One background fill at a time reads from the source into a spare
//! allocation; when it lands, the bytes are appended to the region and the
//! allocation is kept for the next fill. Slice, byte and codepoint reads all
//! drain the same region, so they can be mixed freely on one reader.

mod region;

use core::fmt;
use core::future::Future;
use core::mem;
use core::pin::{pin, Pin};
use core::time::Duration;
use std::io::{self, Read};

use futures::future;
use tarry_core::{
    debug, trace, utf8, ByteSource, Result, RuneSource, SingleFlight, TimedByteRead, TimedRead,
    TimedRuneRead, Timeout,
};
use tarry_error::unexpected_eof;
use tarry_runtime::{runtime::Runtime, timer::Timer, DefaultRuntime};

use self::region::Region;
use crate::WithTimeout;

/// Capacity used by [`BufferedTimedReader::new`]
pub const DEFAULT_CAPACITY: usize = 4096;

/// Smallest capacity a reader is built with; smaller requests are raised to it
pub const MIN_CAPACITY: usize = 16;

/// The spare allocation travels with the fill and comes back with its result.
type Fill = (Vec<u8>, io::Result<usize>);

/// Outcome of a fill that did not fail.
#[derive(Clone, Copy, Debug)]
struct Landed {
    received: usize,
    offered: usize,
}

impl Landed {
    /// The fill took every byte it was offered, so more data may be ready.
    const fn took_all(self) -> bool {
        self.received == self.offered
    }
}

/// Timed slice, byte and codepoint reads over a blocking [`io::Read`].
///
/// A timed call returns buffered data immediately when there is any. Otherwise
/// it starts a background fill (unless one is already running) and waits for
/// it until the deadline. A deadline that fires first abandons only the wait:
/// the fill keeps running and its bytes are handed out by later calls.
///
/// Calling the plain [`io::Read`], [`ByteSource`] or [`RuneSource`] methods
/// collects an outstanding fill without a deadline.
///
/// # Source errors
///
/// `io::Read` cannot return data and an error together. An error observed
/// after this call already produced data is held back and returned by the
/// next call, once the buffered bytes are gone.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// use std::time::Duration;
/// use tarry_read::BufferedTimedReader;
///
/// let mut reader = BufferedTimedReader::new(Cursor::new("h€llo".as_bytes().to_vec()));
/// let timeout = Duration::from_secs(1);
///
/// assert_eq!(reader.read_byte_with_timeout(timeout).unwrap(), b'h');
/// assert_eq!(reader.read_rune_with_timeout(timeout).unwrap(), ('€', 3));
///
/// let mut rest = [0u8; 8];
/// let n = reader.read_with_timeout(&mut rest, timeout).unwrap();
/// assert_eq!(&rest[..n], b"llo");
/// ```
pub struct BufferedTimedReader<S, R = DefaultRuntime> {
    region: Region,
    spare: Vec<u8>,
    flight: SingleFlight<S, Fill, R>,
    pending_error: Option<io::Error>,
}

#[cfg(feature = "runtime-smol")]
impl<S: Read + Send + 'static> BufferedTimedReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(source: S, capacity: usize) -> Self {
        Self::with_capacity_and_runtime(source, capacity, DefaultRuntime::default())
    }
}

impl<S, R> BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    pub fn with_runtime(source: S, runtime: R) -> Self {
        Self::with_capacity_and_runtime(source, DEFAULT_CAPACITY, runtime)
    }

    pub fn with_capacity_and_runtime(source: S, capacity: usize, runtime: R) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            region: Region::with_capacity(capacity),
            spare: Vec::with_capacity(capacity),
            flight: SingleFlight::new(source, runtime),
            pending_error: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Bytes fetched from the source and not handed out yet
    pub fn buffered(&self) -> &[u8] {
        self.region.unconsumed()
    }

    /// True while a background fill has not been collected
    pub const fn is_reading(&self) -> bool {
        self.flight.is_in_flight()
    }

    /// Binds `timeout` so the reader can stand in for a plain reader.
    pub const fn with_timeout(self, timeout: Duration) -> WithTimeout<Self> {
        WithTimeout::new(self, timeout)
    }

    /// Fills as much of `dst` as becomes available before `timeout`.
    ///
    /// Buffered bytes are copied first without waiting. A fill that lands
    /// with the buffer at capacity suggests more data is ready, so another
    /// fill starts under the same deadline; a shorter fill ends the call.
    ///
    /// Returns `Ok(0)` at end of input.
    ///
    /// # Errors
    /// [`tarry_core::ReadError::Timeout`] when the deadline fires before any
    /// byte was copied, or the source error.
    pub fn read_with_timeout(&mut self, dst: &mut [u8], timeout: Duration) -> Result<usize> {
        let mut copied = self.region.copy_to(dst);
        if copied == dst.len() {
            return Ok(copied);
        }
        if let Some(err) = self.pending_error.take() {
            return self.deliver(copied, err);
        }

        self.launch_fill();
        let timer = self.flight.runtime().timer();
        let mut deadline = pin!(timer.sleep_future(timeout));
        loop {
            let Some(fill) = self.flight.wait_until(deadline.as_mut()) else {
                debug!("deadline elapsed after {timeout:?} with {copied} bytes copied");
                return if copied == 0 {
                    Err(Timeout.into())
                } else {
                    Ok(copied)
                };
            };
            let landed = match fill.and_then(|fill| self.land(fill)) {
                Ok(landed) => landed,
                Err(err) => return self.deliver(copied, err),
            };

            copied += self.region.copy_to(&mut dst[copied..]);
            if copied == dst.len() || !landed.took_all() {
                return Ok(copied);
            }
            self.launch_fill();
        }
    }

    /// Reads one byte, giving up the wait after `timeout`.
    ///
    /// # Errors
    /// [`tarry_core::ReadError::Timeout`], the source error, or
    /// [`io::ErrorKind::UnexpectedEof`] at end of input.
    pub fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<u8> {
        if let Some(byte) = self.region.pop() {
            return Ok(byte);
        }
        let timer = self.flight.runtime().timer();
        self.byte_until(pin!(timer.sleep_future(timeout)))
    }

    /// Reads one codepoint and its UTF-8 width, giving up the wait after
    /// `timeout`.
    ///
    /// An encoding split across fills is never decoded early: the call keeps
    /// waiting for the rest. Malformed input decodes as `U+FFFD` with width 1.
    ///
    /// # Errors
    /// [`tarry_core::ReadError::Timeout`], the source error, or
    /// [`io::ErrorKind::UnexpectedEof`] at end of input.
    pub fn read_rune_with_timeout(&mut self, timeout: Duration) -> Result<(char, usize)> {
        if let Some(rune) = self.take_rune() {
            return Ok(rune);
        }
        let timer = self.flight.runtime().timer();
        self.rune_until(pin!(timer.sleep_future(timeout)))
    }

    fn byte_until<D>(&mut self, mut deadline: Pin<&mut D>) -> Result<u8>
    where
        D: Future<Output = ()>,
    {
        loop {
            if let Some(byte) = self.region.pop() {
                return Ok(byte);
            }
            if let Some(err) = self.pending_error.take() {
                return Err(err.into());
            }

            self.launch_fill();
            let Some(fill) = self.flight.wait_until(deadline.as_mut()) else {
                debug!("deadline elapsed waiting for a byte");
                return Err(Timeout.into());
            };
            if self.land(fill?)?.received == 0 {
                return Err(unexpected_eof().into());
            }
        }
    }

    fn rune_until<D>(&mut self, mut deadline: Pin<&mut D>) -> Result<(char, usize)>
    where
        D: Future<Output = ()>,
    {
        loop {
            if let Some(rune) = self.take_rune() {
                return Ok(rune);
            }
            if let Some(err) = self.pending_error.take() {
                return self.finish_rune(Some(err));
            }

            self.launch_fill();
            let Some(fill) = self.flight.wait_until(deadline.as_mut()) else {
                debug!(
                    "deadline elapsed waiting for a codepoint, {} bytes buffered",
                    self.region.len()
                );
                return Err(Timeout.into());
            };
            match fill.and_then(|fill| self.land(fill)) {
                Ok(landed) if landed.received == 0 => return self.finish_rune(None),
                Ok(_) => {}
                Err(err) => return self.finish_rune(Some(err)),
            }
        }
    }

    fn take_rune(&mut self) -> Option<(char, usize)> {
        let (rune, width) = utf8::decode_rune(self.region.unconsumed())?;
        self.region.consume(width);
        Some((rune, width))
    }

    /// The source will produce nothing more for now: decode what is buffered
    /// best-effort and keep a source error for when the buffer runs dry.
    ///
    /// End of input (`err` is `None`) is not held: the next fill reports it
    /// again, as `Ok(0)` to slice reads and `UnexpectedEof` to unit reads.
    fn finish_rune(&mut self, err: Option<io::Error>) -> Result<(char, usize)> {
        let Some((rune, width)) = utf8::decode_rune_lossy(self.region.unconsumed()) else {
            return Err(err.unwrap_or_else(unexpected_eof).into());
        };
        self.region.consume(width);
        if let Some(err) = err {
            self.hold(err);
        }
        Ok((rune, width))
    }

    /// Starts a fill of the free tail of the region, unless one is running.
    ///
    /// Compaction only happens here, so the region a fill was sized for stays
    /// valid for the whole flight.
    fn launch_fill(&mut self) {
        if self.flight.is_in_flight() {
            return;
        }
        self.region.compact();
        let offered = self.region.spare();
        debug_assert!(offered > 0, "fill launched with a full buffer");

        let mut chunk = mem::take(&mut self.spare);
        chunk.resize(offered, 0);
        trace!("launching fill for {offered} bytes");
        self.flight.launch(move |source: &mut S| {
            let received = read_once(source, &mut chunk);
            (chunk, received)
        });
    }

    /// Appends a completed fill to the region and keeps its allocation.
    ///
    /// The region may have been drained while the fill was in flight, so the
    /// write cursor says nothing about whether the fill used all its room.
    fn land(&mut self, (chunk, received): Fill) -> io::Result<Landed> {
        let landed = received.map(|n| {
            let received = n.min(chunk.len());
            self.region.append(&chunk[..received]);
            Landed {
                received,
                offered: chunk.len(),
            }
        });
        trace!("fill landed: {landed:?}");
        self.spare = chunk;
        landed
    }

    fn deliver(&mut self, copied: usize, err: io::Error) -> Result<usize> {
        if copied == 0 {
            return Err(err.into());
        }
        self.hold(err);
        Ok(copied)
    }

    fn hold(&mut self, err: io::Error) {
        debug!("holding source error until buffered data drains: {err}");
        self.pending_error = Some(err);
    }

    /// Deadline-less slice read, collecting an outstanding fill first.
    fn drain(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let mut copied = self.region.copy_to(dst);
        if copied == dst.len() {
            return Ok(copied);
        }

        if !self.flight.is_in_flight() {
            if let Some(err) = self.pending_error.take() {
                return Ok(self.deliver(copied, err)?);
            }
            if copied > 0 {
                return Ok(copied);
            }
            return self.flight.direct(|source| read_once(source, dst));
        }

        let landed = match self.flight.wait().and_then(|fill| self.land(fill)) {
            Ok(landed) => landed,
            Err(err) => return Ok(self.deliver(copied, err)?),
        };
        copied += self.region.copy_to(&mut dst[copied..]);
        if landed.took_all() && copied < dst.len() {
            let rest = &mut dst[copied..];
            match self.flight.direct(|source| read_once(source, rest)) {
                Ok(n) => copied += n,
                Err(err) => return Ok(self.deliver(copied, err)?),
            }
        }
        Ok(copied)
    }
}

/// One `read` call against the source, retrying interruptions.
fn read_once<S: Read + ?Sized>(source: &mut S, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(chunk) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            received => return received,
        }
    }
}

impl<S, R> TimedRead for BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    fn read_with_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        Self::read_with_timeout(self, buf, timeout)
    }
}

impl<S, R> TimedByteRead for BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    fn read_byte_with_timeout(&mut self, timeout: Duration) -> Result<u8> {
        Self::read_byte_with_timeout(self, timeout)
    }
}

impl<S, R> TimedRuneRead for BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    fn read_rune_with_timeout(&mut self, timeout: Duration) -> Result<(char, usize)> {
        Self::read_rune_with_timeout(self, timeout)
    }
}

impl<S, R> Read for BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.drain(buf)
    }
}

impl<S, R> ByteSource for BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    fn read_byte(&mut self) -> io::Result<u8> {
        Ok(self.byte_until(pin!(future::pending::<()>()))?)
    }
}

impl<S, R> RuneSource for BufferedTimedReader<S, R>
where
    S: Read + Send + 'static,
    R: Runtime,
{
    fn read_rune(&mut self) -> io::Result<(char, usize)> {
        Ok(self.rune_until(pin!(future::pending::<()>()))?)
    }
}

impl<S, R: fmt::Debug> fmt::Debug for BufferedTimedReader<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedTimedReader")
            .field("capacity", &self.region.capacity())
            .field("buffered", &self.region.len())
            .field("pending_error", &self.pending_error)
            .field("flight", &self.flight)
            .finish()
    }
}
