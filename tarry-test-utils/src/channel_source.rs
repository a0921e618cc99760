// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use async_channel::{Receiver, Sender};

type Chunk = io::Result<Vec<u8>>;

pub(crate) fn pair() -> (Feeder, ChannelReader) {
    let (tx, rx) = async_channel::unbounded();
    let reads = Arc::new(AtomicUsize::new(0));
    (
        Feeder {
            tx,
            reads: Arc::clone(&reads),
        },
        ChannelReader {
            rx,
            leftover: Vec::new(),
            reads,
        },
    )
}

/// Test side of a scripted source: every chunk fed becomes one read result.
#[derive(Debug, Clone)]
pub struct Feeder {
    tx: Sender<Chunk>,
    reads: Arc<AtomicUsize>,
}

impl Feeder {
    /// Queues `bytes` as the result of one read.
    ///
    /// # Errors
    ///
    /// Returns `BrokenPipe` if the source has been dropped.
    pub fn feed(&self, bytes: impl AsRef<[u8]>) -> io::Result<()> {
        self.send(Ok(bytes.as_ref().to_vec()))
    }

    /// Queues `error` as the result of one read.
    ///
    /// # Errors
    ///
    /// Returns `BrokenPipe` if the source has been dropped.
    pub fn feed_error(&self, error: io::Error) -> io::Result<()> {
        self.send(Err(error))
    }

    /// Feeds `bytes` from a helper thread once `delay` has passed.
    pub fn feed_after(&self, delay: Duration, bytes: impl AsRef<[u8]>) -> JoinHandle<()> {
        let feeder = self.clone();
        let bytes = bytes.as_ref().to_vec();
        thread::spawn(move || {
            thread::sleep(delay);
            // The source may be gone by then
            let _ = feeder.feed(bytes);
        })
    }

    /// Read calls the source has started so far, including ones still blocked.
    #[must_use]
    pub fn reads_started(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Ends the input: once queued chunks are consumed, reads return `Ok(0)`.
    pub fn close(&self) {
        self.tx.close();
    }

    fn send(&self, chunk: Chunk) -> io::Result<()> {
        self.tx
            .try_send(chunk)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "scripted source is gone"))
    }
}

/// Blocking source fed by a [`Feeder`].
#[derive(Debug)]
pub struct ChannelReader {
    rx: Receiver<Chunk>,
    leftover: Vec<u8>,
    reads: Arc<AtomicUsize>,
}

impl ChannelReader {
    fn serve(&mut self, buf: &mut [u8], mut chunk: Vec<u8>) -> usize {
        let n = buf.len().min(chunk.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        self.leftover = chunk;
        n
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.leftover.is_empty() {
            let chunk = std::mem::take(&mut self.leftover);
            return Ok(self.serve(buf, chunk));
        }
        match self.rx.recv_blocking() {
            Ok(Ok(chunk)) => Ok(self.serve(buf, chunk)),
            Ok(Err(error)) => Err(error),
            // Closed and drained
            Err(_) => Ok(0),
        }
    }
}
