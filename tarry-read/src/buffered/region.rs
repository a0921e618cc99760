// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-capacity byte region with read and write cursors.
//!
//! `buf[read..write]` holds the unconsumed bytes. Free space is only ever at
//! the tail; [`Region::compact`] moves the unconsumed bytes to the front.

pub(super) struct Region {
    buf: Box<[u8]>,
    read: usize,
    write: usize,
}

impl Region {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity].into_boxed_slice(),
            read: 0,
            write: 0,
        }
    }

    pub(super) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(super) fn unconsumed(&self) -> &[u8] {
        &self.buf[self.read..self.write]
    }

    pub(super) const fn len(&self) -> usize {
        self.write - self.read
    }

    /// Room after the write cursor
    pub(super) fn spare(&self) -> usize {
        self.buf.len() - self.write
    }

    /// Copies as many unconsumed bytes as fit into `dst` and consumes them.
    pub(super) fn copy_to(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len());
        dst[..n].copy_from_slice(&self.buf[self.read..self.read + n]);
        self.consume(n);
        n
    }

    pub(super) fn pop(&mut self) -> Option<u8> {
        let byte = *self.unconsumed().first()?;
        self.consume(1);
        Some(byte)
    }

    pub(super) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.len());
        self.read += n;
        if self.read == self.write {
            self.read = 0;
            self.write = 0;
        }
    }

    pub(super) fn compact(&mut self) {
        if self.read > 0 {
            self.buf.copy_within(self.read..self.write, 0);
            self.write -= self.read;
            self.read = 0;
        }
    }

    /// Appends at the write cursor; `bytes` must fit in [`Region::spare`].
    pub(super) fn append(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= self.spare());
        self.buf[self.write..self.write + bytes.len()].copy_from_slice(bytes);
        self.write += bytes.len();
    }
}
