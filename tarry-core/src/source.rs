// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Blocking unit sources.
//!
//! Slice sources are plain [`std::io::Read`]. The traits here cover sources
//! that hand out one byte or one codepoint per call. Every call may block
//! indefinitely and cannot be abandoned.

use std::io::{self, Read};

use tarry_error::unexpected_eof;

use crate::utf8;

/// A source that yields one byte per call.
///
/// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<u8>;
}

/// A source that yields one codepoint and its UTF-8 width per call.
///
/// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
pub trait RuneSource {
    fn read_rune(&mut self) -> io::Result<(char, usize)>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }
}

impl<T: RuneSource + ?Sized> RuneSource for &mut T {
    fn read_rune(&mut self) -> io::Result<(char, usize)> {
        (**self).read_rune()
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }
}

impl<T: RuneSource + ?Sized> RuneSource for Box<T> {
    fn read_rune(&mut self) -> io::Result<(char, usize)> {
        (**self).read_rune()
    }
}

fn read_one<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut byte = [0u8];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

/// Byte source over any reader, one `read` call per byte.
///
/// Wrap the reader in a `BufReader` first if each call is expensive.
#[derive(Debug)]
pub struct IoBytes<R> {
    inner: R,
}

impl<R: Read> IoBytes<R> {
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoBytes<R> {
    fn read_byte(&mut self) -> io::Result<u8> {
        read_one(&mut self.inner)?.ok_or_else(unexpected_eof)
    }
}

/// Codepoint source decoding UTF-8 from any reader.
///
/// Malformed input decodes as `U+FFFD` with width 1. Bytes read past a
/// malformed lead are kept for the next call.
#[derive(Debug)]
pub struct Utf8Runes<R> {
    inner: R,
    pending: [u8; 4],
    len: usize,
}

impl<R: Read> Utf8Runes<R> {
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            pending: [0; 4],
            len: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn take(&mut self, (rune, width): (char, usize)) -> (char, usize) {
        self.pending.copy_within(width..self.len, 0);
        self.len -= width;
        (rune, width)
    }
}

impl<R: Read> RuneSource for Utf8Runes<R> {
    fn read_rune(&mut self) -> io::Result<(char, usize)> {
        loop {
            if let Some(rune) = utf8::decode_rune(&self.pending[..self.len]) {
                return Ok(self.take(rune));
            }
            match read_one(&mut self.inner)? {
                Some(byte) => {
                    self.pending[self.len] = byte;
                    self.len += 1;
                }
                None if self.len == 0 => return Err(unexpected_eof()),
                None => return Ok(self.take(utf8::REPLACEMENT)),
            }
        }
    }
}
