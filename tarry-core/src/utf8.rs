// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! UTF-8 helpers for codepoint reads over a byte buffer.

/// Decoded value for malformed input, consuming one byte.
pub const REPLACEMENT: (char, usize) = (char::REPLACEMENT_CHARACTER, 1);

/// Longest UTF-8 encoding of a single codepoint
pub const MAX_WIDTH: usize = 4;

/// Decodes the codepoint at the start of `bytes`.
///
/// Returns `None` while `bytes` holds only the beginning of a valid multi-byte
/// encoding (or nothing at all): more input could still complete it. A prefix
/// that can never become valid decodes as [`REPLACEMENT`].
#[must_use]
pub fn decode_rune(bytes: &[u8]) -> Option<(char, usize)> {
    let window = &bytes[..bytes.len().min(MAX_WIDTH)];
    let text = match std::str::from_utf8(window) {
        Ok(text) => text,
        Err(e) if e.valid_up_to() > 0 => std::str::from_utf8(&window[..e.valid_up_to()]).ok()?,
        Err(e) => return e.error_len().map(|_| REPLACEMENT),
    };
    text.chars().next().map(|rune| (rune, rune.len_utf8()))
}

/// True when [`decode_rune`] can decide without more input.
#[must_use]
pub fn is_full_rune(bytes: &[u8]) -> bool {
    decode_rune(bytes).is_some()
}

/// Decodes whatever `bytes` starts with, treating an incomplete tail as
/// malformed. Used once the source can produce nothing more.
#[must_use]
pub fn decode_rune_lossy(bytes: &[u8]) -> Option<(char, usize)> {
    if bytes.is_empty() {
        return None;
    }
    Some(decode_rune(bytes).unwrap_or(REPLACEMENT))
}
