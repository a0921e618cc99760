// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-smol")]

use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use tarry::prelude::*;
use tarry::{is_timeout_error, Utf8Runes};
use tarry_test_utils::channel_reader;

const SHORT: Duration = Duration::from_millis(5);
const LONG: Duration = Duration::from_secs(5);

/// Reads a line of keystrokes, reporting idle periods instead of blocking.
fn read_line(reader: &mut impl TimedRuneRead, idle: &mut usize) -> tarry::Result<String> {
    let mut line = String::new();
    loop {
        match reader.read_rune_with_timeout(SHORT) {
            Ok(('\n', _)) => return Ok(line),
            Ok((rune, _)) => line.push(rune),
            Err(ReadError::Timeout(Timeout)) => {
                *idle += 1;
                if *idle > 1000 {
                    return Err(Timeout.into());
                }
            }
            Err(e) => return Err(e),
        }
    }
}

#[test]
fn test_interactive_line_survives_idle_periods() -> anyhow::Result<()> {
    // Arrange
    let (feeder, source) = channel_reader();
    let mut reader = BufferedTimedReader::new(source);
    feeder.feed("he")?;
    let handle = feeder.feed_after(Duration::from_millis(30), "llo\n");
    let mut idle = 0;

    // Act
    let line = read_line(&mut reader, &mut idle)?;

    // Assert
    assert_eq!(line, "hello");
    handle.join().map_err(|_| anyhow::anyhow!("feeder thread panicked"))?;
    Ok(())
}

#[test]
fn test_adapter_works_under_std_buffering() -> anyhow::Result<()> {
    // Arrange
    let (feeder, source) = channel_reader();
    let reader = BufferedTimedReader::new(source).with_timeout(LONG);
    let mut lines = BufReader::new(reader).lines();
    feeder.feed("first\nsec")?;
    feeder.feed("ond\n")?;
    feeder.close();

    // Act
    let first = lines.next().transpose()?;
    let second = lines.next().transpose()?;
    let end = lines.next().transpose()?;

    // Assert
    assert_eq!(first.as_deref(), Some("first"));
    assert_eq!(second.as_deref(), Some("second"));
    assert_eq!(end, None);
    Ok(())
}

#[test]
fn test_unit_reader_over_rune_shim() -> anyhow::Result<()> {
    // Arrange
    let (feeder, source) = channel_reader();
    let mut reader = TimedRuneReader::new(Utf8Runes::new(source)).with_timeout(SHORT);

    // Act
    let timed_out = reader.read_rune();
    feeder.feed("Ω")?;
    reader.set_timeout(LONG);
    let rune = reader.read_rune()?;

    // Assert
    assert!(matches!(timed_out, Err(ref e) if is_timeout_error(e)));
    assert_eq!(rune, ('Ω', 2));
    Ok(())
}

#[test]
fn test_timeout_crosses_io_boundary() {
    let err: io::Error = ReadError::from(Timeout).into();
    assert!(is_timeout_error(&err));
}
