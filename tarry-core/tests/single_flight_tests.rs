// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![cfg(feature = "runtime-smol")]

use std::pin::pin;
use std::sync::mpsc;
use std::time::Duration;

use tarry_core::SingleFlight;
use tarry_runtime::runtime::Runtime;
use tarry_runtime::timer::Timer;
use tarry_runtime::DefaultRuntime;

/// A source whose every call blocks until the test hands it a value.
struct Gate {
    rx: mpsc::Receiver<u32>,
    calls: u32,
}

impl Gate {
    fn next(&mut self) -> Option<u32> {
        self.calls += 1;
        self.rx.recv().ok()
    }
}

fn gated() -> (mpsc::Sender<u32>, SingleFlight<Gate, Option<u32>, DefaultRuntime>) {
    let (tx, rx) = mpsc::channel();
    let flight = SingleFlight::new(Gate { rx, calls: 0 }, DefaultRuntime::default());
    (tx, flight)
}

#[test]
fn test_launch_refuses_second_read() {
    // Arrange
    let (_tx, mut flight) = gated();

    // Act
    let first = flight.launch(Gate::next);
    let second = flight.launch(Gate::next);

    // Assert
    assert!(first);
    assert!(!second);
    assert!(flight.is_in_flight());
}

#[test]
fn test_deadline_keeps_read_in_flight() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut flight) = gated();
    flight.launch(Gate::next);
    let deadline = pin!(flight.runtime().timer().sleep_future(Duration::from_millis(10)));

    // Act
    let raced = flight.wait_until(deadline);

    // Assert
    assert!(raced.is_none());
    assert!(flight.is_in_flight());

    tx.send(5)?;
    assert_eq!(flight.wait()?, Some(5));
    assert!(!flight.is_in_flight());
    Ok(())
}

#[test]
fn test_completion_wins_before_deadline() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut flight) = gated();
    tx.send(9)?;
    flight.launch(Gate::next);
    let deadline = pin!(flight.runtime().timer().sleep_future(Duration::from_secs(5)));

    // Act
    let raced = flight.wait_until(deadline);

    // Assert
    assert_eq!(raced.transpose()?, Some(Some(9)));
    assert!(!flight.is_in_flight());
    Ok(())
}

#[test]
fn test_one_deadline_spans_several_waits() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut flight) = gated();
    tx.send(1)?;
    let mut deadline = pin!(flight.runtime().timer().sleep_future(Duration::from_millis(50)));

    // Act
    flight.launch(Gate::next);
    let first = flight.wait_until(deadline.as_mut());
    flight.launch(Gate::next);
    let second = flight.wait_until(deadline.as_mut());

    // Assert
    assert_eq!(first.transpose()?, Some(Some(1)));
    assert!(second.is_none());
    Ok(())
}

#[test]
fn test_result_is_collected_exactly_once() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut flight) = gated();
    flight.launch(Gate::next);
    tx.send(3)?;

    // Act
    let collected = flight.wait()?;
    let again = flight.wait();

    // Assert
    assert_eq!(collected, Some(3));
    assert!(again.is_err());
    assert_eq!(flight.direct(|gate| gate.calls), 1);
    Ok(())
}

#[test]
fn test_direct_runs_on_caller_thread() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut flight) = gated();
    tx.send(11)?;
    let caller = std::thread::current().id();

    // Act
    let (value, thread) = flight.direct(|gate| (gate.next(), std::thread::current().id()));

    // Assert
    assert_eq!(value, Some(11));
    assert_eq!(thread, caller);
    Ok(())
}

#[test]
fn test_panicking_read_reports_error_and_keeps_source() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut flight) = gated();
    flight.launch(|_: &mut Gate| -> Option<u32> { panic!("source exploded") });

    // Act
    let outcome = flight.wait();

    // Assert
    assert!(outcome.is_err());
    tx.send(4)?;
    assert_eq!(flight.direct(Gate::next), Some(4));
    Ok(())
}
