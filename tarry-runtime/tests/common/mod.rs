// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Runs the same behavioural checks against any `Runtime` constructor.
#[macro_export]
macro_rules! runtime_suite {
    ($make:expr) => {
        use futures::channel::oneshot;
        use futures::future::{self, Either};
        use std::pin::pin;
        use std::time::{Duration, Instant};
        use tarry_runtime::runtime::Runtime;
        use tarry_runtime::timer::Timer;

        #[test]
        fn test_block_on_returns_output() -> anyhow::Result<()> {
            // Arrange
            let runtime = $make;

            // Act
            let value = runtime.block_on(async { 21 * 2 });

            // Assert
            assert_eq!(value, 42);
            Ok(())
        }

        #[test]
        fn test_sleep_future_fires_after_duration() -> anyhow::Result<()> {
            // Arrange
            let runtime = $make;
            let started = Instant::now();

            // Act
            runtime.block_on(runtime.timer().sleep_future(Duration::from_millis(20)));

            // Assert
            assert!(started.elapsed() >= Duration::from_millis(20));
            Ok(())
        }

        #[test]
        fn test_spawn_blocking_delivers_through_slot() -> anyhow::Result<()> {
            // Arrange
            let runtime = $make;
            let (tx, rx) = oneshot::channel();

            // Act
            runtime.spawn_blocking(move || {
                std::thread::sleep(Duration::from_millis(5));
                let _ = tx.send("done");
            });

            // Assert
            assert_eq!(runtime.block_on(rx)?, "done");
            Ok(())
        }

        #[test]
        fn test_losing_slot_survives_elapsed_deadline() -> anyhow::Result<()> {
            // Arrange
            let runtime = $make;
            let (tx, mut rx) = oneshot::channel::<u8>();
            let mut sleep = pin!(runtime.timer().sleep_future(Duration::from_millis(10)));

            // Act
            let first = runtime.block_on(future::select(&mut rx, sleep.as_mut()));
            let first_elapsed = matches!(first, Either::Right(_));
            tx.send(7).map_err(|_| anyhow::anyhow!("receiver dropped"))?;
            let second = runtime.block_on(&mut rx)?;

            // Assert
            assert!(first_elapsed);
            assert_eq!(second, 7);
            Ok(())
        }

        #[test]
        fn test_clones_share_executor() -> anyhow::Result<()> {
            // Arrange
            let runtime = $make;
            let clone = runtime.clone();
            let (tx, rx) = oneshot::channel();

            // Act
            clone.spawn_blocking(move || {
                let _ = tx.send(1_u32);
            });
            drop(clone);

            // Assert
            assert_eq!(runtime.block_on(rx)?, 1);
            Ok(())
        }
    };
}
