//! SerialSource over a pseudo-terminal pair.

#![cfg(all(unix, not(feature = "skip-pty-tests")))]

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time;
use tokio_serial::SerialStream;

use headset_bridge::serial::{ByteSource, SerialSource};

/// Poll until `expect` bytes are buffered, as the forwarder would.
async fn wait_for(source: &mut SerialSource, expect: usize) -> usize {
    let deadline = time::Instant::now() + Duration::from_secs(2);
    loop {
        let available = source.bytes_available().await.unwrap();
        if available >= expect || time::Instant::now() > deadline {
            return available;
        }
        time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_reads_what_is_available() {
    let (master, mut slave) = SerialStream::pair().expect("failed to create pty pair");
    let mut source = SerialSource::new(master, Duration::from_secs(1));

    assert_eq!(source.bytes_available().await.unwrap(), 0);

    slave.write_all(b"ABC").await.unwrap();
    slave.flush().await.unwrap();

    let available = wait_for(&mut source, 3).await;
    assert_eq!(available, 3);
    assert_eq!(source.read_available(available).await.unwrap(), b"ABC");
    assert_eq!(source.bytes_available().await.unwrap(), 0);
}

#[tokio::test]
async fn test_short_read_returns_what_arrived() {
    let (master, mut slave) = SerialStream::pair().expect("failed to create pty pair");
    let mut source = SerialSource::new(master, Duration::from_millis(100));

    slave.write_all(b"AB").await.unwrap();
    slave.flush().await.unwrap();
    assert_eq!(wait_for(&mut source, 2).await, 2);

    // Asking for more than arrived yields the partial buffer, not an error.
    assert_eq!(source.read_available(3).await.unwrap(), b"AB");
}

#[tokio::test]
async fn test_read_with_nothing_buffered_is_empty() {
    let (master, _slave) = SerialStream::pair().expect("failed to create pty pair");
    let mut source = SerialSource::new(master, Duration::from_millis(50));

    assert!(source.read_available(1).await.unwrap().is_empty());
}
