//! Serial input from the headset.
//!
//! The forwarder only needs two things from the port: how many bytes are
//! waiting, and those bytes. [`ByteSource`] captures exactly that so the loop
//! can be driven by a fake in tests; [`SerialSource`] is the real port.

use crate::config::Config;
use crate::error::Result;
use crate::tracing::prelude::*;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::time;
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

/// A byte stream that can report how much input is buffered.
#[async_trait]
pub trait ByteSource: Send {
    /// Number of bytes that can be read right now without blocking.
    async fn bytes_available(&mut self) -> Result<usize>;

    /// Read up to `count` bytes, which a preceding `bytes_available()`
    /// reported as buffered. May return fewer if the input stops short.
    async fn read_available(&mut self, count: usize) -> Result<Vec<u8>>;
}

/// Open the configured serial port.
///
/// Failure here is fatal to the bridge; there is no retry.
pub fn open(config: &Config) -> Result<SerialSource> {
    info!(
        port = %config.serial_port,
        baud = config.baud_rate,
        "Opening serial port."
    );
    let stream = tokio_serial::new(&config.serial_port, config.baud_rate)
        .timeout(config.read_timeout)
        .open_native_async()?;
    Ok(SerialSource::new(stream, config.read_timeout))
}

/// The headset's serial port, exclusively owned for the life of the process.
pub struct SerialSource {
    stream: SerialStream,
    read_timeout: Duration,
}

impl SerialSource {
    pub fn new(stream: SerialStream, read_timeout: Duration) -> Self {
        Self {
            stream,
            read_timeout,
        }
    }
}

#[async_trait]
impl ByteSource for SerialSource {
    async fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.stream.bytes_to_read()? as usize)
    }

    async fn read_available(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; count];
        let mut filled = 0;
        let deadline = time::Instant::now() + self.read_timeout;

        // Whatever arrived before the deadline is the buffer.
        while filled < count {
            match time::timeout_at(deadline, self.stream.read(&mut buf[filled..])).await {
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => filled += n,
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    debug!(wanted = count, got = filled, "Serial read timed out short.");
                    break;
                }
            }
        }

        buf.truncate(filled);
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_open_missing_port_fails() {
        let config = Config {
            serial_port: "/dev/no-such-tty".into(),
            ..Default::default()
        };

        let result = open(&config);
        assert!(matches!(result, Err(Error::Serial(_))));
    }
}
