//! The forwarding loop.
//!
//! Each iteration polls the serial source, and if bytes are waiting, reads
//! them all, encodes them as a [`HexPayload`] and pushes it to the sink. A
//! failed push is reported and forgotten. The loop then sleeps for the poll
//! interval and starts over. It never returns on its own except when the
//! serial source itself fails.
//!
//! While a push is in flight nothing polls the port; input piles up in the
//! driver's buffer and goes out in one larger payload on the next iteration.

use crate::error::Result;
use crate::payload::HexPayload;
use crate::serial::ByteSource;
use crate::sink::PayloadSink;
use crate::status::StatusLine;
use crate::tracing::prelude::*;
use std::io::Write;
use std::time::Duration;
use tokio::time;

/// Reads above this size are logged as suspicious. They are still sent whole.
pub const LARGE_READ_WARN_BYTES: usize = 64 * 1024;

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing was waiting on the port; no request was made.
    Idle,
    /// A payload of this many raw bytes was delivered.
    Sent(usize),
    /// A payload of this many raw bytes was read but the push failed; it is
    /// lost.
    Dropped(usize),
}

/// Moves bytes from a [`ByteSource`] to a [`PayloadSink`].
pub struct Forwarder<S, K, W: Write> {
    source: S,
    sink: K,
    status: StatusLine<W>,
    poll_interval: Duration,
}

impl<S, K, W> Forwarder<S, K, W>
where
    S: ByteSource,
    K: PayloadSink,
    W: Write,
{
    pub fn new(source: S, sink: K, status: StatusLine<W>, poll_interval: Duration) -> Self {
        Self {
            source,
            sink,
            status,
            poll_interval,
        }
    }

    /// Run forever.
    ///
    /// Only a serial read failure or a broken status output ends the loop.
    /// Send failures never do.
    pub async fn run(&mut self) -> Result<()> {
        trace!("Forwarder started.");
        loop {
            self.step().await?;
            time::sleep(self.poll_interval).await;
        }
    }

    /// One poll/read/encode/push iteration, without the trailing sleep.
    pub async fn step(&mut self) -> Result<Step> {
        let available = self.source.bytes_available().await?;
        if available == 0 {
            return Ok(Step::Idle);
        }

        if available > LARGE_READ_WARN_BYTES {
            warn!(
                bytes = available,
                "Large serial backlog; sending it as a single request."
            );
        }

        let buffer = self.source.read_available(available).await?;
        let payload = HexPayload::encode(&buffer);

        match self.sink.push(&payload).await {
            Ok(()) => {
                trace!(bytes = payload.byte_count(), "Forwarded payload.");
                self.status.sent(payload.byte_count())?;
                Ok(Step::Sent(payload.byte_count()))
            }
            Err(e) => {
                warn!(bytes = payload.byte_count(), error = %e, "Dropped payload.");
                self.status.error(&e)?;
                Ok(Step::Dropped(payload.byte_count()))
            }
        }
    }

    pub fn status(&self) -> &StatusLine<W> {
        &self.status
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}
