//! Console status output.
//!
//! Two kinds of lines reach the operator: the startup banner, and a
//! per-iteration status. A successful send ends in a carriage return so the
//! next status overwrites it; errors end in a newline and stay on screen.

use std::fmt::Display;
use std::io::{self, Write};

/// Writer of human-readable status lines.
pub struct StatusLine<W: Write> {
    out: W,
}

impl StatusLine<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Announce the port being opened.
    pub fn connecting(&mut self, port: &str) -> io::Result<()> {
        writeln!(self.out, "Connecting to {port}...")?;
        self.out.flush()
    }

    /// Announce the bridge once the port is open.
    pub fn bridging(&mut self, port: &str, target_url: &str) -> io::Result<()> {
        writeln!(self.out, "Real bridge: {port} -> {target_url}")?;
        self.out.flush()
    }

    /// Report `count` raw bytes sent, overwriting the previous status.
    pub fn sent(&mut self, count: usize) -> io::Result<()> {
        write!(self.out, "Sent {count} bytes\r")?;
        self.out.flush()
    }

    /// Report a failed send.
    pub fn error(&mut self, err: &dyn Display) -> io::Result<()> {
        writeln!(self.out, "Error: {err}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(status: StatusLine<Vec<u8>>) -> String {
        String::from_utf8(status.into_inner()).unwrap()
    }

    #[test]
    fn test_banner() {
        let mut status = StatusLine::new(Vec::new());
        status.connecting("COM9").unwrap();
        status.bridging("COM9", "http://192.168.137.75").unwrap();
        assert_eq!(
            output(status),
            "Connecting to COM9...\nReal bridge: COM9 -> http://192.168.137.75\n"
        );
    }

    #[test]
    fn test_sent_overwrites_in_place() {
        let mut status = StatusLine::new(Vec::new());
        status.sent(2).unwrap();
        status.sent(17).unwrap();
        assert_eq!(output(status), "Sent 2 bytes\rSent 17 bytes\r");
    }

    #[test]
    fn test_error_line() {
        let mut status = StatusLine::new(Vec::new());
        status.error(&"operation timed out").unwrap();
        assert_eq!(output(status), "Error: operation timed out\n");
    }
}
