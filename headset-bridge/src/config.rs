//! Configuration for headset-bridge.
//!
//! The bridge runs from fixed defaults: the headset's COM port, its baud rate
//! and the ESP32's address. Each value can be overridden from the environment
//! at startup; nothing is reloaded while the loop runs.

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Serial port the headset enumerates as.
pub const DEFAULT_SERIAL_PORT: &str = "COM9";

/// Baud rate of the headset link.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Address of the ESP32 receiving the payloads.
pub const DEFAULT_TARGET: &str = "192.168.137.75";

/// Environment variable overriding [`Config::serial_port`].
pub const ENV_SERIAL_PORT: &str = "BRIDGE_SERIAL_PORT";
/// Environment variable overriding [`Config::baud_rate`].
pub const ENV_BAUD_RATE: &str = "BRIDGE_BAUD_RATE";
/// Environment variable overriding [`Config::target`].
pub const ENV_TARGET: &str = "BRIDGE_TARGET";
/// Environment variable overriding [`Config::request_timeout`], in milliseconds.
pub const ENV_REQUEST_TIMEOUT_MS: &str = "BRIDGE_REQUEST_TIMEOUT_MS";
/// Environment variable overriding [`Config::poll_interval`], in milliseconds.
pub const ENV_POLL_INTERVAL_MS: &str = "BRIDGE_POLL_INTERVAL_MS";

/// Runtime configuration of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Serial port name (e.g. `COM9`, `/dev/ttyUSB0`)
    pub serial_port: String,

    /// Serial link speed
    pub baud_rate: u32,

    /// Upper bound on a single read of already-available bytes
    pub read_timeout: Duration,

    /// Host (and optional port) of the receiving device
    pub target: String,

    /// Path the payloads are posted to
    pub push_path: String,

    /// Name of the single form field carrying the hex payload
    pub form_field: String,

    /// Timeout of each POST
    pub request_timeout: Duration,

    /// Sleep between polls of the serial port
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_secs(1),
            target: DEFAULT_TARGET.to_string(),
            push_path: "/push".to_string(),
            form_field: "data".to_string(),
            request_timeout: Duration::from_millis(500),
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl Config {
    /// Build the configuration from defaults and `BRIDGE_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from defaults, overriding each value that
    /// `lookup` returns for its variable name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup(ENV_SERIAL_PORT) {
            config.serial_port = port;
        }
        if let Some(baud) = lookup(ENV_BAUD_RATE) {
            config.baud_rate = parse_number(ENV_BAUD_RATE, &baud)?;
        }
        if let Some(target) = lookup(ENV_TARGET) {
            config.target = target;
        }
        if let Some(ms) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            config.request_timeout =
                Duration::from_millis(parse_number(ENV_REQUEST_TIMEOUT_MS, &ms)?);
        }
        if let Some(ms) = lookup(ENV_POLL_INTERVAL_MS) {
            config.poll_interval =
                Duration::from_millis(parse_number(ENV_POLL_INTERVAL_MS, &ms)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// URL every payload is posted to.
    pub fn push_url(&self) -> String {
        format!("http://{}{}", self.target, self.push_path)
    }

    /// Base URL of the receiving device, as shown in the startup banner.
    pub fn target_url(&self) -> String {
        format!("http://{}", self.target)
    }

    fn validate(&self) -> Result<()> {
        if self.serial_port.is_empty() {
            return Err(Error::Config("serial port name is empty".to_string()));
        }
        if self.target.is_empty() {
            return Err(Error::Config("target address is empty".to_string()));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud rate must be non-zero".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::Config("request timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key}={value:?} is not a valid number")))
}
