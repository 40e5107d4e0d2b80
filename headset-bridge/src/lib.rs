//! Bridge a serial headset to an ESP32 over HTTP.
//!
//! Bytes read from the headset's serial port are rendered as space-separated
//! lowercase hex and posted, one request per poll that found input, to the
//! ESP32's `/push` endpoint.

pub mod config;
pub mod error;
pub mod forwarder;
pub mod payload;
pub mod serial;
pub mod sink;
pub mod status;
pub mod tracing;
