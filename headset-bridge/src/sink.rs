//! Outbound delivery of hex payloads.
//!
//! Delivery is fire-and-forget: a payload is posted once, the response is
//! dropped unread, and any failure is handed back to the caller to log.

use crate::config::Config;
use crate::error::Result;
use crate::payload::HexPayload;
use crate::tracing::prelude::*;
use async_trait::async_trait;

/// Destination for encoded payloads.
#[async_trait]
pub trait PayloadSink: Send {
    /// Deliver one payload. No retry on failure.
    async fn push(&mut self, payload: &HexPayload) -> Result<()>;
}

/// Posts payloads as a one-field form to the receiving device.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
    field: String,
}

impl HttpSink {
    /// Build a sink for the configured URL with the configured request
    /// timeout.
    pub fn new(config: &Config) -> Result<Self> {
        // The receiver sits on the local link; never route it through a proxy.
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .no_proxy()
            .build()?;
        Ok(Self {
            client,
            url: config.push_url(),
            field: config.form_field.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PayloadSink for HttpSink {
    async fn push(&mut self, payload: &HexPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .form(&[(self.field.as_str(), payload.as_str())])
            .send()
            .await?;

        // The status is not checked; an error response still counts as sent.
        trace!(status = %response.status(), "Push acknowledged.");
        Ok(())
    }
}
