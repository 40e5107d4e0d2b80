use anyhow::Context;

use headset_bridge::config::Config;
use headset_bridge::forwarder::Forwarder;
use headset_bridge::serial;
use headset_bridge::sink::HttpSink;
use headset_bridge::status::StatusLine;
use headset_bridge::tracing::{self, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing::init_journald_or_stderr();

    let config = Config::from_env().context("invalid configuration")?;
    let mut status = StatusLine::stdout();

    status.connecting(&config.serial_port)?;
    let source = serial::open(&config).with_context(|| {
        format!(
            "failed to open serial port {} at {} baud",
            config.serial_port, config.baud_rate
        )
    })?;
    status.bridging(&config.serial_port, &config.target_url())?;

    let sink = HttpSink::new(&config).context("failed to build HTTP client")?;
    info!(url = sink.url(), "Started.");

    let mut forwarder = Forwarder::new(source, sink, status, config.poll_interval);
    if let Err(e) = forwarder.run().await {
        error!(error = %e, "Forwarder stopped.");
        return Err(e.into());
    }

    Ok(())
}
