//! NATS connection setup
//!
//! All three transports share the same core connection. It is opened once,
//! named so it can be told apart in server monitoring, and reports its state
//! changes to the log.

use async_nats::{Client, ConnectOptions, Event};
use kna_domain::error::{Error, Result};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// How to reach the NATS server
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Server URL, e.g. `nats://localhost:4222`
    pub url: String,
    /// Connection name reported to the server
    pub client_name: String,
    /// Upper bound for establishing the connection
    pub connect_timeout: Duration,
}

/// Open a core NATS connection
///
/// Fails fast when the server is unreachable; the caller decides whether
/// that disables the adapter.
pub async fn connect(settings: &ConnectionSettings) -> Result<Client> {
    info!(url = %settings.url, name = %settings.client_name, "Connecting to NATS server");

    let client = ConnectOptions::new()
        .name(settings.client_name.as_str())
        .connection_timeout(settings.connect_timeout)
        .event_callback(|event| async move { log_connection_event(&event) })
        .connect(settings.url.as_str())
        .await
        .map_err(|e| {
            Error::connection_with_source(
                format!("Failed to connect to NATS server at {}", settings.url),
                e,
            )
        })?;

    info!(url = %settings.url, "Connected to NATS server");
    Ok(client)
}

fn log_connection_event(event: &Event) {
    match event {
        Event::Disconnected => warn!("NATS connection lost"),
        Event::Connected => info!("NATS connection (re)established"),
        other => debug!(event = %other, "NATS connection status"),
    }
}

/// Flush pending publishes and close the connection
///
/// Flush and drain each get `limit`; a server that went away while the
/// connection was open otherwise keeps both waiting for a reconnect.
pub async fn close_client(client: &Client, limit: Duration) -> Result<()> {
    timeout(limit, client.flush())
        .await
        .map_err(|_| Error::shutdown(format!("NATS flush did not complete within {limit:?}")))?
        .map_err(|e| Error::shutdown_with_source("could not flush NATS connection", e))?;
    timeout(limit, client.drain())
        .await
        .map_err(|_| Error::shutdown(format!("NATS drain did not complete within {limit:?}")))?
        .map_err(|e| Error::shutdown_with_source("could not close NATS connection", e))?;
    debug!("NATS connection closed");
    Ok(())
}
