//! Core NATS Transport
//!
//! Fire-and-forget publish on a plain NATS connection. Only subscribers
//! online at publish time see the event.
//!
//! While the connection is down the client buffers publishes until its
//! outbound queue is full. Every send is therefore bounded so a dead server
//! cannot stall the host thread that raised the event.

use crate::connection::close_client;
use async_nats::Client;
use async_trait::async_trait;
use bytes::Bytes;
use kna_application::ports::infrastructure::{Delivery, EventTransport};
use kna_domain::error::{Error, Result};
use kna_domain::value_objects::SubjectKey;
use std::time::Duration;
use tokio::time::timeout;

/// Publishes on a core NATS connection
#[derive(Debug, Clone)]
pub struct NatsCoreTransport {
    client: Client,
    publish_timeout: Duration,
}

impl NatsCoreTransport {
    /// Wrap an established connection
    ///
    /// `publish_timeout` bounds each send and the final flush on close.
    pub fn new(client: Client, publish_timeout: Duration) -> Self {
        Self {
            client,
            publish_timeout,
        }
    }

    /// Underlying connection
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl EventTransport for NatsCoreTransport {
    fn name(&self) -> &'static str {
        "core"
    }

    async fn send(&self, subject: &SubjectKey, payload: &[u8]) -> Result<Delivery> {
        let publish = self
            .client
            .publish(subject.to_string(), Bytes::copy_from_slice(payload));
        timeout(self.publish_timeout, publish)
            .await
            .map_err(|_| {
                Error::publish(
                    subject.as_str(),
                    format!("publish not accepted within {:?}", self.publish_timeout),
                )
            })?
            .map_err(|e| Error::publish_with_source(subject.as_str(), "NATS publish failed", e))?;
        Ok(Delivery::Sent)
    }

    async fn close(&self) -> Result<()> {
        close_client(&self.client, self.publish_timeout).await
    }
}
