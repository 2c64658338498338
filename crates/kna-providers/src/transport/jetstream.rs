//! JetStream Transport
//!
//! Publishes into the provisioned durable logs and waits for the stream to
//! acknowledge each message. One deadline covers handing the message to the
//! client and waiting for the ack; a late ack counts as a failed publish
//! even though the server may still store the message.

use crate::connection::close_client;
use async_nats::Client;
use async_nats::jetstream::{self, Context};
use async_trait::async_trait;
use bytes::Bytes;
use kna_application::ports::infrastructure::{Delivery, EventTransport};
use kna_domain::error::{Error, Result};
use kna_domain::value_objects::SubjectKey;
use std::time::Duration;
use tokio::time::timeout;
use tracing::trace;

/// Publishes into JetStream streams
#[derive(Clone)]
pub struct JetStreamTransport {
    client: Client,
    jetstream: Context,
    ack_timeout: Duration,
}

impl JetStreamTransport {
    /// Create a JetStream transport on an established connection
    ///
    /// `ack_timeout` bounds each send, ack included, and the final flush.
    pub fn new(client: Client, ack_timeout: Duration) -> Self {
        let jetstream = jetstream::new(client.clone());
        Self {
            client,
            jetstream,
            ack_timeout,
        }
    }

    /// JetStream context, shared with stream provisioning
    pub fn context(&self) -> &Context {
        &self.jetstream
    }
}

impl std::fmt::Debug for JetStreamTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JetStreamTransport")
            .field("ack_timeout", &self.ack_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventTransport for JetStreamTransport {
    fn name(&self) -> &'static str {
        "jetstream"
    }

    async fn send(&self, subject: &SubjectKey, payload: &[u8]) -> Result<Delivery> {
        let acknowledged = async {
            let pending = self
                .jetstream
                .publish(subject.to_string(), Bytes::copy_from_slice(payload))
                .await
                .map_err(|e| {
                    Error::publish_with_source(subject.as_str(), "JetStream publish failed", e)
                })?;
            pending.await.map_err(|e| {
                Error::publish_with_source(subject.as_str(), "JetStream rejected message", e)
            })
        };

        let ack = timeout(self.ack_timeout, acknowledged)
            .await
            .map_err(|_| {
                Error::publish(
                    subject.as_str(),
                    format!("no JetStream ack within {:?}", self.ack_timeout),
                )
            })??;

        trace!(subject = %subject, stream = %ack.stream, sequence = ack.sequence, "JetStream ack");
        Ok(Delivery::Acknowledged {
            stream: ack.stream,
            sequence: ack.sequence,
        })
    }

    async fn close(&self) -> Result<()> {
        close_client(&self.client, self.ack_timeout).await
    }
}
