//! Transport policy
//!
//! Builds the single transport a process publishes through. The mode is
//! decided once from configuration and never changes afterwards. When the
//! server cannot be reached, or the durable logs cannot be provisioned, the
//! adapter keeps running with the disabled transport instead of failing the
//! host.

use crate::config::{AdapterConfig, TransportMode};
use async_trait::async_trait;
use kna_application::ports::infrastructure::{Delivery, EventTransport};
use kna_application::use_cases::DurableLogProvisioner;
use kna_domain::error::Result;
use kna_domain::value_objects::SubjectKey;
use kna_providers::{
    DisabledTransport, JetStreamLogManager, JetStreamTransport, LegacyStreamTransport,
    NatsCoreTransport, close_client, connect,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The transport of the process, one variant per mode
#[derive(Debug)]
pub enum TransportPolicy {
    /// Fire-and-forget core NATS
    Core(NatsCoreTransport),
    /// JetStream with acknowledged publish
    DurableLog(JetStreamTransport),
    /// NATS Streaming with acknowledged publish
    LegacyDurableStream(LegacyStreamTransport),
    /// Everything is discarded
    Disabled(DisabledTransport),
}

impl TransportPolicy {
    /// The disabled transport
    pub fn disabled() -> Self {
        Self::Disabled(DisabledTransport::new())
    }

    /// Whether events are discarded
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled(_))
    }

    /// Connect according to `config`, falling back to disabled on failure
    pub async fn connect(config: &AdapterConfig) -> Self {
        match Self::try_connect(config).await {
            Ok(policy) => {
                info!(transport = policy.name(), url = %config.nats_url, "NATS event publishing enabled");
                policy
            }
            Err(e) => {
                error!(
                    error = %e,
                    url = %config.nats_url,
                    "NATS event publishing disabled, events will be discarded"
                );
                Self::disabled()
            }
        }
    }

    /// Connect according to `config`
    ///
    /// In durable-log mode both streams are provisioned before the transport
    /// is returned. A connection opened before a later step fails is closed
    /// again.
    pub async fn try_connect(config: &AdapterConfig) -> Result<Self> {
        let client = connect(&config.connection_settings()).await?;

        match config.transport_mode() {
            TransportMode::Core => Ok(Self::Core(NatsCoreTransport::new(
                client,
                config.publish_timeout(),
            ))),
            TransportMode::DurableLog => {
                let transport = JetStreamTransport::new(client, config.publish_timeout());
                let manager = Arc::new(JetStreamLogManager::new(transport.context().clone()));
                let provisioned = DurableLogProvisioner::new(manager)
                    .ensure_all(config.jetstream_admin_size, config.jetstream_client_size)
                    .await;
                if let Err(e) = provisioned {
                    release(transport.close().await);
                    return Err(e);
                }
                Ok(Self::DurableLog(transport))
            }
            TransportMode::LegacyDurableStream => {
                match LegacyStreamTransport::connect(client.clone(), &config.streaming_settings())
                    .await
                {
                    Ok(transport) => Ok(Self::LegacyDurableStream(transport)),
                    Err(e) => {
                        release(close_client(&client, config.publish_timeout()).await);
                        Err(e)
                    }
                }
            }
        }
    }

    fn inner(&self) -> &dyn EventTransport {
        match self {
            Self::Core(t) => t,
            Self::DurableLog(t) => t,
            Self::LegacyDurableStream(t) => t,
            Self::Disabled(t) => t,
        }
    }
}

fn release(closed: Result<()>) {
    if let Err(e) = closed {
        warn!(error = %e, "could not close connection after failed setup");
    }
}

#[async_trait]
impl EventTransport for TransportPolicy {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    async fn send(&self, subject: &SubjectKey, payload: &[u8]) -> Result<Delivery> {
        self.inner().send(subject, payload).await
    }

    async fn close(&self) -> Result<()> {
        self.inner().close().await
    }
}
