//! Listener factory lifecycle
//!
//! The host drives the adapter through [`NatsEventListenerFactory`]:
//! `init` once at boot, `create` for every session, `close` once at
//! shutdown. All sessions share a single publisher.
//!
//! Before `init` succeeds, and whenever the bus is unreachable, the
//! publisher runs on the disabled transport, so the listener handed out by
//! `create` is always usable.

use crate::config::{AdapterConfig, ConfigLoader};
use crate::logging::init_logging;
use crate::transport::TransportPolicy;
use async_trait::async_trait;
use kna_application::ports::host::{EventListener, EventListenerFactory};
use kna_application::use_cases::Publisher;
use kna_domain::constants::FACTORY_ID;
use kna_domain::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Event listener factory registered with the host
pub struct NatsEventListenerFactory {
    publisher: Arc<Publisher<TransportPolicy>>,
    config: Option<AdapterConfig>,
}

impl Default for NatsEventListenerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl NatsEventListenerFactory {
    /// Create an uninitialized factory
    pub fn new() -> Self {
        Self {
            publisher: Publisher::new_shared(TransportPolicy::disabled()),
            config: None,
        }
    }

    /// Load configuration from the environment and initialize
    pub async fn init_from_env(&mut self) -> Result<()> {
        let config = ConfigLoader::new().load()?;
        self.init(config).await
    }

    /// The shared publisher
    pub fn publisher(&self) -> Arc<Publisher<TransportPolicy>> {
        Arc::clone(&self.publisher)
    }

    /// Configuration applied by the last `init`
    pub fn config(&self) -> Option<&AdapterConfig> {
        self.config.as_ref()
    }
}

impl std::fmt::Debug for NatsEventListenerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsEventListenerFactory")
            .field("publisher", &self.publisher)
            .field("initialized", &self.config.is_some())
            .finish()
    }
}

#[async_trait]
impl EventListenerFactory for NatsEventListenerFactory {
    type Config = AdapterConfig;

    fn id(&self) -> &'static str {
        FACTORY_ID
    }

    async fn init(&mut self, config: AdapterConfig) -> Result<()> {
        init_logging(&config.logging())?;
        info!(mode = %config.transport_mode(), url = %config.nats_url, "Initializing NATS event adapter");

        let policy = TransportPolicy::connect(&config).await;
        let publisher = Publisher::new(policy).with_drain_timeout(config.drain_timeout());
        let previous = std::mem::replace(&mut self.publisher, Arc::new(publisher));
        previous.shutdown().await;

        self.config = Some(config);
        Ok(())
    }

    fn post_init(&mut self) {
        debug!(transport = self.publisher.transport_name(), "NATS event adapter ready");
    }

    fn create(&self) -> Arc<dyn EventListener> {
        self.publisher.clone()
    }

    async fn close(&mut self) {
        self.publisher.shutdown().await;
    }
}
