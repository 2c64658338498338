//! Host Ports
//!
//! The identity provider drives the adapter through two small interfaces:
//! a factory it initializes once at boot and closes once at shutdown, and the
//! listener the factory hands out for every session.
//!
//! ```text
//! host boot     -> factory.init(config) -> factory.post_init()
//! each request  -> factory.create().on_event(..) / .on_admin_event(..)
//! host shutdown -> factory.close()
//! ```

use async_trait::async_trait;
use kna_domain::error::Result;
use kna_domain::events::{AdminDomainEvent, DomainEvent};
use std::sync::Arc;

/// Receives events from the host
///
/// Implementations never fail towards the host: every error is logged and
/// swallowed so identity requests are never disturbed by bus trouble.
#[async_trait]
pub trait EventListener: Send + Sync {
    /// A user-facing event occurred
    async fn on_event(&self, event: &DomainEvent);

    /// An admin event occurred
    async fn on_admin_event(&self, event: &AdminDomainEvent, include_representation: bool);
}

/// Registered with the host's extension registry
#[async_trait]
pub trait EventListenerFactory: Send + Sync {
    /// Configuration consumed by `init`
    type Config: Send;

    /// Fixed registry identifier
    fn id(&self) -> &'static str;

    /// Connect and provision; only configuration errors are returned
    async fn init(&mut self, config: Self::Config) -> Result<()>;

    /// Called once all factories of the host are initialized
    fn post_init(&mut self);

    /// The shared listener
    fn create(&self) -> Arc<dyn EventListener>;

    /// Release the transport; never fails
    async fn close(&mut self);
}
