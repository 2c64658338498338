//! Port definitions

/// Interfaces exposed to the identity provider host
pub mod host;
/// Interfaces implemented by bus providers
pub mod infrastructure;

pub use host::{EventListener, EventListenerFactory};
pub use infrastructure::{Delivery, DurableLogManager, EventTransport};
