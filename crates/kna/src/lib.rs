//! # Keycloak NATS Adapter
//!
//! Publishes identity provider events onto a NATS bus.
//!
//! Every client event lands on
//! `keycloak.event.client.<realm>.<outcome>.<clientId>.<type>` and every
//! admin event on
//! `keycloak.event.admin.<realm>.<outcome>.<resourceType>.<operation>`,
//! with the full event as a JSON payload.
//!
//! ## Features
//!
//! - **Core NATS**: fire-and-forget publish, the default
//! - **JetStream**: acknowledged publish into two size-bounded streams
//! - **NATS Streaming**: acknowledged publish for legacy clusters
//! - **Failure isolation**: bus trouble never reaches the host
//!
//! ## Example
//!
//! ```ignore
//! use kna::{EventListenerFactory, NatsEventListenerFactory};
//!
//! let mut factory = NatsEventListenerFactory::new();
//! factory.init_from_env().await?;
//! factory.post_init();
//!
//! let listener = factory.create();
//! listener.on_event(&kna::DomainEvent::new("master", "LOGIN")).await;
//!
//! factory.close().await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Events, subject keys, serialization, errors
//! - `application` - Publisher, unit of work, provisioning and ports
//! - `infrastructure` - Configuration, logging, transport policy, lifecycle
//! - `providers` - NATS transports

/// Domain layer - events, subjects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kna_domain::*;
}

/// Application layer - publisher and ports
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use kna_application::*;
}

/// Infrastructure layer - config, logging and lifecycle
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use kna_infrastructure::*;
}

/// Providers - NATS transports
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use kna_providers::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the host-facing API at the crate root
pub use application::{EventListener, EventListenerFactory, Publisher, UnitOfWork};
pub use infrastructure::{AdapterConfig, NatsEventListenerFactory, TransportPolicy};
