//! # Infrastructure Layer
//!
//! Cross-cutting concerns of the Keycloak NATS adapter:
//!
//! - **config**: environment configuration via figment
//! - **logging**: tracing subscriber setup
//! - **transport**: choosing and building the one transport of the process
//! - **lifecycle**: the factory the identity provider host drives
//!
//! The host only needs [`NatsEventListenerFactory`]:
//!
//! ```ignore
//! let mut factory = NatsEventListenerFactory::new();
//! factory.init_from_env().await?;
//! factory.post_init();
//! let listener = factory.create();
//! listener.on_event(&event).await;
//! factory.close().await;
//! ```

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod lifecycle;
pub mod logging;
pub mod transport;

pub use config::{AdapterConfig, ConfigLoader, LoggingConfig, TransportMode};
pub use error_ext::ErrorContext;
pub use lifecycle::NatsEventListenerFactory;
pub use logging::init_logging;
pub use transport::TransportPolicy;
