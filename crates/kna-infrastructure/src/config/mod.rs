//! Configuration
//!
//! The adapter is configured exclusively through `KEYCLOAK_*` environment
//! variables, read once at startup.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AdapterConfig, LoggingConfig, TransportMode};
