//! Application Layer - Keycloak NATS adapter
//!
//! Orchestrates the domain types against the transport and durable log
//! ports. This crate knows nothing about NATS; concrete transports live in
//! `kna-providers` and are wired together in `kna-infrastructure`.
//!
//! ## Use Cases
//!
//! - Publishing host events (`Publisher`)
//! - Deferring publication to a unit-of-work commit (`UnitOfWork`)
//! - Reconciling durable logs at startup (`DurableLogProvisioner`)
//!
//! ## Ports (Interfaces)
//!
//! - `ports::infrastructure::EventTransport`: where payloads go
//! - `ports::infrastructure::DurableLogManager`: stream administration
//! - `ports::host`: what the identity provider calls

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
