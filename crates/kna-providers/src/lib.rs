//! # NATS Providers
//!
//! Implementations of the transport and durable log ports on top of
//! `async-nats`.
//!
//! | Provider | Mode | Description |
//! |----------|------|-------------|
//! | [`NatsCoreTransport`] | Core | Fire-and-forget publish |
//! | [`JetStreamTransport`] | DurableLog | Publish and await the stream ack |
//! | [`LegacyStreamTransport`] | LegacyDurableStream | NATS Streaming (STAN) publish with ack timeout |
//! | [`DisabledTransport`] | Disabled | Discards everything |
//! | [`JetStreamLogManager`] | - | Stream lookup / create / update |
//!
//! ## Provider Selection Guide
//!
//! - **Default**: `NatsCoreTransport`; consumers must be online to see events
//! - **Replay needed**: `JetStreamTransport` with provisioned streams
//! - **Old clusters**: `LegacyStreamTransport` for NATS Streaming servers
//! - **Startup failed**: `DisabledTransport`, so the host keeps running

pub mod connection;
pub mod durable_log;
pub mod transport;

pub use connection::{ConnectionSettings, close_client, connect};
pub use durable_log::JetStreamLogManager;
pub use transport::{
    DisabledTransport, JetStreamTransport, LegacyStreamTransport, NatsCoreTransport,
    StreamingSettings,
};
