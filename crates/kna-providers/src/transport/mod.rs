//! Event transports
//!
//! One implementation of [`EventTransport`](kna_application::ports::EventTransport)
//! per transport mode.

/// Transport that discards everything
pub mod disabled;
/// JetStream publish with acknowledgment
pub mod jetstream;
/// Core NATS publish
pub mod nats;
/// Legacy NATS Streaming publish
pub mod streaming;

pub use disabled::DisabledTransport;
pub use jetstream::JetStreamTransport;
pub use nats::NatsCoreTransport;
pub use streaming::{LegacyStreamTransport, StreamingSettings};
