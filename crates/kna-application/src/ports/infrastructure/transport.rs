//! Event Transport Port
//!
//! Defines the contract for putting a serialized event on the bus.
//!
//! ## Architecture
//!
//! Implementations (core NATS, JetStream, NATS Streaming, disabled) are in
//! `kna-providers`. The publisher owns exactly one transport for the lifetime
//! of the process and calls [`EventTransport::close`] once at shutdown.
//!
//! Implementations must be safe for concurrent `send` calls; the publisher
//! adds no locking of its own.

use async_trait::async_trait;
use kna_domain::error::Result;
use kna_domain::value_objects::SubjectKey;

/// What happened to a message after a successful `send`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the connection; no acknowledgment is expected
    Sent,
    /// Stored by a durable log
    Acknowledged {
        /// Stream that stored the message
        stream: String,
        /// Per-stream sequence number
        sequence: u64,
    },
    /// Accepted by a legacy streaming server
    Confirmed {
        /// Publish guid echoed by the server
        guid: String,
    },
    /// The transport is disabled; nothing left the process
    Skipped,
}

/// Event transport interface
///
/// | Method | Purpose |
/// |--------|---------|
/// | `name` | Short identifier used in logs |
/// | `send` | Publish one payload under one subject |
/// | `close` | Release the connection |
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Short identifier of the transport mode
    fn name(&self) -> &'static str;

    /// Publish `payload` under `subject`
    ///
    /// A single attempt. Errors are reported to the caller, which decides
    /// whether to log or propagate them; transports never retry.
    async fn send(&self, subject: &SubjectKey, payload: &[u8]) -> Result<Delivery>;

    /// Release the underlying connection
    async fn close(&self) -> Result<()>;
}
