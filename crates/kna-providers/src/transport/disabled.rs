//! Disabled Transport
//!
//! Stands in when no connection could be established. Every send succeeds
//! without touching the network, so the host keeps running and the
//! publisher records the event as skipped.
//!
//! ## Usage
//!
//! ```rust
//! use kna_providers::transport::DisabledTransport;
//!
//! let transport = DisabledTransport::new();
//! // All events are silently discarded
//! ```

use async_trait::async_trait;
use kna_application::ports::infrastructure::{Delivery, EventTransport};
use kna_domain::error::Result;
use kna_domain::value_objects::SubjectKey;

/// Transport that discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTransport;

impl DisabledTransport {
    /// Create a new disabled transport
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventTransport for DisabledTransport {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn send(&self, _subject: &SubjectKey, _payload: &[u8]) -> Result<Delivery> {
        Ok(Delivery::Skipped)
    }

    async fn close(&self) -> Result<()> {
        // Nothing to release
        Ok(())
    }
}
