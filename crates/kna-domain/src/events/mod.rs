//! Host Events
//!
//! The two event shapes the identity provider hands to the adapter. They are
//! owned by the host; the adapter only borrows them, except when publishing is
//! deferred to a unit-of-work commit, in which case it keeps its own clone.
//!
//! | Event | Description |
//! |-------|-------------|
//! | [`DomainEvent`] | User-facing activity (login, logout, token refresh...) |
//! | [`AdminDomainEvent`] | Admin console / REST API changes |
//! | [`EventKind`] | Owned, queueable wrapper over either shape |

/// Admin event definitions
pub mod admin_event;
/// Client event definitions
pub mod client_event;

pub use admin_event::{AdminDomainEvent, AuthDetails};
pub use client_event::DomainEvent;

use crate::serialization::{serialize, serialize_admin};
use crate::value_objects::SubjectKey;

/// An owned event together with the intake it arrived through
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Arrived through `on_event`
    Client(DomainEvent),
    /// Arrived through `on_admin_event`
    Admin {
        /// The admin event
        event: AdminDomainEvent,
        /// Whether the representation goes into the payload
        include_representation: bool,
    },
}

impl EventKind {
    /// Subject this event is published under
    pub fn subject(&self) -> SubjectKey {
        match self {
            Self::Client(event) => SubjectKey::for_client_event(event),
            Self::Admin { event, .. } => SubjectKey::for_admin_event(event),
        }
    }

    /// JSON payload of this event (sentinel on failure)
    pub fn payload(&self) -> String {
        match self {
            Self::Client(event) => serialize(event),
            Self::Admin {
                event,
                include_representation,
            } => serialize_admin(event, *include_representation),
        }
    }

    /// Short label used in log records
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client(_) => "client",
            Self::Admin { .. } => "admin",
        }
    }
}

impl From<DomainEvent> for EventKind {
    fn from(event: DomainEvent) -> Self {
        Self::Client(event)
    }
}
