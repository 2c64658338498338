//! Domain layer constants
//!
//! Names in this module are part of the wire contract with downstream
//! consumers. Changing any of them breaks existing subscriptions.

// ============================================================================
// SUBJECT CONSTANTS
// ============================================================================

/// Subject prefix for client (user-facing) events
pub const CLIENT_SUBJECT_PREFIX: &str = "keycloak.event.client";

/// Subject prefix for admin events
pub const ADMIN_SUBJECT_PREFIX: &str = "keycloak.event.admin";

/// Outcome segment for events that carry an error
pub const OUTCOME_ERROR: &str = "error";

/// Outcome segment for events without an error
pub const OUTCOME_SUCCESS: &str = "success";

/// Replacement for a variable segment that normalizes to nothing
pub const EMPTY_SEGMENT_PLACEHOLDER: &str = "unknown";

/// Segment separator
pub const SUBJECT_SEPARATOR: char = '.';

// ============================================================================
// DURABLE LOG CONSTANTS
// ============================================================================

/// Stream holding admin events
pub const ADMIN_EVENT_STREAM: &str = "keycloak-admin-event-stream";

/// Stream holding client events
pub const CLIENT_EVENT_STREAM: &str = "keycloak-client-event-stream";

/// Subject filter of the admin event stream
pub const ADMIN_EVENT_FILTER: &str = "keycloak.event.admin.>";

/// Subject filter of the client event stream
pub const CLIENT_EVENT_FILTER: &str = "keycloak.event.client.>";

/// Bytes per configured MiB
pub const BYTES_PER_MIB: i64 = 1024 * 1024;

// ============================================================================
// PAYLOAD CONSTANTS
// ============================================================================

/// Payload published when an event cannot be serialized
pub const SENTINEL_PAYLOAD: &str = "{}";

// ============================================================================
// HOST CONSTANTS
// ============================================================================

/// Identifier the host's extension registry uses to select this adapter
pub const FACTORY_ID: &str = "keycloak-nats-adapter";
