//! Payload serialization
//!
//! Events go on the wire as plain UTF-8 JSON: no envelope, no compression.
//! Serialization never fails towards the caller. When `serde_json` gives up,
//! the failure is logged and [`SENTINEL_PAYLOAD`] is returned so the event is
//! still published, with degraded content.

use crate::constants::SENTINEL_PAYLOAD;
use crate::error::Error;
use crate::events::{AdminDomainEvent, AuthDetails};
use serde::Serialize;
use tracing::error;

/// Serialize any value to JSON text, falling back to the sentinel
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            let err = Error::serialization(e.to_string());
            error!(error = %err, "could not serialize event, publishing placeholder payload");
            SENTINEL_PAYLOAD.to_string()
        }
    }
}

/// Serialize an admin event, honoring the include-representation flag
pub fn serialize_admin(event: &AdminDomainEvent, include_representation: bool) -> String {
    serialize(&AdminEventPayload::new(event, include_representation))
}

/// Wire view of an admin event
///
/// Adds `resourceTypeAsString` next to `resourceType` and blanks the
/// representation unless the host asked for it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminEventPayload<'a> {
    id: Option<&'a str>,
    time: i64,
    realm_id: &'a str,
    auth_details: Option<&'a AuthDetails>,
    resource_type: &'a str,
    resource_type_as_string: &'a str,
    operation_type: &'a str,
    resource_path: Option<&'a str>,
    representation: Option<&'a str>,
    error: Option<&'a str>,
}

impl<'a> AdminEventPayload<'a> {
    fn new(event: &'a AdminDomainEvent, include_representation: bool) -> Self {
        Self {
            id: event.id.as_deref(),
            time: event.time,
            realm_id: &event.realm_id,
            auth_details: event.auth_details.as_ref(),
            resource_type: &event.resource_type,
            resource_type_as_string: &event.resource_type,
            operation_type: &event.operation_type,
            resource_path: event.resource_path.as_deref(),
            representation: event
                .representation
                .as_deref()
                .filter(|_| include_representation),
            error: event.error.as_deref(),
        }
    }
}
