//! Payload serialization tests

use kna_domain::constants::SENTINEL_PAYLOAD;
use kna_domain::events::{AdminDomainEvent, AuthDetails, DomainEvent, EventKind};
use kna_domain::serialization::{serialize, serialize_admin};
use serde::{Serialize, Serializer};
use serde_json::Value;

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("boom"))
    }
}

#[test]
fn test_serialize_failure_returns_sentinel() {
    assert_eq!(serialize(&Unserializable), SENTINEL_PAYLOAD);
}

#[test]
fn test_client_event_payload_uses_host_field_names() {
    let event = DomainEvent::new("master", "LOGIN")
        .with_client("web")
        .with_user("u-1")
        .at(1_700_000_000_000)
        .with_detail("username", "alice");

    let payload: Value = serde_json::from_str(&serialize(&event)).unwrap();

    assert_eq!(payload["type"], "LOGIN");
    assert_eq!(payload["realmId"], "master");
    assert_eq!(payload["clientId"], "web");
    assert_eq!(payload["userId"], "u-1");
    assert_eq!(payload["time"], 1_700_000_000_000_i64);
    assert_eq!(payload["details"]["username"], "alice");
    assert!(payload["error"].is_null());
}

#[test]
fn test_client_event_payload_round_trips() {
    let event = DomainEvent::new("master", "LOGIN_ERROR").with_error("user_not_found");

    let parsed: DomainEvent = serde_json::from_str(&serialize(&event)).unwrap();

    assert_eq!(parsed, event);
}

#[test]
fn test_admin_payload_omits_representation_unless_requested() {
    let event = AdminDomainEvent::new("test", "USER", "UPDATE")
        .with_resource_path("users/42")
        .with_representation(r#"{"username":"bob"}"#);

    let without: Value = serde_json::from_str(&serialize_admin(&event, false)).unwrap();
    let with: Value = serde_json::from_str(&serialize_admin(&event, true)).unwrap();

    assert!(without["representation"].is_null());
    assert_eq!(with["representation"], r#"{"username":"bob"}"#);
    assert_eq!(with["resourcePath"], "users/42");
}

#[test]
fn test_admin_payload_carries_resource_type_as_string() {
    let event = AdminDomainEvent::new("test", "REALM_ROLE", "CREATE").with_auth_details(
        AuthDetails {
            realm_id: Some("master".to_string()),
            user_id: Some("admin".to_string()),
            ..Default::default()
        },
    );

    let payload: Value = serde_json::from_str(&serialize_admin(&event, false)).unwrap();

    assert_eq!(payload["resourceType"], "REALM_ROLE");
    assert_eq!(payload["resourceTypeAsString"], "REALM_ROLE");
    assert_eq!(payload["operationType"], "CREATE");
    assert_eq!(payload["authDetails"]["userId"], "admin");
}

#[test]
fn test_event_kind_payload_matches_direct_serialization() {
    let event = DomainEvent::new("master", "LOGOUT");

    assert_eq!(EventKind::from(event.clone()).payload(), serialize(&event));
}
