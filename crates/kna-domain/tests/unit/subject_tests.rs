//! Subject key tests

use kna_domain::events::{AdminDomainEvent, DomainEvent, EventKind};
use kna_domain::value_objects::SubjectKey;
use proptest::prelude::*;

#[test]
fn test_client_subject_strips_realm_dots_and_collapses_spaces() {
    let event = DomainEvent::new("my.realm", "LOGIN").with_client("app 1");

    let key = SubjectKey::for_client_event(&event);

    assert_eq!(key.as_str(), "keycloak.event.client.myrealm.success.app_1.login");
}

#[test]
fn test_admin_subject_with_error() {
    let event = AdminDomainEvent::new("test", "USER", "DELETE").with_error("denied");

    let key = SubjectKey::for_admin_event(&event);

    assert_eq!(key.as_str(), "keycloak.event.admin.test.error.user.delete");
}

#[test]
fn test_client_subject_error_outcome() {
    let event = DomainEvent::new("master", "LOGIN_ERROR")
        .with_client("account-console")
        .with_error("invalid_user_credentials");

    let key = SubjectKey::for_client_event(&event);

    assert_eq!(
        key.as_str(),
        "keycloak.event.client.master.error.account-console.login_error"
    );
}

#[test]
fn test_client_subject_keeps_realm_case() {
    let event = DomainEvent::new("Acme Corp", "LOGOUT").with_client("web");

    let key = SubjectKey::for_client_event(&event);

    assert_eq!(key.as_str(), "keycloak.event.client.Acme_Corp.success.web.logout");
}

#[test]
fn test_missing_client_id_uses_placeholder() {
    let event = DomainEvent::new("master", "CODE_TO_TOKEN");

    let key = SubjectKey::for_client_event(&event);

    assert_eq!(
        key.as_str(),
        "keycloak.event.client.master.success.unknown.code_to_token"
    );
}

#[test]
fn test_admin_subject_strips_wildcards() {
    let event = AdminDomainEvent::new("ma*ster", "CLIENT>SCOPE", "UPDATE");

    let key = SubjectKey::for_admin_event(&event);

    assert_eq!(key.as_str(), "keycloak.event.admin.master.success.clientscope.update");
}

#[test]
fn test_event_kind_routes_to_matching_subject() {
    let kind = EventKind::Admin {
        event: AdminDomainEvent::new("test", "REALM_ROLE", "CREATE"),
        include_representation: false,
    };

    assert_eq!(
        kind.subject().as_str(),
        "keycloak.event.admin.test.success.realm_role.create"
    );
    assert_eq!(kind.label(), "admin");
}

#[test]
fn test_segments_iterates_tokens() {
    let key = SubjectKey::for_client_event(&DomainEvent::new("r", "LOGIN").with_client("c"));

    let segments: Vec<&str> = key.segments().collect();

    assert_eq!(
        segments,
        vec!["keycloak", "event", "client", "r", "success", "c", "login"]
    );
}

fn assert_routable(key: &SubjectKey, namespace: &str) {
    let segments: Vec<&str> = key.segments().collect();
    assert_eq!(segments.len(), 7, "unexpected segment count in {key}");
    assert_eq!(&segments[..3], &["keycloak", "event", namespace]);
    assert!(segments.iter().all(|s| !s.is_empty()), "empty token in {key}");
    assert!(
        !key.as_str()
            .chars()
            .any(|c| c == '*' || c == '>' || c.is_whitespace()),
        "unroutable character in {key}"
    );
}

proptest! {
    #[test]
    fn prop_client_subject_is_deterministic_and_routable(
        realm in ".*",
        client in proptest::option::of(".*"),
        event_type in ".*",
        error in proptest::option::of(".*"),
    ) {
        let mut event = DomainEvent::new(realm, event_type);
        event.client_id = client;
        event.error = error;

        let first = SubjectKey::for_client_event(&event);
        let second = SubjectKey::for_client_event(&event.clone());

        prop_assert_eq!(&first, &second);
        assert_routable(&first, "client");
    }

    #[test]
    fn prop_admin_subject_is_deterministic_and_routable(
        realm in ".*",
        resource in ".*",
        operation in ".*",
        error in proptest::option::of(".*"),
    ) {
        let mut event = AdminDomainEvent::new(realm, resource, operation);
        event.error = error;

        let first = SubjectKey::for_admin_event(&event);
        let second = SubjectKey::for_admin_event(&event);

        prop_assert_eq!(&first, &second);
        assert_routable(&first, "admin");
    }
}
