//! Subject keys
//!
//! Every event is published under a hierarchical subject:
//!
//! ```text
//! keycloak.event.client.<realm>.<outcome>.<clientId>.<type>
//! keycloak.event.admin.<realm>.<outcome>.<resourceType>.<operation>
//! ```
//!
//! Consumers filter by prefix (`keycloak.event.admin.>`), so the mapping must
//! be deterministic and must never produce wildcards, whitespace or empty
//! tokens.

use crate::constants::{
    ADMIN_SUBJECT_PREFIX, CLIENT_SUBJECT_PREFIX, EMPTY_SEGMENT_PLACEHOLDER, OUTCOME_ERROR,
    OUTCOME_SUCCESS, SUBJECT_SEPARATOR,
};
use crate::events::{AdminDomainEvent, DomainEvent};
use std::fmt;

/// A normalized, routable bus subject
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectKey(String);

impl SubjectKey {
    /// Subject for a client event
    pub fn for_client_event(event: &DomainEvent) -> Self {
        Self::compose(
            CLIENT_SUBJECT_PREFIX,
            [
                segment(&event.realm_id),
                outcome(event.is_error()),
                segment(event.client_id.as_deref().unwrap_or_default()),
                segment(&event.event_type.to_lowercase()),
            ],
        )
    }

    /// Subject for an admin event
    pub fn for_admin_event(event: &AdminDomainEvent) -> Self {
        Self::compose(
            ADMIN_SUBJECT_PREFIX,
            [
                segment(&event.realm_id),
                outcome(event.is_error()),
                segment(&event.resource_type.to_lowercase()),
                segment(&event.operation_type.to_lowercase()),
            ],
        )
    }

    fn compose(prefix: &str, segments: [String; 4]) -> Self {
        let mut key = String::from(prefix);
        for segment in segments {
            key.push(SUBJECT_SEPARATOR);
            key.push_str(&segment);
        }
        Self(key)
    }

    /// The subject as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the dot-separated tokens
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SUBJECT_SEPARATOR)
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SubjectKey> for String {
    fn from(key: SubjectKey) -> Self {
        key.0
    }
}

/// Keep `[a-zA-Z0-9 _.-]`, then turn spaces into underscores
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | '-'))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// A single variable token: dots stripped, normalized, never empty
fn segment(raw: &str) -> String {
    let normalized = normalize(&raw.replace(SUBJECT_SEPARATOR, ""));
    if normalized.is_empty() {
        EMPTY_SEGMENT_PLACEHOLDER.to_string()
    } else {
        normalized
    }
}

fn outcome(is_error: bool) -> String {
    if is_error {
        OUTCOME_ERROR.to_string()
    } else {
        OUTCOME_SUCCESS.to_string()
    }
}
