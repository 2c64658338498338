use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user-facing event (login, code-to-token exchange, logout, ...)
///
/// Field names serialize in camelCase, the way the host renders its events,
/// so existing consumers can parse the payload unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    /// Host-assigned event id
    pub id: Option<String>,
    /// Epoch milliseconds
    pub time: i64,
    /// Event type tag, e.g. `LOGIN` or `LOGIN_ERROR`
    #[serde(rename = "type")]
    pub event_type: String,
    /// Realm the event happened in
    pub realm_id: String,
    /// Client the event was triggered through
    pub client_id: Option<String>,
    /// Affected user
    pub user_id: Option<String>,
    /// User session
    pub session_id: Option<String>,
    /// Remote address of the request
    pub ip_address: Option<String>,
    /// Error tag; presence marks a failed outcome
    pub error: Option<String>,
    /// Free-form details attached by the host
    pub details: Option<BTreeMap<String, String>>,
}

impl DomainEvent {
    /// Create an event of the given type in the given realm
    pub fn new(realm_id: impl Into<String>, event_type: impl Into<String>) -> Self {
        Self {
            realm_id: realm_id.into(),
            event_type: event_type.into(),
            ..Default::default()
        }
    }

    /// Set the client id
    #[must_use]
    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the user id
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Mark the event as failed
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the timestamp
    #[must_use]
    pub fn at(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    /// Add a detail entry
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Whether the event carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
