use serde::{Deserialize, Serialize};

/// Who performed an admin operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDetails {
    /// Realm of the acting admin
    pub realm_id: Option<String>,
    /// Client the admin used
    pub client_id: Option<String>,
    /// Acting admin user
    pub user_id: Option<String>,
    /// Remote address of the admin request
    pub ip_address: Option<String>,
}

/// An admin console / admin REST API event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDomainEvent {
    /// Host-assigned event id
    pub id: Option<String>,
    /// Epoch milliseconds
    pub time: i64,
    /// Realm the operation targeted
    pub realm_id: String,
    /// Acting admin
    pub auth_details: Option<AuthDetails>,
    /// Resource type tag, e.g. `USER` or `REALM_ROLE`
    pub resource_type: String,
    /// Operation tag: `CREATE`, `UPDATE`, `DELETE` or `ACTION`
    pub operation_type: String,
    /// Path of the affected resource
    pub resource_path: Option<String>,
    /// JSON representation of the resource, when the host captured one
    pub representation: Option<String>,
    /// Error tag; presence marks a failed outcome
    pub error: Option<String>,
}

impl AdminDomainEvent {
    /// Create an admin event for an operation on a resource type
    pub fn new(
        realm_id: impl Into<String>,
        resource_type: impl Into<String>,
        operation_type: impl Into<String>,
    ) -> Self {
        Self {
            realm_id: realm_id.into(),
            resource_type: resource_type.into(),
            operation_type: operation_type.into(),
            ..Default::default()
        }
    }

    /// Set the resource path
    #[must_use]
    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = Some(path.into());
        self
    }

    /// Attach a resource representation
    #[must_use]
    pub fn with_representation(mut self, representation: impl Into<String>) -> Self {
        self.representation = Some(representation.into());
        self
    }

    /// Set the acting admin
    #[must_use]
    pub fn with_auth_details(mut self, auth_details: AuthDetails) -> Self {
        self.auth_details = Some(auth_details);
        self
    }

    /// Mark the event as failed
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Whether the event carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
