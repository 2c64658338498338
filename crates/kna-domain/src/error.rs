//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the infrastructure-facing variants
type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the Keycloak NATS adapter
///
/// None of these ever reach the host through the intake operations. They
/// travel between layers and are turned into log records at the boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed configuration value (fatal at startup)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// The bus could not be reached
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Durable log create/update failure
    #[error("Provisioning error: {message}")]
    Provisioning {
        /// Description of the provisioning failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// A resource that was about to be created already exists
    #[error("Already exists: {resource}")]
    AlreadyExists {
        /// The resource that already exists
        resource: String,
    },

    /// Event could not be turned into a payload
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error
        message: String,
    },

    /// The transport rejected or timed out a send
    #[error("Publish error on '{subject}': {message}")]
    Publish {
        /// Subject the message was addressed to
        subject: String,
        /// Description of the publish failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Releasing the connection failed
    #[error("Shutdown error: {message}")]
    Shutdown {
        /// Description of the shutdown failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an already exists error
    pub fn already_exists<S: Into<String>>(resource: S) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

// Transport error creation methods
impl Error {
    /// Create a connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with source
    pub fn connection_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a publish error
    pub fn publish<S: Into<String>, M: Into<String>>(subject: S, message: M) -> Self {
        Self::Publish {
            subject: subject.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a publish error with source
    pub fn publish_with_source<S, M, E>(subject: S, message: M, source: E) -> Self
    where
        S: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Publish {
            subject: subject.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a shutdown error
    pub fn shutdown<S: Into<String>>(message: S) -> Self {
        Self::Shutdown {
            message: message.into(),
            source: None,
        }
    }

    /// Create a shutdown error with source
    pub fn shutdown_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Shutdown {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Durable log error creation methods
impl Error {
    /// Create a provisioning error with source
    pub fn provisioning_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provisioning {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether this error means a create raced with another creator
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}
