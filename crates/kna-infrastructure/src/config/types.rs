//! Configuration types

use crate::constants::{
    DEFAULT_CLIENT_NAME, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_LOG_LEVEL, DEFAULT_NATS_URL,
    DEFAULT_PUBLISH_TIMEOUT_MS, DEFAULT_STREAM_SIZE_MIB,
};
use kna_providers::{ConnectionSettings, StreamingSettings};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Transport selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Plain NATS publish
    Core,
    /// JetStream with provisioned streams
    DurableLog,
    /// NATS Streaming (STAN)
    LegacyDurableStream,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Core => "core",
            Self::DurableLog => "jetstream",
            Self::LegacyDurableStream => "streaming",
        })
    }
}

/// Adapter configuration
///
/// Field names are the environment variable names without the `KEYCLOAK_`
/// prefix, lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// NATS server URL
    pub nats_url: String,

    /// Publish through JetStream
    #[serde(deserialize_with = "flag")]
    pub nats_jetstream: bool,

    /// Admin event stream size in MiB
    pub jetstream_admin_size: u32,

    /// Client event stream size in MiB
    pub jetstream_client_size: u32,

    /// Publish through NATS Streaming
    #[serde(deserialize_with = "flag")]
    pub nats_streaming: bool,

    /// NATS Streaming cluster id
    pub nats_streaming_cluster_id: String,

    /// NATS Streaming client id
    pub nats_streaming_client_id: String,

    /// Connection name reported to the server
    pub nats_client_name: String,

    /// Connect timeout in milliseconds
    pub nats_connect_timeout_ms: u64,

    /// Bound of every send, ack included, and of each close step, in milliseconds
    pub nats_publish_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    pub nats_log_level: String,

    /// Enable JSON log output
    #[serde(deserialize_with = "flag")]
    pub nats_log_json: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            nats_url: DEFAULT_NATS_URL.to_string(),
            nats_jetstream: false,
            jetstream_admin_size: DEFAULT_STREAM_SIZE_MIB,
            jetstream_client_size: DEFAULT_STREAM_SIZE_MIB,
            nats_streaming: false,
            nats_streaming_cluster_id: String::new(),
            nats_streaming_client_id: String::new(),
            nats_client_name: DEFAULT_CLIENT_NAME.to_string(),
            nats_connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            nats_publish_timeout_ms: DEFAULT_PUBLISH_TIMEOUT_MS,
            nats_log_level: DEFAULT_LOG_LEVEL.to_string(),
            nats_log_json: false,
        }
    }
}

impl AdapterConfig {
    /// Resolve the transport mode from the mode flags
    ///
    /// JetStream takes precedence when both flags are set.
    pub fn transport_mode(&self) -> TransportMode {
        match (self.nats_jetstream, self.nats_streaming) {
            (true, true) => {
                warn!(
                    "both KEYCLOAK_NATS_JETSTREAM and KEYCLOAK_NATS_STREAMING are set, using JetStream"
                );
                TransportMode::DurableLog
            }
            (true, false) => TransportMode::DurableLog,
            (false, true) => TransportMode::LegacyDurableStream,
            (false, false) => TransportMode::Core,
        }
    }

    /// Connect timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.nats_connect_timeout_ms)
    }

    /// Acknowledgment timeout for JetStream and NATS Streaming
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.nats_publish_timeout_ms)
    }

    /// How long shutdown waits for in-flight sends
    ///
    /// A send that started right before shutdown still gets its full
    /// publish timeout.
    pub fn drain_timeout(&self) -> Duration {
        self.publish_timeout() * 2
    }

    /// Core connection parameters
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            url: self.nats_url.clone(),
            client_name: self.nats_client_name.clone(),
            connect_timeout: self.connect_timeout(),
        }
    }

    /// NATS Streaming session parameters
    pub fn streaming_settings(&self) -> StreamingSettings {
        StreamingSettings {
            cluster_id: self.nats_streaming_cluster_id.clone(),
            client_id: self.nats_streaming_client_id.clone(),
            request_timeout: self.publish_timeout(),
        }
    }

    /// Logging section
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.nats_log_level.clone(),
            json_format: self.nats_log_json,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

/// Raw environment value
///
/// The environment provider guesses value types, so `TRUE` arrives as a
/// string, `true` as a bool and `42` as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Unsigned(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

/// `true` in any case enables a flag; anything else disables it
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Bool(b) => b,
        other => other.into_text().trim().eq_ignore_ascii_case("true"),
    })
}
