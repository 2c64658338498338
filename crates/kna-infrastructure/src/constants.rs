//! Infrastructure layer constants
//!
//! Domain constants (subjects, stream names) live in `kna_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Prefix shared by every configuration variable
pub const CONFIG_ENV_PREFIX: &str = "KEYCLOAK_";

/// Configuration keys read from the environment, without the prefix
pub const CONFIG_ENV_KEYS: &[&str] = &[
    "nats_url",
    "nats_jetstream",
    "jetstream_admin_size",
    "jetstream_client_size",
    "nats_streaming",
    "nats_streaming_cluster_id",
    "nats_streaming_client_id",
    "nats_client_name",
    "nats_connect_timeout_ms",
    "nats_publish_timeout_ms",
    "nats_log_level",
    "nats_log_json",
];

/// Keys whose value is taken verbatim, never parsed as a number or bool
pub const CONFIG_TEXT_KEYS: &[&str] = &[
    "nats_url",
    "nats_streaming_cluster_id",
    "nats_streaming_client_id",
    "nats_client_name",
    "nats_log_level",
];

// ============================================================================
// NATS CONSTANTS
// ============================================================================

/// Default NATS server URL
pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";

/// Default connection name reported to the server
pub const DEFAULT_CLIENT_NAME: &str = "keycloak-nats-adapter";

/// Default stream size in MiB
pub const DEFAULT_STREAM_SIZE_MIB: u32 = 1;

/// Default connect timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default send and close timeout in milliseconds
pub const DEFAULT_PUBLISH_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Variable holding a full `EnvFilter` directive, overriding the level
pub const LOG_FILTER_ENV: &str = "KEYCLOAK_NATS_LOG";
