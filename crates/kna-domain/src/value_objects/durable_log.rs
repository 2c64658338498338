//! Durable log descriptors
//!
//! A durable log is a size-bounded, replayable stream that captures every
//! subject under one namespace. The adapter owns exactly two of them.

use crate::constants::{
    ADMIN_EVENT_FILTER, ADMIN_EVENT_STREAM, BYTES_PER_MIB, CLIENT_EVENT_FILTER,
    CLIENT_EVENT_STREAM,
};
use serde::{Deserialize, Serialize};

/// Desired state of one durable log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableLogDescriptor {
    /// Stream name
    pub name: String,
    /// Subject filter captured by the stream
    pub subject_filter: String,
    /// Maximum retained size in bytes
    pub max_bytes: i64,
}

impl DurableLogDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, subject_filter: impl Into<String>, max_bytes: i64) -> Self {
        Self {
            name: name.into(),
            subject_filter: subject_filter.into(),
            max_bytes,
        }
    }

    /// The admin event stream, sized in MiB
    pub fn admin_events(size_mib: u32) -> Self {
        Self::new(ADMIN_EVENT_STREAM, ADMIN_EVENT_FILTER, mib_to_bytes(size_mib))
    }

    /// The client event stream, sized in MiB
    pub fn client_events(size_mib: u32) -> Self {
        Self::new(CLIENT_EVENT_STREAM, CLIENT_EVENT_FILTER, mib_to_bytes(size_mib))
    }
}

/// Convert a MiB count into bytes
pub fn mib_to_bytes(size_mib: u32) -> i64 {
    i64::from(size_mib) * BYTES_PER_MIB
}
