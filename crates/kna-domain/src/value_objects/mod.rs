//! Value objects

/// Durable log descriptors
pub mod durable_log;
/// Subject key construction
pub mod subject;

pub use durable_log::{DurableLogDescriptor, mib_to_bytes};
pub use subject::{SubjectKey, normalize};
