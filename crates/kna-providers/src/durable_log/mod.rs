//! Durable log administration

/// JetStream stream management
pub mod jetstream;

pub use jetstream::JetStreamLogManager;
