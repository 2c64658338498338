//! Infrastructure ports

/// Durable log administration port
pub mod durable_log;
/// Event transport port
pub mod transport;

pub use durable_log::DurableLogManager;
pub use transport::{Delivery, EventTransport};
