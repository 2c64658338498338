//! Use cases

/// Durable log reconciliation
pub mod provisioning;
/// Event publication
pub mod publisher;
/// Commit-deferred publication
pub mod unit_of_work;

pub use provisioning::{DurableLogProvisioner, ProvisionOutcome};
pub use publisher::{DEFAULT_DRAIN_TIMEOUT, Publisher, PublisherStats, PublisherStatsSnapshot};
pub use unit_of_work::UnitOfWork;
