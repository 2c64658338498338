//! Durable Log Manager Port
//!
//! Administration of the retained streams the durable-log transport writes
//! into. Kept deliberately small: the provisioner only needs lookup, create
//! and update.

use async_trait::async_trait;
use kna_domain::error::Result;
use kna_domain::value_objects::DurableLogDescriptor;

/// Durable log administration interface
#[async_trait]
pub trait DurableLogManager: Send + Sync {
    /// Current state of the log called `name`, `None` if it does not exist
    async fn lookup(&self, name: &str) -> Result<Option<DurableLogDescriptor>>;

    /// Create a log
    ///
    /// Must fail with [`kna_domain::Error::AlreadyExists`] when a log of
    /// that name appeared in the meantime.
    async fn create(&self, descriptor: &DurableLogDescriptor) -> Result<()>;

    /// Apply `descriptor` to an existing log
    async fn update(&self, descriptor: &DurableLogDescriptor) -> Result<()>;
}
