//! Durable log provisioning
//!
//! Reconciles the admin and client event streams with the configured size
//! before the durable-log transport goes live. Safe to run from several
//! adapter instances at once: a create that loses the race against another
//! instance counts as success.

use crate::ports::infrastructure::DurableLogManager;
use kna_domain::error::Result;
use kna_domain::value_objects::DurableLogDescriptor;
use std::sync::Arc;
use tracing::{info, warn};

/// How `ensure` reached the desired state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The log did not exist and was created
    Created,
    /// The log existed and was updated in place
    Updated {
        /// Size bound before the update
        previous_max_bytes: i64,
    },
    /// The log appeared between lookup and create
    CreatedConcurrently,
}

/// Ensures durable logs exist with the configured size
pub struct DurableLogProvisioner<M: DurableLogManager + ?Sized> {
    manager: Arc<M>,
}

impl<M: DurableLogManager + ?Sized> DurableLogProvisioner<M> {
    /// Create a provisioner on top of a log manager
    pub fn new(manager: Arc<M>) -> Self {
        Self { manager }
    }

    /// Create the log if absent, update it if present
    pub async fn ensure(&self, descriptor: &DurableLogDescriptor) -> Result<ProvisionOutcome> {
        if let Some(existing) = self.manager.lookup(&descriptor.name).await? {
            self.manager.update(descriptor).await?;
            info!(
                stream = %descriptor.name,
                previous_max_bytes = existing.max_bytes,
                max_bytes = descriptor.max_bytes,
                "updated durable log"
            );
            return Ok(ProvisionOutcome::Updated {
                previous_max_bytes: existing.max_bytes,
            });
        }

        match self.manager.create(descriptor).await {
            Ok(()) => {
                info!(
                    stream = %descriptor.name,
                    subjects = %descriptor.subject_filter,
                    max_bytes = descriptor.max_bytes,
                    "created durable log"
                );
                Ok(ProvisionOutcome::Created)
            }
            Err(e) if e.is_already_exists() => {
                warn!(
                    stream = %descriptor.name,
                    "durable log was created concurrently by another instance"
                );
                Ok(ProvisionOutcome::CreatedConcurrently)
            }
            Err(e) => Err(e),
        }
    }

    /// Ensure the admin log, then the client log
    pub async fn ensure_all(&self, admin_size_mib: u32, client_size_mib: u32) -> Result<()> {
        self.ensure(&DurableLogDescriptor::admin_events(admin_size_mib))
            .await?;
        self.ensure(&DurableLogDescriptor::client_events(client_size_mib))
            .await?;
        Ok(())
    }
}
