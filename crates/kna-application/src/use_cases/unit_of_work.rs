//! Unit of work
//!
//! Defers publication until the host's transaction commits. Events are
//! cloned on enqueue, so the host stays free to reuse or mutate its own
//! objects, and are published in enqueue order when [`UnitOfWork::commit`]
//! runs. A unit of work that is rolled back or simply dropped publishes
//! nothing.
//!
//! ```ignore
//! let mut uow = publisher.begin();
//! uow.enqueue_event(&login);
//! uow.enqueue_admin_event(&user_created, true);
//! // host transaction commits
//! uow.commit().await;
//! ```

use crate::ports::infrastructure::EventTransport;
use crate::use_cases::publisher::Publisher;
use kna_domain::events::{AdminDomainEvent, DomainEvent, EventKind};
use std::sync::Arc;
use tracing::debug;

/// Ordered batch of events bound to one host transaction
pub struct UnitOfWork<T: EventTransport> {
    publisher: Arc<Publisher<T>>,
    pending: Vec<EventKind>,
}

impl<T: EventTransport> UnitOfWork<T> {
    pub(crate) fn new(publisher: Arc<Publisher<T>>) -> Self {
        Self {
            publisher,
            pending: Vec::new(),
        }
    }

    /// Queue a client event
    pub fn enqueue_event(&mut self, event: &DomainEvent) {
        self.pending.push(EventKind::Client(event.clone()));
    }

    /// Queue an admin event
    pub fn enqueue_admin_event(&mut self, event: &AdminDomainEvent, include_representation: bool) {
        self.pending.push(EventKind::Admin {
            event: event.clone(),
            include_representation,
        });
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Publish every queued event in enqueue order
    ///
    /// Returns how many events were handed to the publisher. Individual
    /// publish failures are logged by the publisher and do not stop the
    /// remaining events.
    pub async fn commit(mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        for kind in &pending {
            self.publisher.publish(kind).await;
        }
        debug!(events = count, "unit of work committed");
        count
    }

    /// Discard every queued event
    pub fn rollback(mut self) {
        let discarded = std::mem::take(&mut self.pending).len();
        debug!(events = discarded, "unit of work rolled back");
    }
}

impl<T: EventTransport> Drop for UnitOfWork<T> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            debug!(
                events = self.pending.len(),
                "unit of work dropped without commit, discarding events"
            );
        }
    }
}
