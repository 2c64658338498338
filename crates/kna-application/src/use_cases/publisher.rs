//! Event Publisher
//!
//! Turns host events into (subject, payload) pairs and hands them to the
//! single transport the process owns.
//!
//! ## Failure isolation
//!
//! Nothing that goes wrong below the publisher reaches the host. Publish
//! failures are logged and counted, the event is dropped, and the call
//! returns normally.
//!
//! ## Teardown
//!
//! The transport sits behind an [`ArcSwapOption`]. Every send works on its
//! own `Arc` clone, and [`Publisher::shutdown`] atomically swaps the handle
//! out before closing it, so a second shutdown finds nothing left to close.
//!
//! Sends register themselves in an in-flight count before they load the
//! handle. Shutdown waits for that count to reach zero, bounded by the drain
//! timeout, and only then closes the connection.

use crate::ports::host::EventListener;
use crate::ports::infrastructure::{Delivery, EventTransport};
use crate::use_cases::unit_of_work::UnitOfWork;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use kna_domain::events::{AdminDomainEvent, DomainEvent, EventKind};
use kna_domain::serialization::{serialize, serialize_admin};
use kna_domain::value_objects::SubjectKey;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, info, trace, warn};

/// How long shutdown waits for in-flight sends by default
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Counters describing what the publisher did with incoming events
#[derive(Debug, Default)]
pub struct PublisherStats {
    sent: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
    rejected_after_shutdown: AtomicU64,
}

/// Point-in-time copy of [`PublisherStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublisherStatsSnapshot {
    /// Events the transport accepted
    pub sent: u64,
    /// Events the transport failed to publish
    pub failed: u64,
    /// Events swallowed by a disabled transport
    pub skipped: u64,
    /// Events received after shutdown
    pub rejected_after_shutdown: u64,
}

impl PublisherStats {
    /// Take a snapshot of the counters
    pub fn snapshot(&self) -> PublisherStatsSnapshot {
        PublisherStatsSnapshot {
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            rejected_after_shutdown: self.rejected_after_shutdown.load(Ordering::Relaxed),
        }
    }
}

/// Sends currently between intake and transport result
#[derive(Debug, Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

/// Registration of one send in [`InFlight`], released on drop
struct InFlightGuard<'a>(&'a InFlight);

impl InFlight {
    fn enter(&self) -> InFlightGuard<'_> {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(self)
    }

    fn pending(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Publishes host events through one owned transport
pub struct Publisher<T: EventTransport> {
    transport: ArcSwapOption<T>,
    name: &'static str,
    stats: PublisherStats,
    in_flight: InFlight,
    drain_timeout: Duration,
}

impl<T: EventTransport> Publisher<T> {
    /// Create a publisher owning `transport`
    pub fn new(transport: T) -> Self {
        let name = transport.name();
        Self {
            transport: ArcSwapOption::from_pointee(transport),
            name,
            stats: PublisherStats::default(),
            in_flight: InFlight::default(),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Bound the wait for in-flight sends on shutdown
    #[must_use]
    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }

    /// Create as Arc for sharing
    pub fn new_shared(transport: T) -> Arc<Self> {
        Arc::new(Self::new(transport))
    }

    /// Name of the transport this publisher was built with
    pub fn transport_name(&self) -> &'static str {
        self.name
    }

    /// Whether [`Publisher::shutdown`] already released the transport
    pub fn is_shut_down(&self) -> bool {
        self.transport.load().is_none()
    }

    /// Publication counters
    pub fn stats(&self) -> PublisherStatsSnapshot {
        self.stats.snapshot()
    }

    /// Publish a client event
    pub async fn on_event(&self, event: &DomainEvent) {
        self.dispatch(SubjectKey::for_client_event(event), serialize(event))
            .await;
    }

    /// Publish an admin event
    pub async fn on_admin_event(&self, event: &AdminDomainEvent, include_representation: bool) {
        self.dispatch(
            SubjectKey::for_admin_event(event),
            serialize_admin(event, include_representation),
        )
        .await;
    }

    /// Publish an owned, queued event
    pub async fn publish(&self, kind: &EventKind) {
        self.dispatch(kind.subject(), kind.payload()).await;
    }

    /// Start a unit of work whose events are published on commit
    pub fn begin(self: &Arc<Self>) -> UnitOfWork<T> {
        UnitOfWork::new(Arc::clone(self))
    }

    async fn dispatch(&self, subject: SubjectKey, payload: String) {
        // Registered before the load so shutdown cannot miss this send
        let _in_flight = self.in_flight.enter();
        let Some(transport) = self.transport.load_full() else {
            self.stats
                .rejected_after_shutdown
                .fetch_add(1, Ordering::Relaxed);
            debug!(subject = %subject, "publisher is shut down, dropping event");
            return;
        };

        match transport.send(&subject, payload.as_bytes()).await {
            Ok(Delivery::Skipped) => {
                self.stats.skipped.fetch_add(1, Ordering::Relaxed);
                trace!(subject = %subject, "transport disabled, event skipped");
            }
            Ok(Delivery::Acknowledged { stream, sequence }) => {
                self.stats.sent.fetch_add(1, Ordering::Relaxed);
                debug!(
                    subject = %subject,
                    stream = %stream,
                    sequence,
                    "published event to durable log"
                );
            }
            Ok(delivery) => {
                self.stats.sent.fetch_add(1, Ordering::Relaxed);
                debug!(
                    subject = %subject,
                    transport = self.name,
                    delivery = ?delivery,
                    "published event"
                );
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                error!(
                    subject = %subject,
                    transport = self.name,
                    error = %e,
                    "could not publish event"
                );
            }
        }
    }

    /// Release the transport
    ///
    /// Idempotent. The first call stops intake, lets in-flight sends finish
    /// and closes the connection; later calls and calls racing with it find
    /// the handle already gone.
    pub async fn shutdown(&self) {
        let Some(transport) = self.transport.swap(None) else {
            debug!(transport = self.name, "publisher already shut down");
            return;
        };

        self.drain().await;
        info!(transport = self.name, "closing event transport");
        if let Err(e) = transport.close().await {
            error!(transport = self.name, error = %e, "could not close event transport");
        }
    }

    async fn drain(&self) {
        let deadline = Instant::now() + self.drain_timeout;
        loop {
            let mut idle = std::pin::pin!(self.in_flight.idle.notified());
            idle.as_mut().enable();
            let pending = self.in_flight.pending();
            if pending == 0 {
                return;
            }
            debug!(transport = self.name, pending, "waiting for in-flight sends");
            if timeout_at(deadline, idle).await.is_err() {
                warn!(
                    transport = self.name,
                    pending = self.in_flight.pending(),
                    timeout = ?self.drain_timeout,
                    "in-flight sends outlived the drain timeout, closing anyway"
                );
                return;
            }
        }
    }
}

impl<T: EventTransport> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("transport", &self.name)
            .field("shut_down", &self.is_shut_down())
            .field("stats", &self.stats.snapshot())
            .field("in_flight", &self.in_flight.pending())
            .finish()
    }
}

#[async_trait]
impl<T: EventTransport + 'static> EventListener for Publisher<T> {
    async fn on_event(&self, event: &DomainEvent) {
        Publisher::on_event(self, event).await;
    }

    async fn on_admin_event(&self, event: &AdminDomainEvent, include_representation: bool) {
        Publisher::on_admin_event(self, event, include_representation).await;
    }
}
