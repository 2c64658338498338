//! Publisher tests

use crate::test_utils::{RecordingTransport, SharedTransport};
use kna_application::ports::host::EventListener;
use kna_application::use_cases::{Publisher, PublisherStatsSnapshot};
use kna_domain::events::{AdminDomainEvent, DomainEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;

fn login() -> DomainEvent {
    DomainEvent::new("my.realm", "LOGIN").with_client("app 1")
}

#[tokio::test]
async fn test_on_event_publishes_subject_and_payload() {
    let transport = SharedTransport::default();
    let publisher = Publisher::new(transport.clone());

    publisher.on_event(&login()).await;

    assert_eq!(
        transport.0.subjects(),
        vec!["keycloak.event.client.myrealm.success.app_1.login"]
    );
    let payload: serde_json::Value = serde_json::from_str(&transport.0.payloads()[0]).unwrap();
    assert_eq!(payload["realmId"], "my.realm");
    assert_eq!(publisher.stats().sent, 1);
}

#[tokio::test]
async fn test_on_admin_event_respects_representation_flag() {
    let transport = SharedTransport::default();
    let publisher = Publisher::new(transport.clone());
    let event = AdminDomainEvent::new("test", "USER", "CREATE").with_representation("{}");

    publisher.on_admin_event(&event, false).await;
    publisher.on_admin_event(&event, true).await;

    let payloads = transport.0.payloads();
    let first: serde_json::Value = serde_json::from_str(&payloads[0]).unwrap();
    let second: serde_json::Value = serde_json::from_str(&payloads[1]).unwrap();
    assert!(first["representation"].is_null());
    assert_eq!(second["representation"], "{}");
    assert_eq!(
        transport.0.subjects()[0],
        "keycloak.event.admin.test.success.user.create"
    );
}

#[tokio::test]
async fn test_publish_failure_is_swallowed_and_counted() {
    let transport = SharedTransport::new(RecordingTransport::failing_on(".admin."));
    let publisher = Publisher::new(transport.clone());

    publisher
        .on_admin_event(&AdminDomainEvent::new("test", "USER", "DELETE"), false)
        .await;
    publisher.on_event(&login()).await;

    assert_eq!(transport.0.subjects().len(), 1);
    assert_eq!(
        publisher.stats(),
        PublisherStatsSnapshot {
            sent: 1,
            failed: 1,
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn test_shutdown_twice_closes_once() {
    let transport = SharedTransport::default();
    let publisher = Publisher::new(transport.clone());

    publisher.shutdown().await;
    publisher.shutdown().await;

    assert!(publisher.is_shut_down());
    assert_eq!(transport.0.close_count(), 1);
}

#[tokio::test]
async fn test_intake_after_shutdown_is_a_no_op() {
    let transport = SharedTransport::default();
    let publisher = Publisher::new(transport.clone());
    publisher.shutdown().await;

    publisher.on_event(&login()).await;
    publisher
        .on_admin_event(&AdminDomainEvent::new("test", "USER", "DELETE"), true)
        .await;

    assert!(transport.0.subjects().is_empty());
    assert_eq!(publisher.stats().rejected_after_shutdown, 2);
}

#[tokio::test]
async fn test_shutdown_does_not_cut_an_in_flight_send() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let transport = SharedTransport::new(RecordingTransport::gated(
        Arc::clone(&entered),
        Arc::clone(&release),
    ));
    let publisher = Publisher::new_shared(transport.clone());

    let in_flight = {
        let publisher = Arc::clone(&publisher);
        tokio::spawn(async move { publisher.on_event(&login()).await })
    };
    entered.notified().await;

    let shutdown = {
        let publisher = Arc::clone(&publisher);
        tokio::spawn(async move { publisher.shutdown().await })
    };
    sleep(Duration::from_millis(50)).await;
    assert!(publisher.is_shut_down());
    assert_eq!(transport.0.close_count(), 0, "closed under an in-flight send");

    release.notify_one();
    in_flight.await.unwrap();
    shutdown.await.unwrap();

    assert_eq!(transport.0.subjects().len(), 1);
    assert_eq!(publisher.stats().failed, 0);
    assert_eq!(transport.0.close_count(), 1);
}

#[tokio::test]
async fn test_shutdown_closes_after_drain_timeout() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let transport = SharedTransport::new(RecordingTransport::gated(
        Arc::clone(&entered),
        Arc::clone(&release),
    ));
    let publisher = Arc::new(
        Publisher::new(transport.clone()).with_drain_timeout(Duration::from_millis(50)),
    );

    let stuck = {
        let publisher = Arc::clone(&publisher);
        tokio::spawn(async move { publisher.on_event(&login()).await })
    };
    entered.notified().await;

    tokio::time::timeout(Duration::from_secs(2), publisher.shutdown())
        .await
        .expect("shutdown is bounded by the drain timeout");
    assert_eq!(transport.0.close_count(), 1);

    release.notify_one();
    stuck.await.unwrap();
    assert_eq!(publisher.stats().failed, 1);
}

#[tokio::test]
async fn test_concurrent_intake_from_many_tasks() {
    let transport = SharedTransport::default();
    let publisher = Publisher::new_shared(transport.clone());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let publisher = Arc::clone(&publisher);
            tokio::spawn(async move {
                let event = DomainEvent::new("master", "LOGIN").with_client(format!("c{i}"));
                publisher.on_event(&event).await;
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(transport.0.subjects().len(), 32);
    assert_eq!(publisher.stats().sent, 32);
}

#[tokio::test]
async fn test_publisher_as_host_listener() {
    let transport = SharedTransport::default();
    let listener: Arc<dyn EventListener> = Publisher::new_shared(transport.clone());

    listener.on_event(&login()).await;

    assert_eq!(transport.0.subjects().len(), 1);
}

#[tokio::test]
async fn test_host_event_is_not_consumed() {
    let transport = SharedTransport::default();
    let publisher = Publisher::new(transport);
    let event = login();
    let before = event.clone();

    publisher.on_event(&event).await;

    assert_eq!(event, before);
}
