//! Core and JetStream transport tests against the in-process server

use crate::test_utils::{TestNatsServer, respond, vanishing_server};
use futures::StreamExt;
use kna_application::ports::infrastructure::{Delivery, EventTransport};
use kna_domain::error::Error;
use kna_domain::events::DomainEvent;
use kna_domain::value_objects::SubjectKey;
use kna_providers::{ConnectionSettings, JetStreamTransport, NatsCoreTransport, connect};
use std::time::Duration;
use tokio::time::{sleep, timeout};

const SEND_TIMEOUT: Duration = Duration::from_millis(200);
const OUTER_LIMIT: Duration = Duration::from_secs(2);

fn settings(url: String) -> ConnectionSettings {
    ConnectionSettings {
        url,
        client_name: "kna-test".to_string(),
        connect_timeout: Duration::from_secs(1),
    }
}

fn login_subject() -> SubjectKey {
    SubjectKey::for_client_event(&DomainEvent::new("master", "LOGIN").with_client("app"))
}

#[tokio::test]
async fn test_core_send_reaches_subscriber() {
    let server = TestNatsServer::start().await;
    let consumer = async_nats::connect(server.url()).await.expect("consumer");
    let mut events = consumer
        .subscribe("keycloak.event.client.>")
        .await
        .expect("subscribe");
    consumer.flush().await.expect("subscription registered");

    let client = connect(&settings(server.url())).await.expect("connect");
    let transport = NatsCoreTransport::new(client, SEND_TIMEOUT);
    let subject = login_subject();

    let delivery = transport.send(&subject, b"{\"type\":\"LOGIN\"}").await.expect("send");
    assert_eq!(delivery, Delivery::Sent);

    let message = timeout(OUTER_LIMIT, events.next())
        .await
        .expect("message within limit")
        .expect("subscription open");
    assert_eq!(message.subject.as_str(), subject.as_str());
    assert_eq!(&message.payload[..], b"{\"type\":\"LOGIN\"}");

    transport.close().await.expect("close");
}

#[tokio::test]
async fn test_core_send_is_bounded_when_server_vanishes() {
    let client = connect(&settings(vanishing_server().await))
        .await
        .expect("connect");
    let transport = NatsCoreTransport::new(client, SEND_TIMEOUT);
    let subject = login_subject();
    sleep(SEND_TIMEOUT).await;

    // The client queues while disconnected; keep sending until the queue is full
    let mut failure = None;
    for _ in 0..8192 {
        let sent = timeout(OUTER_LIMIT, transport.send(&subject, b"{}"))
            .await
            .expect("send must not outlive its timeout");
        if let Err(e) = sent {
            failure = Some(e);
            break;
        }
    }

    match failure {
        Some(Error::Publish { subject: failed, .. }) => assert_eq!(failed, subject.as_str()),
        other => panic!("expected a bounded publish failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_close_is_bounded_when_server_vanishes() {
    let client = connect(&settings(vanishing_server().await))
        .await
        .expect("connect");
    let transport = NatsCoreTransport::new(client, SEND_TIMEOUT);
    sleep(SEND_TIMEOUT).await;

    let closed = timeout(OUTER_LIMIT, transport.close())
        .await
        .expect("close must not outlive its timeout");

    assert!(
        matches!(closed, Err(Error::Shutdown { .. })),
        "expected a shutdown error, got {closed:?}"
    );
}

#[tokio::test]
async fn test_jetstream_send_returns_stream_ack() {
    let server = TestNatsServer::start().await;
    let _acks = respond(&server.url(), "keycloak.event.client.>", |_| {
        Some(br#"{"stream":"keycloak-client-event-stream","seq":7}"#.to_vec())
    })
    .await;

    let client = connect(&settings(server.url())).await.expect("connect");
    let transport = JetStreamTransport::new(client, SEND_TIMEOUT);

    let delivery = transport.send(&login_subject(), b"{}").await.expect("send");

    assert_eq!(
        delivery,
        Delivery::Acknowledged {
            stream: "keycloak-client-event-stream".to_string(),
            sequence: 7,
        }
    );
    transport.close().await.expect("close");
}

#[tokio::test]
async fn test_jetstream_send_without_ack_fails_within_timeout() {
    let server = TestNatsServer::start().await;
    let _silent = respond(&server.url(), "keycloak.event.client.>", |_| None).await;

    let client = connect(&settings(server.url())).await.expect("connect");
    let transport = JetStreamTransport::new(client, SEND_TIMEOUT);
    let subject = login_subject();

    let sent = timeout(OUTER_LIMIT, transport.send(&subject, b"{}"))
        .await
        .expect("send must not outlive its timeout");

    match sent {
        Err(Error::Publish { subject: failed, message, .. }) => {
            assert_eq!(failed, subject.as_str());
            assert!(message.contains("no JetStream ack"), "{message}");
        }
        other => panic!("expected a publish failure, got {other:?}"),
    }
}
