//! NATS Streaming Transport
//!
//! Publishes to a legacy NATS Streaming (STAN) cluster. The streaming
//! protocol runs over core NATS request/reply: a session is opened through
//! the cluster's discovery subject, every publish is a protobuf request
//! answered by a [`PubAck`](protocol::PubAck), and the session is closed
//! with an explicit close request.
//!
//! While connected, the server pings the client on a private heartbeat
//! inbox. A background task answers those pings until the transport is
//! closed; it is the only task the adapter spawns.

pub mod protocol;

use crate::connection::close_client;
use async_nats::{Client, Subject};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use kna_application::ports::infrastructure::{Delivery, EventTransport};
use kna_domain::error::{Error, Result};
use kna_domain::value_objects::SubjectKey;
use prost::Message;
use protocol::{
    CloseRequest, CloseResponse, ConnectRequest, ConnectResponse, PROTOCOL_VERSION, PubAck,
    PubMsg, discover_subject,
};
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Streaming session parameters
#[derive(Debug, Clone)]
pub struct StreamingSettings {
    /// Cluster to join
    pub cluster_id: String,
    /// Client id, unique within the cluster
    pub client_id: String,
    /// Upper bound for each request to the cluster
    pub request_timeout: Duration,
}

/// Publishes through a NATS Streaming session
pub struct LegacyStreamTransport {
    client: Client,
    client_id: String,
    conn_id: Vec<u8>,
    pub_prefix: String,
    close_requests: String,
    request_timeout: Duration,
    heartbeat: AbortHandle,
}

impl LegacyStreamTransport {
    /// Open a streaming session on an established core connection
    pub async fn connect(client: Client, settings: &StreamingSettings) -> Result<Self> {
        let heartbeat_inbox = client.new_inbox();
        let heartbeats = client
            .subscribe(heartbeat_inbox.clone())
            .await
            .map_err(|e| {
                Error::connection_with_source("could not subscribe to streaming heartbeats", e)
            })?;
        let heartbeat = tokio::spawn(answer_heartbeats(client.clone(), heartbeats)).abort_handle();

        match Self::handshake(&client, settings, heartbeat_inbox).await {
            Ok((response, conn_id)) => {
                info!(
                    cluster_id = %settings.cluster_id,
                    client_id = %settings.client_id,
                    "Connected to NATS Streaming cluster"
                );
                Ok(Self {
                    client,
                    client_id: settings.client_id.clone(),
                    conn_id,
                    pub_prefix: response.pub_prefix,
                    close_requests: response.close_requests,
                    request_timeout: settings.request_timeout,
                    heartbeat,
                })
            }
            Err(e) => {
                heartbeat.abort();
                Err(e)
            }
        }
    }

    async fn handshake(
        client: &Client,
        settings: &StreamingSettings,
        heartbeat_inbox: String,
    ) -> Result<(ConnectResponse, Vec<u8>)> {
        let conn_id = Uuid::new_v4().simple().to_string().into_bytes();
        let request = ConnectRequest {
            client_id: settings.client_id.clone(),
            heartbeat_inbox,
            protocol: PROTOCOL_VERSION,
            conn_id: conn_id.clone(),
            ping_interval: 0,
            ping_max_out: 0,
        };

        let subject = discover_subject(&settings.cluster_id);
        let reply = timeout(
            settings.request_timeout,
            client.request(subject, request.encode_to_vec().into()),
        )
        .await
        .map_err(|_| {
            Error::connection(format!(
                "NATS Streaming cluster '{}' did not answer within {:?}",
                settings.cluster_id, settings.request_timeout
            ))
        })?
        .map_err(|e| Error::connection_with_source("NATS Streaming connect request failed", e))?;

        let response = ConnectResponse::decode(reply.payload).map_err(|e| {
            Error::connection_with_source("malformed NATS Streaming connect response", e)
        })?;
        if !response.error.is_empty() {
            return Err(Error::connection(format!(
                "NATS Streaming cluster refused connection: {}",
                response.error
            )));
        }
        Ok((response, conn_id))
    }

    async fn end_session(&self) -> Result<()> {
        let request = CloseRequest {
            client_id: self.client_id.clone(),
        };
        let reply = timeout(
            self.request_timeout,
            self.client.request(
                self.close_requests.clone(),
                request.encode_to_vec().into(),
            ),
        )
        .await
        .map_err(|_| Error::shutdown("NATS Streaming close request timed out"))?
        .map_err(|e| Error::shutdown_with_source("NATS Streaming close request failed", e))?;

        let response = CloseResponse::decode(reply.payload)
            .map_err(|e| Error::shutdown_with_source("malformed NATS Streaming close response", e))?;
        if !response.error.is_empty() {
            return Err(Error::shutdown(format!(
                "NATS Streaming cluster refused close: {}",
                response.error
            )));
        }
        Ok(())
    }
}

async fn answer_heartbeats(client: Client, mut heartbeats: async_nats::Subscriber) {
    while let Some(message) = heartbeats.next().await {
        if let Some(reply) = message.reply {
            answer(&client, reply).await;
        }
    }
    debug!("streaming heartbeat subscription ended");
}

async fn answer(client: &Client, reply: Subject) {
    if let Err(e) = client.publish(reply, Bytes::new()).await {
        warn!(error = %e, "could not answer streaming heartbeat");
    }
}

impl std::fmt::Debug for LegacyStreamTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LegacyStreamTransport")
            .field("client_id", &self.client_id)
            .field("pub_prefix", &self.pub_prefix)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Drop for LegacyStreamTransport {
    fn drop(&mut self) {
        self.heartbeat.abort();
    }
}

#[async_trait]
impl EventTransport for LegacyStreamTransport {
    fn name(&self) -> &'static str {
        "streaming"
    }

    async fn send(&self, subject: &SubjectKey, payload: &[u8]) -> Result<Delivery> {
        let message = PubMsg {
            client_id: self.client_id.clone(),
            guid: Uuid::new_v4().to_string(),
            subject: subject.to_string(),
            reply: String::new(),
            data: payload.to_vec(),
            conn_id: self.conn_id.clone(),
            sha256: Vec::new(),
        };

        let reply = timeout(
            self.request_timeout,
            self.client.request(
                format!("{}.{}", self.pub_prefix, subject),
                message.encode_to_vec().into(),
            ),
        )
        .await
        .map_err(|_| {
            Error::publish(
                subject.as_str(),
                format!("no NATS Streaming ack within {:?}", self.request_timeout),
            )
        })?
        .map_err(|e| {
            Error::publish_with_source(subject.as_str(), "NATS Streaming publish failed", e)
        })?;

        let ack = PubAck::decode(reply.payload).map_err(|e| {
            Error::publish_with_source(subject.as_str(), "malformed NATS Streaming ack", e)
        })?;
        if !ack.error.is_empty() {
            return Err(Error::publish(subject.as_str(), ack.error));
        }
        Ok(Delivery::Confirmed { guid: ack.guid })
    }

    async fn close(&self) -> Result<()> {
        self.heartbeat.abort();
        let session = self.end_session().await;
        let connection = close_client(&self.client, self.request_timeout).await;
        session.and(connection)
    }
}
