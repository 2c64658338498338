//! JetStream Stream Manager
//!
//! Maps durable log descriptors onto JetStream streams. Server error codes
//! are translated so the provisioner can tell "absent" and "created by
//! someone else" apart from real failures.

use async_nats::jetstream::context::{CreateStreamErrorKind, GetStreamErrorKind};
use async_nats::jetstream::stream::Config;
use async_nats::jetstream::{Context, ErrorCode};
use async_trait::async_trait;
use kna_application::ports::infrastructure::DurableLogManager;
use kna_domain::error::{Error, Result};
use kna_domain::value_objects::DurableLogDescriptor;
use tracing::debug;

/// Administers JetStream streams
#[derive(Clone)]
pub struct JetStreamLogManager {
    jetstream: Context,
}

impl JetStreamLogManager {
    /// Create a manager on a JetStream context
    pub fn new(jetstream: Context) -> Self {
        Self { jetstream }
    }
}

impl std::fmt::Debug for JetStreamLogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JetStreamLogManager").finish_non_exhaustive()
    }
}

fn stream_config(descriptor: &DurableLogDescriptor) -> Config {
    Config {
        name: descriptor.name.clone(),
        subjects: vec![descriptor.subject_filter.clone()],
        max_bytes: descriptor.max_bytes,
        ..Default::default()
    }
}

fn descriptor_from(config: &Config) -> DurableLogDescriptor {
    DurableLogDescriptor::new(
        config.name.clone(),
        config.subjects.first().cloned().unwrap_or_default(),
        config.max_bytes,
    )
}

#[async_trait]
impl DurableLogManager for JetStreamLogManager {
    async fn lookup(&self, name: &str) -> Result<Option<DurableLogDescriptor>> {
        match self.jetstream.get_stream(name).await {
            Ok(stream) => Ok(Some(descriptor_from(&stream.cached_info().config))),
            Err(e) => match e.kind() {
                GetStreamErrorKind::JetStream(inner)
                    if inner.error_code() == ErrorCode::STREAM_NOT_FOUND =>
                {
                    debug!(stream = name, "stream does not exist");
                    Ok(None)
                }
                _ => Err(Error::provisioning_with_source(
                    format!("could not look up stream '{name}'"),
                    e,
                )),
            },
        }
    }

    async fn create(&self, descriptor: &DurableLogDescriptor) -> Result<()> {
        match self.jetstream.create_stream(stream_config(descriptor)).await {
            Ok(_) => Ok(()),
            Err(e) => match e.kind() {
                CreateStreamErrorKind::JetStream(inner)
                    if inner.error_code() == ErrorCode::STREAM_NAME_EXIST =>
                {
                    Err(Error::already_exists(descriptor.name.clone()))
                }
                _ => Err(Error::provisioning_with_source(
                    format!("could not create stream '{}'", descriptor.name),
                    e,
                )),
            },
        }
    }

    async fn update(&self, descriptor: &DurableLogDescriptor) -> Result<()> {
        self.jetstream
            .update_stream(stream_config(descriptor))
            .await
            .map_err(|e| {
                Error::provisioning_with_source(
                    format!("could not update stream '{}'", descriptor.name),
                    e,
                )
            })?;
        Ok(())
    }
}
