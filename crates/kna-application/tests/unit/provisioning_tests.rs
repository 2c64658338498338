//! Durable log provisioning tests

use crate::test_utils::InMemoryDurableLogManager;
use kna_application::use_cases::{DurableLogProvisioner, ProvisionOutcome};
use kna_domain::constants::{ADMIN_EVENT_STREAM, CLIENT_EVENT_STREAM};
use kna_domain::value_objects::DurableLogDescriptor;
use std::sync::Arc;

#[tokio::test]
async fn test_ensure_creates_missing_log() {
    let manager = Arc::new(InMemoryDurableLogManager::new());
    let provisioner = DurableLogProvisioner::new(Arc::clone(&manager));

    let outcome = provisioner
        .ensure(&DurableLogDescriptor::admin_events(1))
        .await
        .unwrap();

    assert_eq!(outcome, ProvisionOutcome::Created);
    assert_eq!(manager.logs(), vec![DurableLogDescriptor::admin_events(1)]);
}

#[tokio::test]
async fn test_ensure_twice_updates_instead_of_duplicating() {
    let manager = Arc::new(InMemoryDurableLogManager::new());
    let provisioner = DurableLogProvisioner::new(Arc::clone(&manager));

    provisioner
        .ensure(&DurableLogDescriptor::client_events(1))
        .await
        .unwrap();
    let outcome = provisioner
        .ensure(&DurableLogDescriptor::client_events(8))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ProvisionOutcome::Updated {
            previous_max_bytes: 1_048_576
        }
    );
    let logs = manager.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].max_bytes, 8 * 1_048_576);
    assert_eq!(manager.create_count(), 1);
    assert_eq!(manager.update_count(), 1);
}

#[tokio::test]
async fn test_lost_create_race_is_success() {
    let manager = Arc::new(InMemoryDurableLogManager::racing());
    let provisioner = DurableLogProvisioner::new(Arc::clone(&manager));

    let outcome = provisioner
        .ensure(&DurableLogDescriptor::admin_events(1))
        .await
        .unwrap();

    assert_eq!(outcome, ProvisionOutcome::CreatedConcurrently);
    assert_eq!(manager.logs().len(), 1);
}

#[tokio::test]
async fn test_update_failure_is_reported() {
    let manager = Arc::new(InMemoryDurableLogManager::rejecting_updates());
    let provisioner = DurableLogProvisioner::new(Arc::clone(&manager));
    provisioner
        .ensure(&DurableLogDescriptor::admin_events(1))
        .await
        .unwrap();

    let result = provisioner
        .ensure(&DurableLogDescriptor::admin_events(2))
        .await;

    assert!(matches!(
        result,
        Err(kna_domain::Error::Provisioning { .. })
    ));
}

#[tokio::test]
async fn test_ensure_all_provisions_both_logs() {
    let manager = Arc::new(InMemoryDurableLogManager::new());
    let provisioner = DurableLogProvisioner::new(Arc::clone(&manager));

    provisioner.ensure_all(2, 4).await.unwrap();

    let logs = manager.logs();
    let names: Vec<&str> = logs.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec![ADMIN_EVENT_STREAM, CLIENT_EVENT_STREAM]);
    assert_eq!(logs[0].max_bytes, 2 * 1_048_576);
    assert_eq!(logs[1].max_bytes, 4 * 1_048_576);
}

#[tokio::test]
async fn test_provisioner_over_trait_object() {
    let manager: Arc<dyn kna_application::ports::infrastructure::DurableLogManager> =
        Arc::new(InMemoryDurableLogManager::new());
    let provisioner = DurableLogProvisioner::new(manager);

    assert!(provisioner.ensure_all(1, 1).await.is_ok());
}
