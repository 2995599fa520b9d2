use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use everflow_sync_core::client::{HttpMethod, MockProviderClient, ProviderResponse};
use everflow_sync_core::config::{CoreConfig, ProviderType};
use everflow_sync_core::domain::{
    Advertiser, Affiliate, Campaign, EntityKind, EntityStatus, LocalEntity, MappingContext,
};
use everflow_sync_core::error::{IntegrationError, StoreError};
use everflow_sync_core::integration::IntegrationService;
use everflow_sync_core::store::{
    InMemoryMappingStore, MappingKey, MappingStore, MockMappingStore, ProviderMapping, SyncStatus,
};
use everflow_sync_core::sweep::{sweep, write_report, SweepOptions, SweepOutput, SyncReport};
use serde_json::json;
use tempfile::tempdir;
use tokio_util::sync::CancellationToken;

fn advertisers(ids: impl IntoIterator<Item = i64>) -> Vec<LocalEntity> {
    ids.into_iter()
        .map(|id| {
            LocalEntity::Advertiser(Advertiser::new(
                id,
                7,
                format!("Advertiser {id}"),
                EntityStatus::Active,
            ))
        })
        .collect()
}

fn options(kinds: &[EntityKind], max_entities: usize) -> SweepOptions {
    SweepOptions {
        dry_run: false,
        entity_kinds: kinds.to_vec(),
        max_entities,
        include_pending: true,
        include_failed: true,
        include_unsynced: true,
        output: SweepOutput::Stdout,
    }
}

fn key(kind: EntityKind, local_id: i64) -> MappingKey {
    MappingKey::new(kind, local_id, ProviderType::Everflow)
}

/// Answers every POST with a fresh advertiser id and counts the calls.
fn counting_client(calls: Arc<AtomicUsize>) -> MockProviderClient {
    let next_id = AtomicI64::new(900);
    let mut client = MockProviderClient::new();
    client.expect_call().returning(move |_, _, body, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        let body = body.unwrap_or_default();
        Ok(ProviderResponse::new(
            200,
            json!({
                "network_advertiser_id": next_id.fetch_add(1, Ordering::SeqCst),
                "name": body["name"],
                "account_status": body["account_status"],
            }),
        ))
    });
    client
}

#[tokio::test]
async fn failed_create_is_recovered_by_sweep_without_duplicates() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([42])));
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, _, _| *method == HttpMethod::Post && path == "/networks/advertisers")
        .times(2)
        .returning(move |_, _, _, _| match seen.fetch_add(1, Ordering::SeqCst) {
            0 => Err(IntegrationError::ProviderTransient("status 500: upstream".into())),
            _ => Ok(ProviderResponse::new(
                200,
                json!({ "network_advertiser_id": 999, "name": "Advertiser 42", "account_status": "active" }),
            )),
        });
    let svc = IntegrationService::new(Some(Arc::new(client)), store.clone(), ProviderType::Everflow);
    let cancel = CancellationToken::new();

    let entity = advertisers([42]).remove(0);
    svc.create_in_provider(entity, &MappingContext::default(), &cancel)
        .await
        .unwrap_err();
    let mapping = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert!(mapping.sync_error.is_some());

    let mut opts = options(&[EntityKind::Advertiser], 10);
    opts.include_unsynced = false;
    let report = sweep(&svc, &opts, &cancel).await.unwrap();
    assert_eq!(report.advertisers_found, 1);
    assert_eq!(report.advertisers_synced, 1);
    assert_eq!(report.advertisers_failed, 0);
    assert!(report.errors.is_empty());

    let mappings = store.mappings().unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].sync_status, Some(SyncStatus::Synced));
    assert_eq!(mappings[0].provider_entity_id.as_deref(), Some("999"));
    assert!(mappings[0].sync_error.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn undecodable_create_reply_is_recovered_with_put_not_a_second_post() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([42])));
    let posts = Arc::new(AtomicUsize::new(0));
    let puts = Arc::new(AtomicUsize::new(0));
    let (seen_posts, seen_puts) = (posts.clone(), puts.clone());
    let mut client = MockProviderClient::new();
    client.expect_call().returning(move |method, path, _, _| match method {
        HttpMethod::Post => {
            seen_posts.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderResponse::new(
                201,
                json!({ "network_advertiser_id": 999, "brand_new_field": "x" }),
            ))
        }
        HttpMethod::Put => {
            assert_eq!(path, "/networks/advertisers/999");
            seen_puts.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderResponse::new(200, json!({ "result": true })))
        }
        other => panic!("unexpected {other:?} {path}"),
    });
    let svc = IntegrationService::new(Some(Arc::new(client)), store.clone(), ProviderType::Everflow);
    let cancel = CancellationToken::new();

    svc.create_in_provider(advertisers([42]).remove(0), &MappingContext::default(), &cancel)
        .await
        .unwrap_err();
    let mapping = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("999"));

    let report = sweep(&svc, &options(&[EntityKind::Advertiser], 10), &cancel)
        .await
        .unwrap();
    assert_eq!(report.advertisers_synced, 1);
    assert_eq!(report.advertisers_failed, 0);

    assert_eq!(posts.load(Ordering::SeqCst), 1);
    assert_eq!(puts.load(Ordering::SeqCst), 1);
    let mappings = store.mappings().unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].sync_status, Some(SyncStatus::Synced));
    assert_eq!(mappings[0].provider_entity_id.as_deref(), Some("999"));
}

#[tokio::test]
async fn dry_run_touches_nothing() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([1, 2, 3])));
    // No expectations: any Provider call panics.
    let svc = IntegrationService::new(
        Some(Arc::new(MockProviderClient::new())),
        store.clone(),
        ProviderType::Everflow,
    );

    let mut opts = options(&[EntityKind::Advertiser], 10);
    opts.dry_run = true;
    let report = sweep(&svc, &opts, &CancellationToken::new()).await.unwrap();

    assert_eq!(report.advertisers_found, 3);
    assert_eq!(report.advertisers_synced, 3);
    assert_eq!(report.advertisers_failed, 0);
    assert!(store.mappings().unwrap().is_empty());
}

#[tokio::test]
async fn dry_run_works_with_provider_disabled() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([1])));
    let svc = IntegrationService::new(None, store.clone(), ProviderType::Everflow);

    let mut opts = options(&EntityKind::SWEEPABLE, 10);
    opts.dry_run = true;
    let report = sweep(&svc, &opts, &CancellationToken::new()).await.unwrap();
    assert_eq!(report.advertisers_synced, 1);
    assert!(store.mappings().unwrap().is_empty());
}

#[tokio::test]
async fn disabled_provider_is_fatal_outside_dry_run() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([1])));
    let svc = IntegrationService::new(None, store, ProviderType::Everflow);

    let err = sweep(&svc, &options(&EntityKind::SWEEPABLE, 10), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::ProviderDisabled));
}

#[tokio::test]
async fn max_entities_bounds_work_per_kind() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers(1..=5)));
    let calls = Arc::new(AtomicUsize::new(0));
    let svc = IntegrationService::new(
        Some(Arc::new(counting_client(calls.clone()))),
        store.clone(),
        ProviderType::Everflow,
    );

    let report = sweep(&svc, &options(&[EntityKind::Advertiser], 2), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.advertisers_found, 2);
    assert_eq!(report.advertisers_synced, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let mut ids: Vec<i64> = store.mappings().unwrap().iter().map(|m| m.local_entity_id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn per_entity_failures_do_not_abort_the_sweep() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([1, 2, 3])));
    let mut client = MockProviderClient::new();
    client.expect_call().times(3).returning(|_, _, body, _| {
        let body = body.unwrap_or_default();
        if body["name"] == "Advertiser 2" {
            return Err(IntegrationError::ProviderRejected {
                status: 422,
                body: r#"{"error":"invalid billing"}"#.into(),
            });
        }
        Ok(ProviderResponse::new(
            200,
            json!({ "network_advertiser_id": 500, "name": body["name"], "account_status": "active" }),
        ))
    });
    let svc = IntegrationService::new(Some(Arc::new(client)), store.clone(), ProviderType::Everflow);

    let report = sweep(&svc, &options(&[EntityKind::Advertiser], 10), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.advertisers_found, 3);
    assert_eq!(report.advertisers_synced, 2);
    assert_eq!(report.advertisers_failed, 1);
    assert_eq!(report.total_failed(), 1);
    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.entity_type, "advertiser");
    assert_eq!(error.entity_id, 2);
    assert_eq!(error.entity_name, "Advertiser 2");
    assert!(error.error.contains("invalid billing"));

    let failed = store.get(key(EntityKind::Advertiser, 2)).await.unwrap().unwrap();
    assert_eq!(failed.sync_status, Some(SyncStatus::Failed));
}

#[tokio::test]
async fn synced_before_mapping_in_failed_state_is_retried_with_put() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([42])));
    let mut mapping = ProviderMapping::pending(key(EntityKind::Advertiser, 42));
    mapping.sync_status = Some(SyncStatus::Failed);
    mapping.sync_error = Some("provider unavailable".into());
    mapping.provider_entity_id = Some("999".into());
    store.create(mapping).await.unwrap();

    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, _, _| *method == HttpMethod::Put && path == "/networks/advertisers/999")
        .times(1)
        .returning(|_, _, _, _| Ok(ProviderResponse::new(200, json!({ "result": true }))));
    let svc = IntegrationService::new(Some(Arc::new(client)), store.clone(), ProviderType::Everflow);

    let report = sweep(&svc, &options(&[EntityKind::Advertiser], 10), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.advertisers_synced, 1);
    let mapping = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Synced));
    assert!(mapping.sync_error.is_none());
}

#[tokio::test]
async fn stale_pending_mapping_is_taken_over() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([42])));
    store
        .create(ProviderMapping::pending(key(EntityKind::Advertiser, 42)))
        .await
        .unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let svc = IntegrationService::new(
        Some(Arc::new(counting_client(calls.clone()))),
        store.clone(),
        ProviderType::Everflow,
    );

    let mut opts = options(&[EntityKind::Advertiser], 10);
    opts.include_failed = false;
    opts.include_unsynced = false;
    let report = sweep(&svc, &opts, &CancellationToken::new()).await.unwrap();
    assert_eq!(report.advertisers_synced, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.mappings().unwrap().len(), 1);
    assert!(store.mappings().unwrap()[0].is_synced());
}

#[tokio::test]
async fn unreachable_store_is_fatal() {
    let mut store = MockMappingStore::new();
    store
        .expect_list_unsynced()
        .returning(|_, _, _, _| Err(StoreError::Unavailable("connection refused".into())));
    let svc = IntegrationService::new(
        Some(Arc::new(MockProviderClient::new())),
        Arc::new(store),
        ProviderType::Everflow,
    );

    let err = sweep(&svc, &options(&[EntityKind::Advertiser], 10), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn cancelled_sweep_stops_before_calling_provider() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([1, 2, 3])));
    let svc = IntegrationService::new(
        Some(Arc::new(MockProviderClient::new())),
        store.clone(),
        ProviderType::Everflow,
    );
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = sweep(&svc, &options(&EntityKind::SWEEPABLE, 10), &cancel)
        .await
        .unwrap();
    assert_eq!(report.advertisers_found, 3);
    assert_eq!(report.advertisers_synced, 0);
    assert_eq!(report.affiliates_found, 0);
    assert!(store.mappings().unwrap().is_empty());
}

#[tokio::test]
async fn mock_mode_sweep_syncs_every_kind_in_dependency_order() {
    let mut campaign = Campaign::new(11, 7, 42, "Spring Sale", EntityStatus::Active);
    campaign.destination_url = Some("https://acme.example/landing".into());
    let store = Arc::new(InMemoryMappingStore::with_entities([
        LocalEntity::Campaign(campaign),
        LocalEntity::Affiliate(Affiliate::new(5, 7, "Traffic Co", EntityStatus::Active)),
        LocalEntity::Advertiser(Advertiser::new(42, 7, "Acme", EntityStatus::Active)),
    ]));

    let mut config = CoreConfig::default();
    config.provider.mock_mode = true;
    let svc = IntegrationService::from_config(&config, store.clone()).unwrap();
    assert!(svc.is_enabled());

    let report = sweep(
        &svc,
        &SweepOptions::from_defaults(&config.sweep),
        &CancellationToken::new(),
    )
    .await
    .unwrap();
    assert_eq!(
        (report.advertisers_synced, report.affiliates_synced, report.campaigns_synced),
        (1, 1, 1)
    );
    assert_eq!(report.total_failed(), 0);

    let mappings = store.mappings().unwrap();
    assert_eq!(mappings.len(), 3);
    assert!(mappings.iter().all(ProviderMapping::is_synced));
    let campaign = store.get(key(EntityKind::Campaign, 11)).await.unwrap().unwrap();
    let request = campaign.payload.unwrap().last_request.unwrap();
    let advertiser = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(
        request["network_advertiser_id"].to_string(),
        advertiser.provider_entity_id.unwrap()
    );
}

#[tokio::test]
async fn report_is_written_as_pretty_json() {
    let store = Arc::new(InMemoryMappingStore::with_entities(advertisers([1])));
    let svc = IntegrationService::new(None, store, ProviderType::Everflow);
    let mut opts = options(&[EntityKind::Advertiser], 10);
    opts.dry_run = true;
    let report = sweep(&svc, &opts, &CancellationToken::new()).await.unwrap();
    assert!(report.duration.ends_with('s'));

    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    write_report(&report, &SweepOutput::File(path.clone())).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"advertisers_found\": 1"));
    assert!(!raw.contains("\"errors\""));
    let parsed: SyncReport = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, report);
}
