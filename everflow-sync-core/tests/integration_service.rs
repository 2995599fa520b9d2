use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use everflow_sync_core::client::{HttpMethod, MockProviderClient, ProviderResponse};
use everflow_sync_core::config::ProviderType;
use everflow_sync_core::domain::{
    Advertiser, Affiliate, Campaign, EntityKind, EntityStatus, LocalEntity, MappingContext,
    TrackingLinkInput,
};
use everflow_sync_core::error::{IntegrationError, WireError};
use everflow_sync_core::integration::IntegrationService;
use everflow_sync_core::store::{
    InMemoryMappingStore, MappingKey, MappingStore, Operation, ProviderMapping, SyncStatus,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn acme() -> Advertiser {
    Advertiser::new(42, 7, "Acme", EntityStatus::Active)
}

fn key(kind: EntityKind, local_id: i64) -> MappingKey {
    MappingKey::new(kind, local_id, ProviderType::Everflow)
}

fn service(client: MockProviderClient, store: Arc<InMemoryMappingStore>) -> IntegrationService {
    IntegrationService::new(Some(Arc::new(client)), store, ProviderType::Everflow)
}

fn synced(kind: EntityKind, local_id: i64, provider_id: &str) -> ProviderMapping {
    let mut mapping = ProviderMapping::pending(key(kind, local_id));
    mapping.sync_status = Some(SyncStatus::Synced);
    mapping.provider_entity_id = Some(provider_id.to_string());
    mapping
}

fn advertiser_reply(id: i64) -> ProviderResponse {
    ProviderResponse::new(200, json!({ "network_advertiser_id": id }))
}

#[tokio::test]
async fn fresh_advertiser_create_persists_synced_mapping() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, body, _| {
            let body = body.as_ref().expect("create carries a body");
            *method == HttpMethod::Post
                && path == "/networks/advertisers"
                && body["name"] == "Acme"
                && body["account_status"] == "active"
        })
        .times(1)
        .returning(|_, _, _, _| Ok(advertiser_reply(999)));

    let svc = service(client, store.clone());
    let returned = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .expect("create should succeed");
    assert_eq!(returned.id, 42);
    assert_eq!(returned.status, EntityStatus::Active);

    let mapping = store
        .get(key(EntityKind::Advertiser, 42))
        .await
        .unwrap()
        .expect("mapping persisted");
    assert_eq!(mapping.local_entity_id, 42);
    assert_eq!(mapping.provider_type, ProviderType::Everflow);
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("999"));
    assert_eq!(mapping.sync_status, Some(SyncStatus::Synced));
    assert!(mapping.sync_error.is_none());
    assert!(mapping.last_sync_at.is_some());

    let payload = mapping.payload.expect("payload recorded");
    assert_eq!(payload.last_operation, Operation::Create);
    assert_eq!(payload.provider_id.as_deref(), Some("999"));
    assert_eq!(payload.last_request.unwrap()["name"], "Acme");
    assert_eq!(payload.last_response.unwrap()["network_advertiser_id"], 999);
}

#[tokio::test]
async fn duplicate_create_is_rejected_without_provider_call() {
    let store = Arc::new(InMemoryMappingStore::new());
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();
    // No expectations: any call panics.
    let svc = service(MockProviderClient::new(), store.clone());

    let err = svc
        .create_in_provider(
            LocalEntity::Advertiser(acme()),
            &MappingContext::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IntegrationError::AlreadySynced { kind: EntityKind::Advertiser, local_id: 42 }
    ));
    assert_eq!(store.mappings().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_create_records_error_and_payload() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .times(1)
        .returning(|_, _, _, _| Err(IntegrationError::ProviderTransient("status 500: boom".into())));

    let svc = service(client, store.clone());
    let err = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::CreateFailed { kind: EntityKind::Advertiser, .. }));
    assert!(matches!(err.root_cause(), IntegrationError::ProviderTransient(_)));
    assert!(err.is_retryable());

    let mapping = store
        .get(key(EntityKind::Advertiser, 42))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert!(mapping.sync_error.as_deref().unwrap().contains("boom"));
    assert!(mapping.provider_entity_id.is_none());
    let payload = mapping.payload.unwrap();
    assert_eq!(payload.last_operation, Operation::Create);
    assert_eq!(payload.last_request.unwrap()["name"], "Acme");
}

#[tokio::test]
async fn rejected_body_is_kept_verbatim() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client.expect_call().times(1).returning(|_, _, _, _| {
        Err(IntegrationError::ProviderRejected {
            status: 422,
            body: r#"{"error":"name taken","code":7}"#.to_string(),
        })
    });

    let svc = service(client, store.clone());
    let err = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(!err.is_retryable());

    let mapping = store
        .get(key(EntityKind::Advertiser, 42))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert_eq!(
        mapping.payload.unwrap().last_response,
        Some(json!({ "error": "name taken", "code": 7 }))
    );
}

#[tokio::test]
async fn response_without_provider_id_fails_the_create() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client.expect_call().times(1).returning(|_, _, _, _| {
        Ok(ProviderResponse::new(
            200,
            json!({ "name": "Acme", "account_status": "active" }),
        ))
    });

    let svc = service(client, store.clone());
    let err = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    match err.root_cause() {
        IntegrationError::MalformedResponse(WireError::MissingRequiredField(field)) => {
            assert_eq!(field, "network_advertiser_id")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let mapping = store
        .get(key(EntityKind::Advertiser, 42))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert!(mapping.provider_entity_id.is_none());
    assert_eq!(mapping.payload.unwrap().last_response.unwrap()["name"], "Acme");
}

#[tokio::test]
async fn undecodable_create_reply_still_records_the_provider_id() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client.expect_call().times(1).returning(|_, _, _, _| {
        Ok(ProviderResponse::new(
            200,
            json!({ "network_advertiser_id": 999, "brand_new_field": true }),
        ))
    });

    let svc = service(client, store.clone());
    let err = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        IntegrationError::MalformedResponse(WireError::UnknownField(_))
    ));

    let mapping = store
        .get(key(EntityKind::Advertiser, 42))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("999"));
    assert_eq!(mapping.payload.unwrap().provider_id.as_deref(), Some("999"));
}

#[tokio::test]
async fn update_before_create_is_not_synced() {
    let store = Arc::new(InMemoryMappingStore::new());
    let svc = service(MockProviderClient::new(), store.clone());

    let err = svc
        .update_advertiser(
            &Advertiser::new(43, 7, "Never Created", EntityStatus::Active),
            &MappingContext::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IntegrationError::NotSynced { kind: EntityKind::Advertiser, local_id: 43 }
    ));
    assert!(store.mappings().unwrap().is_empty());
}

#[tokio::test]
async fn last_update_envelope_wins() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, _, _, _| *method == HttpMethod::Post)
        .times(1)
        .returning(|_, _, _, _| Ok(advertiser_reply(999)));
    client
        .expect_call()
        .withf(|method, path, _, _| *method == HttpMethod::Put && path == "/networks/advertisers/999")
        .times(2)
        .returning(|_, _, _, _| Ok(ProviderResponse::new(200, json!({ "result": true }))));

    let svc = service(client, store.clone());
    let ctx = MappingContext::default();
    let cancel = CancellationToken::new();
    let mut advertiser = svc.create_advertiser(acme(), &ctx, &cancel).await.unwrap();

    advertiser.name = "Acme 2".into();
    svc.update_advertiser(&advertiser, &ctx, &cancel).await.unwrap();
    advertiser.name = "Acme 3".into();
    svc.update_advertiser(&advertiser, &ctx, &cancel).await.unwrap();

    let mappings = store.mappings().unwrap();
    assert_eq!(mappings.len(), 1);
    let mapping = &mappings[0];
    assert_eq!(mapping.sync_status, Some(SyncStatus::Synced));
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("999"));
    let payload = mapping.payload.as_ref().unwrap();
    assert_eq!(payload.last_operation, Operation::Update);
    assert_eq!(payload.last_request.as_ref().unwrap()["name"], "Acme 3");
    assert!(payload.last_request.as_ref().unwrap().get("users").is_none());
    assert_eq!(payload.last_response, Some(json!({ "result": true })));
}

#[tokio::test]
async fn failed_update_keeps_provider_id() {
    let store = Arc::new(InMemoryMappingStore::new());
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .times(1)
        .returning(|_, path, _, _| {
            Err(IntegrationError::ProviderNotFound { path: path.to_string() })
        });

    let svc = service(client, store.clone());
    let err = svc
        .update_advertiser(&acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::UpdateFailed { .. }));
    assert!(matches!(err.root_cause(), IntegrationError::ProviderNotFound { .. }));

    let mapping = store
        .get(key(EntityKind::Advertiser, 42))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Failed));
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("999"));
    assert_eq!(mapping.payload.unwrap().last_operation, Operation::Update);
}

#[tokio::test]
async fn cancelled_create_stays_pending_until_taken_over() {
    let store = Arc::new(InMemoryMappingStore::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let mut client = MockProviderClient::new();
    client.expect_call().times(2).returning(move |_, _, _, _| {
        match seen.fetch_add(1, Ordering::SeqCst) {
            0 => Err(IntegrationError::Cancelled),
            _ => Ok(advertiser_reply(1001)),
        }
    });

    let svc = service(client, store.clone());
    let ctx = MappingContext::default();
    let cancel = CancellationToken::new();
    let entity = LocalEntity::Advertiser(acme());

    let err = svc
        .create_in_provider(entity.clone(), &ctx, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::Cancelled));
    let mapping = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Pending));

    // A second caller sees the in-flight create and backs off.
    let err = svc
        .create_in_provider(entity.clone(), &ctx, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::CreationInFlight { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    svc.retry_create_in_provider(entity, &ctx, &cancel)
        .await
        .expect("recovery create succeeds");
    let mappings = store.mappings().unwrap();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].sync_status, Some(SyncStatus::Synced));
    assert_eq!(mappings[0].provider_entity_id.as_deref(), Some("1001"));
}

#[tokio::test]
async fn disabled_provider_fails_fast_without_mutation() {
    let store = Arc::new(InMemoryMappingStore::new());
    let svc = IntegrationService::new(None, store.clone(), ProviderType::Everflow);
    assert!(!svc.is_enabled());

    let err = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::ProviderDisabled));
    assert_eq!(err.code(), "PROVIDER_DISABLED");
    assert!(store.mappings().unwrap().is_empty());
}

#[tokio::test]
async fn broken_mapping_surfaces_invariant_violation() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut broken = ProviderMapping::pending(key(EntityKind::Advertiser, 42));
    broken.sync_status = Some(SyncStatus::Synced);
    store.create(broken).await.unwrap();

    let svc = service(MockProviderClient::new(), store);
    let err = svc
        .create_advertiser(acme(), &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::MappingInvariantViolation(_)));
}

#[tokio::test]
async fn campaign_create_resolves_advertiser_provider_id() {
    let store = Arc::new(InMemoryMappingStore::new());
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, body, _| {
            let body = body.as_ref().unwrap();
            *method == HttpMethod::Post
                && path == "/networks/offers"
                && body["network_advertiser_id"] == 999
                && body["offer_status"] == "pending"
                && body["payout_revenue"][0]["is_default"] == true
        })
        .times(1)
        .returning(|_, _, _, _| {
            Ok(ProviderResponse::new(
                200,
                json!({
                    "network_offer_id": 20,
                    "name": "Spring Sale",
                    "offer_status": "pending",
                    "preview_url": "https://acme.example/preview"
                }),
            ))
        });

    let mut campaign = Campaign::new(11, 7, 42, "Spring Sale", EntityStatus::Draft);
    campaign.destination_url = Some("https://acme.example/landing".into());

    let svc = service(client, store.clone());
    let created = svc
        .create_campaign(campaign, &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(created.status, EntityStatus::Draft);
    assert_eq!(created.preview_url.as_deref(), Some("https://acme.example/preview"));

    let mapping = store.get(key(EntityKind::Campaign, 11)).await.unwrap().unwrap();
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("20"));
}

#[tokio::test]
async fn campaign_without_synced_advertiser_is_not_synced() {
    let store = Arc::new(InMemoryMappingStore::new());
    let svc = service(MockProviderClient::new(), store.clone());
    let mut campaign = Campaign::new(11, 7, 42, "Spring Sale", EntityStatus::Active);
    campaign.destination_url = Some("https://acme.example/landing".into());

    let err = svc
        .create_campaign(campaign, &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IntegrationError::NotSynced { kind: EntityKind::Advertiser, local_id: 42 }
    ));
    assert!(store.mappings().unwrap().is_empty());
}

#[tokio::test]
async fn campaign_without_destination_is_rejected_locally() {
    let store = Arc::new(InMemoryMappingStore::new());
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();
    let svc = service(MockProviderClient::new(), store.clone());

    let err = svc
        .create_campaign(
            Campaign::new(11, 7, 42, "No URL", EntityStatus::Active),
            &MappingContext::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::InvalidEntity(_)));
    assert!(store.get(key(EntityKind::Campaign, 11)).await.unwrap().is_none());
}

#[tokio::test]
async fn affiliate_create_sends_employee_and_billing_defaults() {
    let store = Arc::new(InMemoryMappingStore::new());
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, body, _| {
            let body = body.as_ref().unwrap();
            *method == HttpMethod::Post
                && path == "/networks/affiliates"
                && body["network_employee_id"] == 1
                && body["billing"]["billing_frequency"] == "monthly"
                && body["billing"]["payment_type"] == "none"
        })
        .times(1)
        .returning(|_, _, _, _| {
            Ok(ProviderResponse::new(
                200,
                json!({ "network_affiliate_id": 8 }),
            ))
        });

    let svc = service(client, store.clone());
    let affiliate = Affiliate::new(5, 7, "Traffic Co", EntityStatus::Active);
    svc.create_affiliate(affiliate, &MappingContext::default(), &CancellationToken::new())
        .await
        .unwrap();

    let mapping = store.get(key(EntityKind::Affiliate, 5)).await.unwrap().unwrap();
    assert_eq!(mapping.provider_entity_id.as_deref(), Some("8"));
}

#[tokio::test]
async fn read_through_merges_provider_values_and_keeps_status() {
    let mut local = acme();
    local.default_currency_id = Some("USD".into());
    let store = Arc::new(InMemoryMappingStore::with_entities([LocalEntity::Advertiser(local)]));
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();

    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, body, _| {
            *method == HttpMethod::Get && path == "/networks/advertisers/999" && body.is_none()
        })
        .times(1)
        .returning(|_, _, _, _| {
            Ok(ProviderResponse::new(
                200,
                json!({
                    "network_advertiser_id": 999,
                    "name": "Acme",
                    "account_status": "inactive",
                    "default_currency_id": "EUR"
                }),
            ))
        });

    let svc = service(client, store.clone());
    let entity = svc
        .get_from_provider(EntityKind::Advertiser, 42, &CancellationToken::new())
        .await
        .unwrap();
    let LocalEntity::Advertiser(advertiser) = entity else {
        panic!("expected an advertiser");
    };
    assert_eq!(advertiser.status, EntityStatus::Inactive);
    assert_eq!(advertiser.default_currency_id.as_deref(), Some("EUR"));

    let mapping = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Synced));
    assert!(mapping.last_sync_at.is_none());
    let payload = mapping.payload.unwrap();
    assert_eq!(payload.last_operation, Operation::Get);
    assert!(payload.last_request.is_none());
}

#[tokio::test]
async fn read_through_without_status_keeps_local_status() {
    let store = Arc::new(InMemoryMappingStore::with_entities([LocalEntity::Advertiser(acme())]));
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();

    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .times(1)
        .returning(|_, _, _, _| Ok(advertiser_reply(999)));

    let svc = service(client, store.clone());
    let LocalEntity::Advertiser(advertiser) = svc
        .get_from_provider(EntityKind::Advertiser, 42, &CancellationToken::new())
        .await
        .unwrap()
    else {
        panic!("expected an advertiser");
    };
    assert_eq!(advertiser.status, EntityStatus::Active);
    assert_eq!(advertiser.name, "Acme");
}

#[tokio::test]
async fn read_through_not_found_leaves_status_alone() {
    let store = Arc::new(InMemoryMappingStore::with_entities([LocalEntity::Advertiser(acme())]));
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();
    let mut client = MockProviderClient::new();
    client.expect_call().times(1).returning(|_, path, _, _| {
        Err(IntegrationError::ProviderNotFound { path: path.to_string() })
    });

    let svc = service(client, store.clone());
    let err = svc
        .get_advertiser(42, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::ProviderNotFound { .. }));

    let mapping = store.get(key(EntityKind::Advertiser, 42)).await.unwrap().unwrap();
    assert_eq!(mapping.sync_status, Some(SyncStatus::Synced));
    assert_eq!(mapping.payload.unwrap().last_operation, Operation::Get);
}

#[tokio::test]
async fn tracking_link_uses_both_provider_ids() {
    let store = Arc::new(InMemoryMappingStore::new());
    store.create(synced(EntityKind::Affiliate, 5, "8")).await.unwrap();
    store.create(synced(EntityKind::Campaign, 11, "20")).await.unwrap();

    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, body, _| {
            *method == HttpMethod::Post
                && path == "/networks/tracking/offers/clicks"
                && body.as_ref()
                    == Some(&json!({
                        "network_affiliate_id": 8,
                        "network_offer_id": 20,
                        "sub1": "facebook",
                        "sub3": "media_buying",
                        "is_encrypt_parameters": true
                    }))
        })
        .times(1)
        .returning(|_, _, _, _| {
            Ok(ProviderResponse::new(
                200,
                json!({ "tracking_url": "https://trk.example/abc123" }),
            ))
        });

    let mut input = TrackingLinkInput::new(5, 11);
    input.sub1 = Some("facebook".into());
    input.sub3 = Some("media_buying".into());
    input.is_encrypt_parameters = Some(true);

    let svc = service(client, store.clone());
    let link = svc
        .create_tracking_link(&input, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(link.generated_url, "https://trk.example/abc123");
    assert_eq!(link.provider_data, json!({ "tracking_url": "https://trk.example/abc123" }));
    assert_eq!(store.mappings().unwrap().len(), 2);
}

#[tokio::test]
async fn tracking_link_requires_synced_campaign() {
    let store = Arc::new(InMemoryMappingStore::new());
    store.create(synced(EntityKind::Affiliate, 5, "8")).await.unwrap();
    let svc = service(MockProviderClient::new(), store);

    let err = svc
        .create_tracking_link(&TrackingLinkInput::new(5, 11), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IntegrationError::NotSynced { kind: EntityKind::Campaign, local_id: 11 }
    ));
}

#[tokio::test]
async fn tags_go_to_the_provider_entity() {
    let store = Arc::new(InMemoryMappingStore::new());
    store
        .create(synced(EntityKind::Advertiser, 42, "999"))
        .await
        .unwrap();
    let mut client = MockProviderClient::new();
    client
        .expect_call()
        .withf(|method, path, body, _| {
            *method == HttpMethod::Post
                && path == "/networks/advertisers/999/tags"
                && body.as_ref() == Some(&json!({ "tags": ["vip", "q3"] }))
        })
        .times(1)
        .returning(|_, _, _, _| Ok(ProviderResponse::new(200, json!({ "result": true }))));

    let svc = service(client, store.clone());
    svc.add_tags(
        EntityKind::Advertiser,
        42,
        vec!["vip".into(), "q3".into()],
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    let err = svc
        .add_tags(EntityKind::Affiliate, 5, vec!["x".into()], &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, IntegrationError::InvalidEntity(_)));
}
