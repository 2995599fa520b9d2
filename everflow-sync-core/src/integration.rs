//! # integration: per-entity Provider operations
//!
//! [`IntegrationService`] is the entry point for everything that touches the
//! Provider on behalf of a single local entity: create, update and read-through
//! for advertisers, affiliates and campaigns, plus tracking-link issuance and
//! tagging. It drives a mapping through its states:
//!
//! ```text
//! absent ──create── pending ──success── synced
//!                      └──── failure ── failed
//! synced ──update── synced | failed (provider id kept)
//! failed ──create/update── synced
//! ```
//!
//! Every attempt, successful or not, leaves its request and response in the
//! mapping's payload. Cancellation is the one exception: a cancelled create
//! stays `pending` for the sweeper, a cancelled update leaves the mapping as it was.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::client::{HttpMethod, HttpProviderClient, ProviderClient, StubProviderClient};
use crate::config::{CoreConfig, ProviderType};
use crate::domain::{
    Advertiser, Affiliate, Campaign, EntityKind, LocalEntity, MappingContext, TrackingLinkInput,
};
use crate::error::{IntegrationError, StoreError};
use crate::mapper::tracking::{to_tracking_request, TRACKING_LINK_PATH};
use crate::mapper::{
    parse_provider_id, AdvertiserMapper, AffiliateMapper, CampaignMapper, EntityMapper, MergeOrigin,
};
use crate::reporting::ReportingClient;
use crate::store::{MappingKey, MappingStore, Operation, ProviderMapping, SyncPayload, SyncStatus};
use crate::wire::tracking::TrackingLinkResponse;
use crate::wire::{TagsRequest, WireBody};

/// A Provider-issued tracking URL. Not persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingLink {
    pub generated_url: String,
    /// The Provider's full reply, for callers that want to record it.
    pub provider_data: Value,
}

/// What to do with a mapping that is already `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingPolicy {
    Refuse,
    TakeOver,
}

pub struct IntegrationService {
    client: Option<Arc<dyn ProviderClient>>,
    store: Arc<dyn MappingStore>,
    provider_type: ProviderType,
}

impl IntegrationService {
    /// `client = None` disables every Provider-facing operation.
    pub fn new(
        client: Option<Arc<dyn ProviderClient>>,
        store: Arc<dyn MappingStore>,
        provider_type: ProviderType,
    ) -> Self {
        Self {
            client,
            store,
            provider_type,
        }
    }

    /// Picks the stub in mock mode, the HTTP client when a key is configured,
    /// and no client otherwise.
    pub fn from_config(
        config: &CoreConfig,
        store: Arc<dyn MappingStore>,
    ) -> Result<Self, IntegrationError> {
        let provider = &config.provider;
        let client: Option<Arc<dyn ProviderClient>> = if provider.mock_mode {
            info!("[INTEGRATION] Mock mode: using in-process provider stub");
            Some(Arc::new(StubProviderClient::default()))
        } else if provider.is_enabled() {
            Some(Arc::new(HttpProviderClient::from_config(provider)?))
        } else {
            warn!("[INTEGRATION] Provider disabled; provider-facing operations will fail");
            None
        };
        Ok(Self::new(client, store, provider.provider_type))
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn provider_type(&self) -> ProviderType {
        self.provider_type
    }

    pub fn store(&self) -> &Arc<dyn MappingStore> {
        &self.store
    }

    /// Reporting client sharing this service's Provider client.
    pub fn reporting(&self) -> ReportingClient {
        ReportingClient::new(self.client.clone())
    }

    fn client(&self) -> Result<&Arc<dyn ProviderClient>, IntegrationError> {
        self.client.as_ref().ok_or(IntegrationError::ProviderDisabled)
    }

    fn key(&self, kind: EntityKind, local_id: i64) -> MappingKey {
        MappingKey::new(kind, local_id, self.provider_type)
    }

    async fn load_mapping(&self, key: MappingKey) -> Result<Option<ProviderMapping>, IntegrationError> {
        let mapping = self.store.get(key).await?;
        if let Some(mapping) = &mapping {
            mapping.check_invariants()?;
        }
        Ok(mapping)
    }

    /// Provider id of a synced mapping, or `NotSynced`.
    async fn synced_provider_id(&self, kind: EntityKind, local_id: i64) -> Result<i64, IntegrationError> {
        let not_synced = IntegrationError::NotSynced { kind, local_id };
        let mapping = self
            .load_mapping(self.key(kind, local_id))
            .await?
            .filter(ProviderMapping::is_synced)
            .ok_or(not_synced)?;
        match mapping.provider_entity_id.as_deref() {
            Some(pid) => parse_provider_id(kind, pid),
            None => Err(IntegrationError::NotSynced { kind, local_id }),
        }
    }

    async fn record_failure(
        &self,
        mut mapping: ProviderMapping,
        operation: Operation,
        request: Value,
        response: Value,
        err: &IntegrationError,
    ) -> Result<(), IntegrationError> {
        mapping.sync_status = Some(SyncStatus::Failed);
        mapping.sync_error = Some(err.to_string());
        mapping.payload = Some(SyncPayload {
            last_request: Some(request),
            last_response: Some(response),
            provider_id: mapping.provider_entity_id.clone(),
            last_operation: operation,
            last_operation_time: Utc::now(),
        });
        self.store.update(mapping).await?;
        Ok(())
    }

    async fn create_with<M: EntityMapper>(
        &self,
        mapper: &M,
        local: M::Local,
        ctx: &MappingContext,
        pending: PendingPolicy,
        cancel: &CancellationToken,
    ) -> Result<M::Local, IntegrationError> {
        let client = self.client()?;
        let local_id = M::local_id(&local);
        let kind = M::KIND;
        let key = self.key(kind, local_id);

        let existing = self.load_mapping(key).await?;
        match existing.as_ref().and_then(|m| m.sync_status) {
            Some(SyncStatus::Synced) => {
                return Err(IntegrationError::AlreadySynced { kind, local_id });
            }
            Some(SyncStatus::Pending) if pending == PendingPolicy::Refuse => {
                return Err(IntegrationError::CreationInFlight { kind, local_id });
            }
            _ => {}
        }

        let request = mapper.to_create_request(&local, ctx)?.encode()?;

        let mut mapping = match existing {
            Some(mut mapping) => {
                info!(kind = %kind, local_id, previous = ?mapping.sync_status, "[INTEGRATION] Reusing mapping for create");
                mapping.sync_status = Some(SyncStatus::Pending);
                self.store.update(mapping.clone()).await?;
                mapping
            }
            None => {
                let mapping = ProviderMapping::pending(key);
                match self.store.create(mapping.clone()).await {
                    Err(StoreError::AlreadyExists { .. }) => {
                        return Err(IntegrationError::CreationInFlight { kind, local_id });
                    }
                    other => other?,
                }
                mapping
            }
        };

        let response = match client
            .call(HttpMethod::Post, M::COLLECTION_PATH, Some(request.clone()), cancel)
            .await
        {
            Ok(response) => response,
            Err(IntegrationError::Cancelled) => {
                warn!(kind = %kind, local_id, "[INTEGRATION] Create cancelled; mapping left pending");
                return Err(IntegrationError::Cancelled);
            }
            Err(e) => {
                error!(kind = %kind, local_id, error = %e, "[INTEGRATION] Provider create failed");
                self.record_failure(mapping, Operation::Create, request, error_body(&e), &e)
                    .await?;
                return Err(IntegrationError::CreateFailed {
                    kind,
                    cause: Box::new(e),
                });
            }
        };

        let wire = match M::Response::decode(&response.body) {
            Ok(wire) => wire,
            Err(e) => {
                let err = IntegrationError::MalformedResponse(e);
                mapping.provider_entity_id = M::raw_provider_id(&response.body);
                error!(
                    kind = %kind,
                    local_id,
                    error = %err,
                    provider_id = ?mapping.provider_entity_id,
                    "[INTEGRATION] Create response rejected"
                );
                self.record_failure(mapping, Operation::Create, request, response.body, &err)
                    .await?;
                return Err(IntegrationError::CreateFailed {
                    kind,
                    cause: Box::new(err),
                });
            }
        };

        let provider_id = M::provider_id(&wire);
        let now = Utc::now();
        mapping.provider_entity_id = Some(provider_id.clone());
        mapping.sync_status = Some(SyncStatus::Synced);
        mapping.sync_error = None;
        mapping.last_sync_at = Some(now);
        mapping.payload = Some(SyncPayload {
            last_request: Some(request),
            last_response: Some(response.body),
            provider_id: Some(provider_id.clone()),
            last_operation: Operation::Create,
            last_operation_time: now,
        });
        self.store.update(mapping).await?;
        info!(kind = %kind, local_id, provider_id = %provider_id, "[INTEGRATION] Created in provider");

        Ok(mapper.merge_response(&wire, local, MergeOrigin::Write))
    }

    async fn update_with<M: EntityMapper>(
        &self,
        mapper: &M,
        local: &M::Local,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<(), IntegrationError> {
        let client = self.client()?;
        let local_id = M::local_id(local);
        let kind = M::KIND;

        let mut mapping = self
            .load_mapping(self.key(kind, local_id))
            .await?
            .filter(|m| m.provider_entity_id.is_some())
            .ok_or(IntegrationError::NotSynced { kind, local_id })?;
        let provider_id = parse_provider_id(
            kind,
            mapping.provider_entity_id.as_deref().unwrap_or_default(),
        )?;

        let request = mapper.to_update_request(local, ctx)?.encode()?;
        let path = format!("{}/{}", M::COLLECTION_PATH, provider_id);

        let response = match client
            .call(HttpMethod::Put, &path, Some(request.clone()), cancel)
            .await
        {
            Ok(response) => response,
            Err(IntegrationError::Cancelled) => {
                warn!(kind = %kind, local_id, "[INTEGRATION] Update cancelled; mapping unchanged");
                return Err(IntegrationError::Cancelled);
            }
            Err(e) => {
                error!(kind = %kind, local_id, error = %e, "[INTEGRATION] Provider update failed");
                self.record_failure(mapping, Operation::Update, request, error_body(&e), &e)
                    .await?;
                return Err(IntegrationError::UpdateFailed {
                    kind,
                    cause: Box::new(e),
                });
            }
        };

        let now = Utc::now();
        mapping.sync_status = Some(SyncStatus::Synced);
        mapping.sync_error = None;
        mapping.last_sync_at = Some(now);
        mapping.payload = Some(SyncPayload {
            last_request: Some(request),
            last_response: Some(response.body),
            provider_id: mapping.provider_entity_id.clone(),
            last_operation: Operation::Update,
            last_operation_time: now,
        });
        self.store.update(mapping).await?;
        info!(kind = %kind, local_id, provider_id, "[INTEGRATION] Updated in provider");
        Ok(())
    }

    async fn get_with<M: EntityMapper>(
        &self,
        mapper: &M,
        local_id: i64,
        cancel: &CancellationToken,
    ) -> Result<M::Local, IntegrationError> {
        let client = self.client()?;
        let kind = M::KIND;

        let mut mapping = self
            .load_mapping(self.key(kind, local_id))
            .await?
            .filter(|m| m.provider_entity_id.is_some())
            .ok_or(IntegrationError::NotSynced { kind, local_id })?;
        let provider_id = parse_provider_id(
            kind,
            mapping.provider_entity_id.as_deref().unwrap_or_default(),
        )?;
        let local = self
            .store
            .get_entity(kind, local_id)
            .await?
            .and_then(M::from_entity)
            .ok_or(IntegrationError::EntityNotFound { kind, local_id })?;

        let path = format!("{}/{}", M::COLLECTION_PATH, provider_id);
        let outcome = client.call(HttpMethod::Get, &path, None, cancel).await;

        // Reads refresh the payload only; sync status belongs to writes.
        let (response, result) = match outcome {
            Err(IntegrationError::Cancelled) => return Err(IntegrationError::Cancelled),
            Err(e) => (error_body(&e), Err(e)),
            Ok(response) => match M::Response::decode(&response.body) {
                Ok(wire) => (response.body, Ok(wire)),
                Err(e) => (response.body, Err(IntegrationError::MalformedResponse(e))),
            },
        };
        mapping.payload = Some(SyncPayload {
            last_request: None,
            last_response: Some(response),
            provider_id: mapping.provider_entity_id.clone(),
            last_operation: Operation::Get,
            last_operation_time: Utc::now(),
        });
        self.store.update(mapping).await?;

        match result {
            Ok(wire) => Ok(mapper.merge_response(&wire, local, MergeOrigin::Read)),
            Err(e) => {
                error!(kind = %kind, local_id, error = %e, "[INTEGRATION] Provider read failed");
                Err(e)
            }
        }
    }

    pub async fn create_advertiser(
        &self,
        advertiser: Advertiser,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<Advertiser, IntegrationError> {
        self.create_with(&AdvertiserMapper, advertiser, ctx, PendingPolicy::Refuse, cancel)
            .await
    }

    pub async fn update_advertiser(
        &self,
        advertiser: &Advertiser,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<(), IntegrationError> {
        self.update_with(&AdvertiserMapper, advertiser, ctx, cancel).await
    }

    pub async fn get_advertiser(
        &self,
        local_id: i64,
        cancel: &CancellationToken,
    ) -> Result<Advertiser, IntegrationError> {
        self.get_with(&AdvertiserMapper, local_id, cancel).await
    }

    pub async fn create_affiliate(
        &self,
        affiliate: Affiliate,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<Affiliate, IntegrationError> {
        self.create_with(&AffiliateMapper, affiliate, ctx, PendingPolicy::Refuse, cancel)
            .await
    }

    pub async fn update_affiliate(
        &self,
        affiliate: &Affiliate,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<(), IntegrationError> {
        self.update_with(&AffiliateMapper, affiliate, ctx, cancel).await
    }

    pub async fn get_affiliate(
        &self,
        local_id: i64,
        cancel: &CancellationToken,
    ) -> Result<Affiliate, IntegrationError> {
        self.get_with(&AffiliateMapper, local_id, cancel).await
    }

    /// Fills `network_advertiser_id` from the campaign's advertiser mapping
    /// unless the caller already supplied it.
    async fn campaign_context(
        &self,
        campaign: &Campaign,
        ctx: &MappingContext,
    ) -> Result<MappingContext, IntegrationError> {
        let mut ctx = ctx.clone();
        if ctx.network_advertiser_id.is_none() {
            ctx.network_advertiser_id = Some(
                self.synced_provider_id(EntityKind::Advertiser, campaign.advertiser_id)
                    .await?,
            );
        }
        Ok(ctx)
    }

    pub async fn create_campaign(
        &self,
        campaign: Campaign,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<Campaign, IntegrationError> {
        self.create_campaign_with(campaign, ctx, PendingPolicy::Refuse, cancel)
            .await
    }

    async fn create_campaign_with(
        &self,
        campaign: Campaign,
        ctx: &MappingContext,
        pending: PendingPolicy,
        cancel: &CancellationToken,
    ) -> Result<Campaign, IntegrationError> {
        self.client()?;
        let ctx = self.campaign_context(&campaign, ctx).await?;
        self.create_with(&CampaignMapper, campaign, &ctx, pending, cancel)
            .await
    }

    pub async fn update_campaign(
        &self,
        campaign: &Campaign,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<(), IntegrationError> {
        self.client()?;
        let ctx = self.campaign_context(campaign, ctx).await?;
        self.update_with(&CampaignMapper, campaign, &ctx, cancel).await
    }

    pub async fn get_campaign(
        &self,
        local_id: i64,
        cancel: &CancellationToken,
    ) -> Result<Campaign, IntegrationError> {
        self.get_with(&CampaignMapper, local_id, cancel).await
    }

    async fn create_entity(
        &self,
        entity: LocalEntity,
        ctx: &MappingContext,
        pending: PendingPolicy,
        cancel: &CancellationToken,
    ) -> Result<LocalEntity, IntegrationError> {
        match entity {
            LocalEntity::Advertiser(a) => self
                .create_with(&AdvertiserMapper, a, ctx, pending, cancel)
                .await
                .map(LocalEntity::Advertiser),
            LocalEntity::Affiliate(a) => self
                .create_with(&AffiliateMapper, a, ctx, pending, cancel)
                .await
                .map(LocalEntity::Affiliate),
            LocalEntity::Campaign(c) => self
                .create_campaign_with(c, ctx, pending, cancel)
                .await
                .map(LocalEntity::Campaign),
        }
    }

    /// Create any local entity in the Provider. A `pending` mapping is refused
    /// with `CreationInFlight`; a `failed` one is reused.
    pub async fn create_in_provider(
        &self,
        entity: LocalEntity,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<LocalEntity, IntegrationError> {
        self.create_entity(entity, ctx, PendingPolicy::Refuse, cancel)
            .await
    }

    /// Like [`create_in_provider`](Self::create_in_provider) but takes over a
    /// stale `pending` mapping instead of refusing it. Used by the sweeper.
    pub async fn retry_create_in_provider(
        &self,
        entity: LocalEntity,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<LocalEntity, IntegrationError> {
        self.create_entity(entity, ctx, PendingPolicy::TakeOver, cancel)
            .await
    }

    pub async fn update_in_provider(
        &self,
        entity: &LocalEntity,
        ctx: &MappingContext,
        cancel: &CancellationToken,
    ) -> Result<(), IntegrationError> {
        match entity {
            LocalEntity::Advertiser(a) => self.update_advertiser(a, ctx, cancel).await,
            LocalEntity::Affiliate(a) => self.update_affiliate(a, ctx, cancel).await,
            LocalEntity::Campaign(c) => self.update_campaign(c, ctx, cancel).await,
        }
    }

    pub async fn get_from_provider(
        &self,
        kind: EntityKind,
        local_id: i64,
        cancel: &CancellationToken,
    ) -> Result<LocalEntity, IntegrationError> {
        match kind {
            EntityKind::Advertiser => self
                .get_advertiser(local_id, cancel)
                .await
                .map(LocalEntity::Advertiser),
            EntityKind::Affiliate => self
                .get_affiliate(local_id, cancel)
                .await
                .map(LocalEntity::Affiliate),
            EntityKind::Campaign => self
                .get_campaign(local_id, cancel)
                .await
                .map(LocalEntity::Campaign),
            EntityKind::TrackingLink => Err(IntegrationError::InvalidEntity(
                "tracking links have no provider mapping".into(),
            )),
        }
    }

    /// Issue a tracking link for a synced (affiliate, campaign) pair.
    pub async fn create_tracking_link(
        &self,
        input: &TrackingLinkInput,
        cancel: &CancellationToken,
    ) -> Result<TrackingLink, IntegrationError> {
        let client = self.client()?;
        let affiliate = self
            .synced_provider_id(EntityKind::Affiliate, input.affiliate_id)
            .await?;
        let offer = self
            .synced_provider_id(EntityKind::Campaign, input.campaign_id)
            .await?;

        let request = to_tracking_request(input, affiliate, offer).encode()?;
        let response = client
            .call(HttpMethod::Post, TRACKING_LINK_PATH, Some(request), cancel)
            .await?;
        let wire = TrackingLinkResponse::decode(&response.body)?;
        info!(
            affiliate_id = input.affiliate_id,
            campaign_id = input.campaign_id,
            "[INTEGRATION] Tracking link issued"
        );
        Ok(TrackingLink {
            generated_url: wire.tracking_url,
            provider_data: response.body,
        })
    }

    /// Attach tags to a synced advertiser or campaign. Nothing is recorded in the mapping.
    pub async fn add_tags(
        &self,
        kind: EntityKind,
        local_id: i64,
        tags: Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<(), IntegrationError> {
        let collection = match kind {
            EntityKind::Advertiser => AdvertiserMapper::COLLECTION_PATH,
            EntityKind::Campaign => CampaignMapper::COLLECTION_PATH,
            other => {
                return Err(IntegrationError::InvalidEntity(format!(
                    "{other} does not support tags"
                )))
            }
        };
        let client = self.client()?;
        let provider_id = self.synced_provider_id(kind, local_id).await?;
        let body = TagsRequest::new(tags).encode()?;
        client
            .call(
                HttpMethod::Post,
                &format!("{collection}/{provider_id}/tags"),
                Some(body),
                cancel,
            )
            .await?;
        info!(kind = %kind, local_id, "[INTEGRATION] Tags added");
        Ok(())
    }
}

/// Payload body for a failed call. Provider 4xx bodies are kept verbatim,
/// parsed when they are JSON.
fn error_body(err: &IntegrationError) -> Value {
    match err {
        IntegrationError::ProviderRejected { body, .. } => {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
        }
        other => json!({ "error": other.to_string() }),
    }
}
