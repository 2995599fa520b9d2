//! High-level pipeline: reconciles every unsynced, failed or stale mapping with the Provider.
//!
//! This module provides the bulk "sweep" that operators run on a schedule or by hand. For each
//! selected entity kind it:
//!   - Selects candidates from the mapping store (entities with no mapping, plus mappings in
//!     `failed`/`pending`), capped at `max_entities`
//!   - Retries each candidate through the [`IntegrationService`]: `update` when the mapping
//!     already holds a provider id, otherwise `create`, reusing the existing mapping row
//!   - Aggregates per-kind counters and per-entity errors into a [`SyncReport`]
//!
//! # Major Types
//! - [`SweepOptions`]: which kinds and which mapping states to reconcile, and where the report goes
//! - [`SyncReport`]: JSON report with timings, per-kind counters and the error list
//!
//! # Responsibilities
//! - Per-entity failures never abort the sweep; they are recorded and the loop moves on
//! - Store failures and a disabled Provider (outside dry-run) are fatal and returned as errors
//! - Dry-run selects and logs only: no Provider calls and no mapping mutations
//! - Kinds run in dependency order (advertisers before campaigns)
//!
//! # Navigation
//! - Main entrypoint: [`sweep`]
//! - Report output: [`write_report`]

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::SweepDefaults;
use crate::domain::{EntityKind, LocalEntity, MappingContext};
use crate::error::IntegrationError;
use crate::integration::IntegrationService;
use crate::store::{MappingKey, SyncStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SweepOutput {
    #[default]
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOptions {
    pub dry_run: bool,
    pub entity_kinds: Vec<EntityKind>,
    /// Cap on candidates per kind.
    pub max_entities: usize,
    pub include_pending: bool,
    pub include_failed: bool,
    pub include_unsynced: bool,
    pub output: SweepOutput,
}

impl SweepOptions {
    /// Every sweepable kind, with the configured defaults.
    pub fn from_defaults(defaults: &SweepDefaults) -> Self {
        Self {
            dry_run: false,
            entity_kinds: EntityKind::SWEEPABLE.to_vec(),
            max_entities: defaults.default_max_entities,
            include_pending: defaults.default_include_pending,
            include_failed: defaults.default_include_failed,
            include_unsynced: defaults.default_include_unsynced,
            output: SweepOutput::Stdout,
        }
    }
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self::from_defaults(&SweepDefaults::default())
    }
}

/// One entity the sweep could not reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncError {
    pub entity_type: String,
    pub entity_id: i64,
    pub entity_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seconds with millisecond precision, e.g. `"0.042s"`.
    pub duration: String,
    pub advertisers_found: usize,
    pub advertisers_synced: usize,
    pub advertisers_failed: usize,
    pub affiliates_found: usize,
    pub affiliates_synced: usize,
    pub affiliates_failed: usize,
    pub campaigns_found: usize,
    pub campaigns_synced: usize,
    pub campaigns_failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SyncError>,
}

/// Mutable view of one kind's counters.
struct Counters<'a> {
    found: &'a mut usize,
    synced: &'a mut usize,
    failed: &'a mut usize,
}

impl SyncReport {
    fn started(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time: start_time,
            duration: "0.000s".to_string(),
            advertisers_found: 0,
            advertisers_synced: 0,
            advertisers_failed: 0,
            affiliates_found: 0,
            affiliates_synced: 0,
            affiliates_failed: 0,
            campaigns_found: 0,
            campaigns_synced: 0,
            campaigns_failed: 0,
            errors: Vec::new(),
        }
    }

    fn counters(&mut self, kind: EntityKind) -> Option<Counters<'_>> {
        match kind {
            EntityKind::Advertiser => Some(Counters {
                found: &mut self.advertisers_found,
                synced: &mut self.advertisers_synced,
                failed: &mut self.advertisers_failed,
            }),
            EntityKind::Affiliate => Some(Counters {
                found: &mut self.affiliates_found,
                synced: &mut self.affiliates_synced,
                failed: &mut self.affiliates_failed,
            }),
            EntityKind::Campaign => Some(Counters {
                found: &mut self.campaigns_found,
                synced: &mut self.campaigns_synced,
                failed: &mut self.campaigns_failed,
            }),
            EntityKind::TrackingLink => None,
        }
    }

    pub fn total_failed(&self) -> usize {
        self.advertisers_failed + self.affiliates_failed + self.campaigns_failed
    }
}

/// Entrypoint: run one sweep according to `options`.
pub async fn sweep(
    service: &IntegrationService,
    options: &SweepOptions,
    cancel: &CancellationToken,
) -> Result<SyncReport, IntegrationError> {
    let clock = Instant::now();
    let mut report = SyncReport::started(Utc::now());
    info!(
        dry_run = options.dry_run,
        kinds = ?options.entity_kinds,
        max_entities = options.max_entities,
        include_unsynced = options.include_unsynced,
        include_failed = options.include_failed,
        include_pending = options.include_pending,
        "[SWEEP] Starting sweep"
    );

    if !options.dry_run && !service.is_enabled() {
        error!("[SWEEP][ERROR] Provider disabled; refusing to sweep");
        return Err(IntegrationError::ProviderDisabled);
    }

    'kinds: for kind in EntityKind::SWEEPABLE
        .into_iter()
        .filter(|kind| options.entity_kinds.contains(kind))
    {
        // --- Step 1: Select candidates ---
        let candidates = select_candidates(service, kind, options).await?;
        info!(kind = %kind, found = candidates.len(), "[SWEEP] Selected candidates");

        let mut synced = 0;
        let mut failed = 0;
        let mut errors = Vec::new();
        let found = candidates.len();

        // --- Step 2: Reconcile each candidate ---
        for entity in candidates.into_iter().take(options.max_entities) {
            if cancel.is_cancelled() {
                warn!(kind = %kind, "[SWEEP] Cancelled; stopping early");
                flush(&mut report, kind, found, synced, failed, errors);
                break 'kinds;
            }
            let (local_id, name) = (entity.id(), entity.name().to_string());

            if options.dry_run {
                info!(kind = %kind, local_id, name = %name, "[SWEEP][DRY-RUN] Would reconcile");
                synced += 1;
                continue;
            }

            match reconcile(service, entity, cancel).await {
                Ok(()) => {
                    info!(kind = %kind, local_id, "[SWEEP] Reconciled");
                    synced += 1;
                }
                Err(IntegrationError::Store(e)) => {
                    error!(kind = %kind, local_id, error = %e, "[SWEEP][ERROR] Mapping store failed");
                    return Err(IntegrationError::Store(e));
                }
                Err(e) => {
                    warn!(kind = %kind, local_id, error = %e, code = e.code(), "[SWEEP] Entity failed");
                    failed += 1;
                    errors.push(SyncError {
                        entity_type: kind.as_str().to_string(),
                        entity_id: local_id,
                        entity_name: name,
                        error: e.to_string(),
                    });
                }
            }
        }
        flush(&mut report, kind, found, synced, failed, errors);
    }

    // --- Step 3: Close the report ---
    report.end_time = Utc::now();
    report.duration = format!("{:.3}s", clock.elapsed().as_secs_f64());
    info!(
        duration = %report.duration,
        failed = report.total_failed(),
        "[SWEEP] Sweep finished"
    );
    Ok(report)
}

fn flush(
    report: &mut SyncReport,
    kind: EntityKind,
    found: usize,
    synced: usize,
    failed: usize,
    errors: Vec<SyncError>,
) {
    if let Some(counters) = report.counters(kind) {
        *counters.found = found;
        *counters.synced = synced;
        *counters.failed = failed;
    }
    report.errors.extend(errors);
}

/// Unsynced entities first, then failed/pending mappings; deduplicated by id
/// and truncated to `max_entities`.
async fn select_candidates(
    service: &IntegrationService,
    kind: EntityKind,
    options: &SweepOptions,
) -> Result<Vec<LocalEntity>, IntegrationError> {
    let max = options.max_entities;
    let provider_type = service.provider_type();
    let mut seen = BTreeSet::new();
    let mut candidates = Vec::new();
    if max == 0 {
        return Ok(candidates);
    }

    if options.include_unsynced {
        let unsynced = service
            .store()
            .list_unsynced(kind, provider_type, max, 0)
            .await?;
        for entity in unsynced {
            if seen.insert(entity.id()) {
                candidates.push(entity);
            }
        }
    }

    let mut statuses = Vec::new();
    if options.include_failed {
        statuses.push(SyncStatus::Failed);
    }
    if options.include_pending {
        statuses.push(SyncStatus::Pending);
    }
    if !statuses.is_empty() {
        let retry = service
            .store()
            .list_with_status(kind, provider_type, statuses, max, 0)
            .await?;
        for entity in retry {
            if seen.insert(entity.id()) {
                candidates.push(entity);
            }
        }
    }

    candidates.truncate(max);
    Ok(candidates)
}

/// PUT when the mapping already knows the provider id, otherwise POST reusing the mapping.
async fn reconcile(
    service: &IntegrationService,
    entity: LocalEntity,
    cancel: &CancellationToken,
) -> Result<(), IntegrationError> {
    let key = MappingKey::new(entity.kind(), entity.id(), service.provider_type());
    let mapping = service.store().get(key).await?;
    let ctx = MappingContext::default();

    match mapping.and_then(|m| m.provider_entity_id) {
        Some(_) => service.update_in_provider(&entity, &ctx, cancel).await,
        None => service
            .retry_create_in_provider(entity, &ctx, cancel)
            .await
            .map(|_| ()),
    }
}

/// Pretty JSON to stdout or to the given file.
pub fn write_report(report: &SyncReport, output: &SweepOutput) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    match output {
        SweepOutput::Stdout => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")
        }
        SweepOutput::File(path) => {
            std::fs::write(path, format!("{json}\n"))?;
            info!(path = %path.display(), "[SWEEP] Report written");
            Ok(())
        }
    }
}
