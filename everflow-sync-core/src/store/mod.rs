//! # store: durable provider mappings
//!
//! The core owns one [`ProviderMapping`] per (kind, local entity, provider type)
//! and persists it through the [`MappingStore`] trait. Every operation must be
//! atomic with respect to concurrent readers of the same mapping.
//!
//! ## Implementations
//! - [`InMemoryMappingStore`]: mutex-guarded maps, seeded with local entities.
//! - [`FileMappingStore`]: the in-memory store written through to a JSON snapshot.
//! - `MockMappingStore`: generated by mockall for tests.

mod file;
mod memory;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ProviderType;
use crate::domain::{EntityKind, LocalEntity};
use crate::error::{IntegrationError, StoreError};

pub use file::{FileMappingStore, Snapshot};
pub use memory::InMemoryMappingStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Pending,
    Synced,
    Failed,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "pending",
            SyncStatus::Synced => "synced",
            SyncStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Get,
}

/// Identifies a mapping. Doubles as the mapping id: there is at most one
/// mapping per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MappingKey {
    pub kind: EntityKind,
    pub local_entity_id: i64,
    pub provider_type: ProviderType,
}

impl MappingKey {
    pub fn new(kind: EntityKind, local_entity_id: i64, provider_type: ProviderType) -> Self {
        Self {
            kind,
            local_entity_id,
            provider_type,
        }
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.provider_type, self.kind, self.local_entity_id)
    }
}

/// Post-mortem record of the most recent provider call for a mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub last_request: Option<Value>,
    pub last_response: Option<Value>,
    pub provider_id: Option<String>,
    pub last_operation: Operation,
    pub last_operation_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMapping {
    pub kind: EntityKind,
    pub local_entity_id: i64,
    pub provider_type: ProviderType,
    pub provider_entity_id: Option<String>,
    /// `None` is the absent state: the row exists but no create was attempted.
    pub sync_status: Option<SyncStatus>,
    pub sync_error: Option<String>,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub payload: Option<SyncPayload>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProviderMapping {
    /// Fresh mapping in the `pending` state, inserted before the outbound create.
    pub fn pending(key: MappingKey) -> Self {
        let now = Utc::now();
        Self {
            kind: key.kind,
            local_entity_id: key.local_entity_id,
            provider_type: key.provider_type,
            provider_entity_id: None,
            sync_status: Some(SyncStatus::Pending),
            sync_error: None,
            last_sync_at: None,
            payload: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn key(&self) -> MappingKey {
        MappingKey::new(self.kind, self.local_entity_id, self.provider_type)
    }

    pub fn is_synced(&self) -> bool {
        self.sync_status == Some(SyncStatus::Synced)
    }

    /// Synced mappings carry a provider id; failed mappings carry an error.
    pub fn check_invariants(&self) -> Result<(), IntegrationError> {
        match self.sync_status {
            Some(SyncStatus::Synced) if self.provider_entity_id.is_none() => {
                Err(IntegrationError::MappingInvariantViolation(format!(
                    "mapping {} is synced without a provider id",
                    self.key()
                )))
            }
            Some(SyncStatus::Failed) if self.sync_error.is_none() => {
                Err(IntegrationError::MappingInvariantViolation(format!(
                    "mapping {} is failed without a sync error",
                    self.key()
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait MappingStore: Send + Sync {
    async fn get(&self, key: MappingKey) -> Result<Option<ProviderMapping>, StoreError>;

    /// Fails with [`StoreError::AlreadyExists`] when the key is taken.
    async fn create(&self, mapping: ProviderMapping) -> Result<(), StoreError>;

    /// Replaces the whole record. Fails with [`StoreError::MappingNotFound`] for unknown keys.
    async fn update(&self, mapping: ProviderMapping) -> Result<(), StoreError>;

    async fn set_sync_status(
        &self,
        key: MappingKey,
        status: SyncStatus,
        error: Option<String>,
    ) -> Result<(), StoreError>;

    /// Local entities of `kind` with no mapping for the provider, ordered by id.
    async fn list_unsynced(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LocalEntity>, StoreError>;

    /// Local entities of `kind` whose mapping is in one of `statuses`, ordered by id.
    async fn list_with_status(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        statuses: Vec<SyncStatus>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LocalEntity>, StoreError>;

    async fn get_entity(&self, kind: EntityKind, local_id: i64) -> Result<Option<LocalEntity>, StoreError>;
}
