use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

use super::{InMemoryMappingStore, MappingKey, MappingStore, ProviderMapping, SyncStatus};
use crate::config::ProviderType;
use crate::domain::{Advertiser, Affiliate, Campaign, EntityKind, LocalEntity};
use crate::error::StoreError;

/// On-disk layout of a [`FileMappingStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub advertisers: Vec<Advertiser>,
    #[serde(default)]
    pub affiliates: Vec<Affiliate>,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
    #[serde(default)]
    pub mappings: Vec<ProviderMapping>,
}

impl Snapshot {
    pub fn from_parts(
        entities: impl IntoIterator<Item = LocalEntity>,
        mappings: impl IntoIterator<Item = ProviderMapping>,
    ) -> Self {
        let mut snapshot = Snapshot {
            mappings: mappings.into_iter().collect(),
            ..Default::default()
        };
        for entity in entities {
            match entity {
                LocalEntity::Advertiser(a) => snapshot.advertisers.push(a),
                LocalEntity::Affiliate(a) => snapshot.affiliates.push(a),
                LocalEntity::Campaign(c) => snapshot.campaigns.push(c),
            }
        }
        snapshot
    }

    pub fn entities(&self) -> Vec<LocalEntity> {
        self.advertisers
            .iter()
            .cloned()
            .map(LocalEntity::Advertiser)
            .chain(self.affiliates.iter().cloned().map(LocalEntity::Affiliate))
            .chain(self.campaigns.iter().cloned().map(LocalEntity::Campaign))
            .collect()
    }
}

/// [`InMemoryMappingStore`] backed by a JSON snapshot file. Every mutation
/// rewrites the file before returning.
#[derive(Debug)]
pub struct FileMappingStore {
    path: PathBuf,
    inner: InMemoryMappingStore,
    write_lock: Mutex<()>,
}

impl FileMappingStore {
    /// Loads the snapshot at `path`. A missing or unparsable file is
    /// [`StoreError::Unavailable`].
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "[STORE] Failed to read mapping store");
            StoreError::Unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&raw).map_err(|e| {
            error!(path = %path.display(), error = %e, "[STORE] Failed to parse mapping store");
            StoreError::Unavailable(format!("cannot parse {}: {e}", path.display()))
        })?;
        info!(
            path = %path.display(),
            advertisers = snapshot.advertisers.len(),
            affiliates = snapshot.affiliates.len(),
            campaigns = snapshot.campaigns.len(),
            mappings = snapshot.mappings.len(),
            "[STORE] Opened mapping store"
        );
        Ok(Self {
            path,
            inner: InMemoryMappingStore::from_snapshot(snapshot),
            write_lock: Mutex::new(()),
        })
    }

    /// Writes `snapshot` to `path` and opens it.
    pub async fn create_with(path: impl AsRef<Path>, snapshot: &Snapshot) -> Result<Self, StoreError> {
        tokio::fs::write(path.as_ref(), serde_json::to_vec_pretty(snapshot)?).await?;
        Self::open(path).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mappings(&self) -> Result<Vec<ProviderMapping>, StoreError> {
        self.inner.mappings()
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.inner.snapshot()?;
        tokio::fs::write(&self.path, serde_json::to_vec_pretty(&snapshot)?).await?;
        Ok(())
    }
}

#[async_trait]
impl MappingStore for FileMappingStore {
    async fn get(&self, key: MappingKey) -> Result<Option<ProviderMapping>, StoreError> {
        self.inner.get(key).await
    }

    async fn create(&self, mapping: ProviderMapping) -> Result<(), StoreError> {
        self.inner.create(mapping).await?;
        self.persist().await
    }

    async fn update(&self, mapping: ProviderMapping) -> Result<(), StoreError> {
        self.inner.update(mapping).await?;
        self.persist().await
    }

    async fn set_sync_status(
        &self,
        key: MappingKey,
        status: SyncStatus,
        error: Option<String>,
    ) -> Result<(), StoreError> {
        self.inner.set_sync_status(key, status, error).await?;
        self.persist().await
    }

    async fn list_unsynced(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LocalEntity>, StoreError> {
        self.inner.list_unsynced(kind, provider_type, limit, offset).await
    }

    async fn list_with_status(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        statuses: Vec<SyncStatus>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LocalEntity>, StoreError> {
        self.inner
            .list_with_status(kind, provider_type, statuses, limit, offset)
            .await
    }

    async fn get_entity(&self, kind: EntityKind, local_id: i64) -> Result<Option<LocalEntity>, StoreError> {
        self.inner.get_entity(kind, local_id).await
    }
}
