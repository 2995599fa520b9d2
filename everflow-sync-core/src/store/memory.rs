use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{MappingKey, MappingStore, ProviderMapping, Snapshot, SyncStatus};
use crate::config::ProviderType;
use crate::domain::{EntityKind, LocalEntity};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct State {
    entities: BTreeMap<(EntityKind, i64), LocalEntity>,
    mappings: BTreeMap<MappingKey, ProviderMapping>,
}

impl State {
    fn with_entities(mut self, entities: impl IntoIterator<Item = LocalEntity>) -> Self {
        for entity in entities {
            self.entities.insert((entity.kind(), entity.id()), entity);
        }
        self
    }
}

/// Mapping store held entirely in memory. One lock guards entities and
/// mappings, so each call is atomic.
#[derive(Debug, Default)]
pub struct InMemoryMappingStore {
    state: Mutex<State>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(entities: impl IntoIterator<Item = LocalEntity>) -> Self {
        Self::from_state(State::default().with_entities(entities))
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = State::default().with_entities(snapshot.entities());
        for mapping in snapshot.mappings {
            state.mappings.insert(mapping.key(), mapping);
        }
        Self::from_state(state)
    }

    fn from_state(state: State) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Adds or replaces a local entity. The surrounding platform owns these.
    pub fn insert_entity(&self, entity: LocalEntity) -> Result<(), StoreError> {
        self.lock()?
            .entities
            .insert((entity.kind(), entity.id()), entity);
        Ok(())
    }

    /// Every mapping, ordered by key.
    pub fn mappings(&self) -> Result<Vec<ProviderMapping>, StoreError> {
        Ok(self.lock()?.mappings.values().cloned().collect())
    }

    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let state = self.lock()?;
        Ok(Snapshot::from_parts(
            state.entities.values().cloned(),
            state.mappings.values().cloned(),
        ))
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("mapping store lock poisoned".into()))
    }

    fn select(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        limit: usize,
        offset: usize,
        keep: impl Fn(Option<&ProviderMapping>) -> bool,
    ) -> Result<Vec<LocalEntity>, StoreError> {
        let state = self.lock()?;
        Ok(state
            .entities
            .range((kind, i64::MIN)..=(kind, i64::MAX))
            .filter(|((kind, id), _)| {
                keep(state.mappings.get(&MappingKey::new(*kind, *id, provider_type)))
            })
            .map(|(_, entity)| entity.clone())
            .skip(offset)
            .take(limit)
            .collect())
    }
}

#[async_trait]
impl MappingStore for InMemoryMappingStore {
    async fn get(&self, key: MappingKey) -> Result<Option<ProviderMapping>, StoreError> {
        Ok(self.lock()?.mappings.get(&key).cloned())
    }

    async fn create(&self, mapping: ProviderMapping) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let key = mapping.key();
        if state.mappings.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                kind: key.kind,
                local_id: key.local_entity_id,
            });
        }
        debug!(mapping = %key, "[STORE] Created mapping");
        state.mappings.insert(key, mapping);
        Ok(())
    }

    async fn update(&self, mut mapping: ProviderMapping) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let key = mapping.key();
        if !state.mappings.contains_key(&key) {
            return Err(StoreError::MappingNotFound {
                kind: key.kind,
                local_id: key.local_entity_id,
            });
        }
        mapping.updated_at = Utc::now();
        debug!(mapping = %key, status = ?mapping.sync_status, "[STORE] Updated mapping");
        state.mappings.insert(key, mapping);
        Ok(())
    }

    async fn set_sync_status(
        &self,
        key: MappingKey,
        status: SyncStatus,
        error: Option<String>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let mapping = state
            .mappings
            .get_mut(&key)
            .ok_or(StoreError::MappingNotFound {
                kind: key.kind,
                local_id: key.local_entity_id,
            })?;
        mapping.sync_status = Some(status);
        mapping.sync_error = error;
        mapping.updated_at = Utc::now();
        Ok(())
    }

    async fn list_unsynced(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LocalEntity>, StoreError> {
        self.select(kind, provider_type, limit, offset, |mapping| mapping.is_none())
    }

    async fn list_with_status(
        &self,
        kind: EntityKind,
        provider_type: ProviderType,
        statuses: Vec<SyncStatus>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LocalEntity>, StoreError> {
        self.select(kind, provider_type, limit, offset, |mapping| {
            mapping
                .and_then(|m| m.sync_status)
                .is_some_and(|status| statuses.contains(&status))
        })
    }

    async fn get_entity(&self, kind: EntityKind, local_id: i64) -> Result<Option<LocalEntity>, StoreError> {
        Ok(self.lock()?.entities.get(&(kind, local_id)).cloned())
    }
}
