//! In-memory persistence session
//!
//! A session adapter backed by a process-local map, enforcing the same
//! optimistic-concurrency contract a real store would: commits on an
//! existing row require a matching version token, and deletes with an
//! expected token are rejected when the stored token has moved on. Used
//! by tests and demos, and as the reference for what the provider
//! failure taxonomy means.

use std::collections::HashMap;
use std::sync::Arc;

use access_kernel::{Entity, EntityKey, VersionToken};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::SessionError;
use crate::session::PersistenceSession;

#[derive(Debug, Clone)]
struct StoredRow<E> {
    version: VersionToken,
    recorded_at: DateTime<Utc>,
    entity: E,
}

/// Process-local [`PersistenceSession`] with optimistic version tokens
///
/// Cloning the store clones the handle, not the rows; clones share the
/// same underlying map, which is what lets a test hold a handle while a
/// repository owns another.
#[derive(Debug)]
pub struct MemoryStore<E> {
    rows: Arc<RwLock<HashMap<EntityKey, StoredRow<E>>>>,
}

impl<E> MemoryStore<E> {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// When the row for `key` was last written
    pub async fn recorded_at(&self, key: EntityKey) -> Option<DateTime<Utc>> {
        self.rows.read().await.get(&key).map(|row| row.recorded_at)
    }

    /// The stored version token for `key`
    pub async fn stored_version(&self, key: EntityKey) -> Option<VersionToken> {
        self.rows.read().await.get(&key).map(|row| row.version)
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

#[async_trait]
impl<E> PersistenceSession<E> for MemoryStore<E>
where
    E: Entity + Clone + 'static,
{
    async fn commit(&self, entity: &mut E) -> Result<(), SessionError> {
        let mut rows = self.rows.write().await;

        match entity.key() {
            None => {
                let key = EntityKey::new();
                let version = VersionToken::initial();
                entity.assign_key(key);
                entity.set_version(version);
                rows.insert(
                    key,
                    StoredRow {
                        version,
                        recorded_at: Utc::now(),
                        entity: entity.clone(),
                    },
                );
                debug!(%key, "row created");
                Ok(())
            }
            Some(key) => {
                let row = rows.get_mut(&key).ok_or(SessionError::RowMissing {
                    entity: E::entity_name(),
                    key,
                })?;

                if entity.version() != Some(row.version) {
                    return Err(SessionError::StaleVersion {
                        entity: E::entity_name(),
                        key,
                    });
                }

                let next = row.version.next();
                entity.set_version(next);
                row.version = next;
                row.recorded_at = Utc::now();
                row.entity = entity.clone();
                debug!(%key, version = %next, "row updated");
                Ok(())
            }
        }
    }

    async fn remove(
        &self,
        key: EntityKey,
        expected_version: Option<VersionToken>,
    ) -> Result<(), SessionError> {
        let mut rows = self.rows.write().await;

        let row = rows.get(&key).ok_or(SessionError::RowMissing {
            entity: E::entity_name(),
            key,
        })?;

        if let Some(expected) = expected_version {
            if expected != row.version {
                return Err(SessionError::StaleVersion {
                    entity: E::entity_name(),
                    key,
                });
            }
        }

        rows.remove(&key);
        debug!(%key, "row removed");
        Ok(())
    }

    async fn fetch(&self, key: EntityKey) -> Result<Option<E>, SessionError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&key).map(|row| row.entity.clone()))
    }

    async fn list(&self) -> Result<Vec<E>, SessionError> {
        let rows = self.rows.read().await;
        Ok(rows.values().map(|row| row.entity.clone()).collect())
    }
}
