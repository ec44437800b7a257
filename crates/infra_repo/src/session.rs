//! Persistence session port
//!
//! The repository delegates every actual read and write to a session
//! implementing this trait. The contract the repository relies on is
//! narrow: a commit either succeeds as a single unit of work or raises a
//! [`SessionError`], and a store with optimistic concurrency reports a
//! distinguishable stale-version / row-missing failure. Cancellation, if
//! the store supports it, is raised as `SessionError::Cancelled` and
//! propagates through the repository untranslated.

use access_kernel::{Entity, EntityKey, VersionToken};
use async_trait::async_trait;

use crate::error::SessionError;

/// Commit-style persistence operations over one entity type
///
/// # Contract
///
/// - `commit` on an entity with no key is a create: the session assigns
///   a fresh key and the initial version token, mutating the entity.
/// - `commit` on an entity with a key is an update: the session compares
///   the entity's version token with the stored one and raises
///   `StaleVersion` on mismatch or `RowMissing` when the row is gone.
///   On success the entity carries the advanced token.
/// - `remove` with an expected version is subject to the same optimistic
///   check; `remove` with `None` is unconditional.
/// - `fetch` of an absent key is `Ok(None)`, not an error.
#[async_trait]
pub trait PersistenceSession<E: Entity>: Send + Sync {
    /// Persists the entity as one unit of work
    async fn commit(&self, entity: &mut E) -> Result<(), SessionError>;

    /// Deletes the row for `key`, optionally enforcing a version token
    async fn remove(
        &self,
        key: EntityKey,
        expected_version: Option<VersionToken>,
    ) -> Result<(), SessionError>;

    /// Loads the current row for `key`
    async fn fetch(&self, key: EntityKey) -> Result<Option<E>, SessionError>;

    /// Loads every current row
    async fn list(&self) -> Result<Vec<E>, SessionError>;
}
