//! Fault-Injecting Sessions
//!
//! `FaultSession` wraps any persistence session and raises a scripted
//! `SessionError` from the next commit or remove, which is how the suite
//! exercises the repository's translation paths without a store that can
//! actually fail. It also counts commits, so tests can prove a rejected
//! save never reached the session.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use access_kernel::{Entity, EntityKey, VersionToken};
use async_trait::async_trait;
use infra_repo::{PersistenceSession, SessionError};

/// Session wrapper that injects scripted failures
pub struct FaultSession<S> {
    inner: S,
    next_commit_fault: Arc<Mutex<Option<SessionError>>>,
    next_remove_fault: Arc<Mutex<Option<SessionError>>>,
    commits: Arc<AtomicUsize>,
}

impl<S> FaultSession<S> {
    /// Wraps a session with no faults scripted
    pub fn wrap(inner: S) -> Self {
        Self {
            inner,
            next_commit_fault: Arc::new(Mutex::new(None)),
            next_remove_fault: Arc::new(Mutex::new(None)),
            commits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Scripts a failure for the next commit
    pub fn fail_next_commit(&self, error: SessionError) {
        *self.next_commit_fault.lock().unwrap() = Some(error);
    }

    /// Scripts a failure for the next remove
    pub fn fail_next_remove(&self, error: SessionError) {
        *self.next_remove_fault.lock().unwrap() = Some(error);
    }

    /// Number of commits that reached the wrapped session or a fault
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Handle for scripting faults after the session moved into a repository
    pub fn controls(&self) -> FaultControls {
        FaultControls {
            next_commit_fault: Arc::clone(&self.next_commit_fault),
            next_remove_fault: Arc::clone(&self.next_remove_fault),
            commits: Arc::clone(&self.commits),
        }
    }
}

/// Shared handle over a `FaultSession`'s scripting state
#[derive(Clone)]
pub struct FaultControls {
    next_commit_fault: Arc<Mutex<Option<SessionError>>>,
    next_remove_fault: Arc<Mutex<Option<SessionError>>>,
    commits: Arc<AtomicUsize>,
}

impl FaultControls {
    /// Scripts a failure for the next commit
    pub fn fail_next_commit(&self, error: SessionError) {
        *self.next_commit_fault.lock().unwrap() = Some(error);
    }

    /// Scripts a failure for the next remove
    pub fn fail_next_remove(&self, error: SessionError) {
        *self.next_remove_fault.lock().unwrap() = Some(error);
    }

    /// Number of commits that reached the wrapped session or a fault
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E, S> PersistenceSession<E> for FaultSession<S>
where
    E: Entity + 'static,
    S: PersistenceSession<E>,
{
    async fn commit(&self, entity: &mut E) -> Result<(), SessionError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.next_commit_fault.lock().unwrap().take() {
            return Err(fault);
        }
        self.inner.commit(entity).await
    }

    async fn remove(
        &self,
        key: EntityKey,
        expected_version: Option<VersionToken>,
    ) -> Result<(), SessionError> {
        if let Some(fault) = self.next_remove_fault.lock().unwrap().take() {
            return Err(fault);
        }
        self.inner.remove(key, expected_version).await
    }

    async fn fetch(&self, key: EntityKey) -> Result<Option<E>, SessionError> {
        self.inner.fetch(key).await
    }

    async fn list(&self) -> Result<Vec<E>, SessionError> {
        self.inner.list().await
    }
}
