//! Generic repository implementation
//!
//! The repository orchestrates save and delete for one entity type
//! against an injected persistence session, applying the configured
//! policy pipeline. It holds no shared mutable state of its own - only
//! immutable options, bound rule metadata, and the session handle - so it
//! is as safe for concurrent use as the session backing it. No operation
//! is retried automatically; resolving a concurrency conflict requires
//! the caller to re-read the latest version.

use std::marker::PhantomData;

use access_kernel::{CoreError, Entity, EntityKey, VersionToken};
use domain_rules::{RuleSet, RuleSetBuilder, SanitizePlan, SanitizePlanBuilder};
use tracing::{debug, instrument, warn};

use crate::conflict::{default_conflict_matcher, ConflictMatcher};
use crate::error::{DataAccessError, SessionError};
use crate::options::RepoOptions;
use crate::session::PersistenceSession;

/// Orchestrates persistence for one entity type
///
/// # Example
///
/// ```rust,ignore
/// use infra_repo::{GenericRepository, MemoryStore, RepoOptions};
/// use domain_rules::{RuleSet, SanitizePlan};
///
/// let repo = GenericRepository::builder(MemoryStore::new())
///     .options(RepoOptions::default())
///     .rules(RuleSet::builder().required("display_name"))
///     .sanitize(SanitizePlan::builder().trim("display_name"))
///     .build()?;
///
/// let mut card = ContactCard::new("Ada Lovelace");
/// repo.save(&mut card).await?;
/// ```
pub struct GenericRepository<E, S> {
    session: S,
    options: RepoOptions,
    rules: RuleSet,
    sanitizer: SanitizePlan,
    conflict_matcher: ConflictMatcher,
    _entity: PhantomData<fn(E)>,
}

impl<E, S> GenericRepository<E, S>
where
    E: Entity,
    S: PersistenceSession<E>,
{
    /// Starts building a repository around a session
    pub fn builder(session: S) -> RepositoryBuilder<E, S> {
        RepositoryBuilder {
            session,
            options: RepoOptions::default(),
            rules: RuleSet::builder(),
            sanitizer: SanitizePlan::builder(),
            conflict_matcher: default_conflict_matcher(),
            _entity: PhantomData,
        }
    }

    /// The options this repository was constructed with
    pub fn options(&self) -> RepoOptions {
        self.options
    }

    /// Saves the entity (create when it has no key, update otherwise)
    ///
    /// Pipeline order: validate, sanitize, commit. Validation and
    /// sanitization failures abort before the session is touched, so no
    /// partial write can result from them. A commit failure matching the
    /// conflict signature is translated into
    /// [`DataAccessError::ConcurrencyConflict`] wrapping the original
    /// failure; cancellation and every other session failure pass
    /// through unmodified.
    ///
    /// On success the entity carries its persisted state: sanitized
    /// member values, the assigned key on create, and the advanced
    /// version token.
    #[instrument(skip(self, entity), fields(entity_type = E::entity_name()))]
    pub async fn save(&self, entity: &mut E) -> Result<(), DataAccessError> {
        if self.options.validate_entity {
            let failures = self.rules.validate(entity);
            if !failures.is_empty() {
                warn!(violations = failures.len(), "save aborted by validation");
                return Err(DataAccessError::ValidationFailed(failures));
            }
        } else {
            debug!("validation disabled, skipping");
        }

        if self.options.sanitize_entity {
            self.sanitizer.apply(entity)?;
        } else {
            debug!("sanitization disabled, skipping");
        }

        match self.session.commit(entity).await {
            Ok(()) => {
                debug!(key = ?entity.key(), version = ?entity.version(), "entity persisted");
                Ok(())
            }
            Err(error) => Err(self.translate_commit_failure("save", error)),
        }
    }

    /// Deletes the row for `key`
    ///
    /// When `expected_version` is supplied the delete is itself subject
    /// to optimistic concurrency: a stale token or an already-removed row
    /// is translated into the stable conflict kind, exactly as for save.
    #[instrument(skip(self), fields(entity_type = E::entity_name(), %key))]
    pub async fn delete(
        &self,
        key: EntityKey,
        expected_version: Option<VersionToken>,
    ) -> Result<(), DataAccessError> {
        match self.session.remove(key, expected_version).await {
            Ok(()) => {
                debug!("entity deleted");
                Ok(())
            }
            Err(error) => Err(self.translate_commit_failure("delete", error)),
        }
    }

    /// Loads the current row for `key`; absence is `Ok(None)`
    pub async fn get(&self, key: EntityKey) -> Result<Option<E>, DataAccessError> {
        Ok(self.session.fetch(key).await?)
    }

    /// Loads every current row
    pub async fn list(&self) -> Result<Vec<E>, DataAccessError> {
        Ok(self.session.list().await?)
    }

    /// Applies the conflict matcher to a failed commit or delete
    ///
    /// Exactly one of `ConcurrencyConflict` / `Persistence` results from
    /// every failure. Cancellation is never treated as a conflict, even
    /// if a custom matcher claims it.
    fn translate_commit_failure(&self, operation: &str, error: SessionError) -> DataAccessError {
        if !error.is_cancelled() && (self.conflict_matcher)(&error) {
            warn!(%error, "translating provider failure to concurrency conflict");
            DataAccessError::concurrency_conflict(
                format!(
                    "{} of {} rejected: the stored row diverged from the version this operation was based on",
                    operation,
                    E::entity_name()
                ),
                error,
            )
        } else {
            DataAccessError::Persistence(error)
        }
    }
}

/// Builder for [`GenericRepository`]
///
/// `build` binds the accumulated rule and sanitize metadata against the
/// entity's declared members, so malformed metadata (an unknown member,
/// an uncompilable pattern) fails here - at repository construction -
/// rather than on the first save.
pub struct RepositoryBuilder<E, S> {
    session: S,
    options: RepoOptions,
    rules: RuleSetBuilder,
    sanitizer: SanitizePlanBuilder,
    conflict_matcher: ConflictMatcher,
    _entity: PhantomData<fn(E)>,
}

impl<E, S> RepositoryBuilder<E, S>
where
    E: Entity,
    S: PersistenceSession<E>,
{
    /// Sets the policy toggles
    pub fn options(mut self, options: RepoOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the validation rule metadata
    pub fn rules(mut self, rules: RuleSetBuilder) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the sanitization plan metadata
    pub fn sanitize(mut self, sanitizer: SanitizePlanBuilder) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Replaces the conflict-recognition predicate
    ///
    /// Providers whose failure taxonomy differs from the default supply
    /// their own matcher here.
    pub fn conflict_matcher(mut self, matcher: ConflictMatcher) -> Self {
        self.conflict_matcher = matcher;
        self
    }

    /// Binds the metadata and constructs the repository
    pub fn build(self) -> Result<GenericRepository<E, S>, CoreError> {
        let rules = self.rules.bind::<E>()?;
        let sanitizer = self.sanitizer.bind::<E>()?;

        Ok(GenericRepository {
            session: self.session,
            options: self.options,
            rules,
            sanitizer,
            conflict_matcher: self.conflict_matcher,
            _entity: PhantomData,
        })
    }
}
