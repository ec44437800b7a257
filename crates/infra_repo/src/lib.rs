//! Repository Infrastructure Layer
//!
//! This crate provides the orchestrating core of the data-access stack:
//! a generic repository that applies configurable sanitization and
//! validation before delegating to an injected persistence session, and
//! translates provider-level optimistic-concurrency failures into one
//! stable error kind.
//!
//! # Architecture
//!
//! The repository depends only on the [`PersistenceSession`] port; any
//! store that can report a distinguishable "stale version" / "row missing"
//! failure plugs in by supplying a session implementation and, where its
//! failure taxonomy differs, a conflict-matcher predicate. An in-memory
//! adapter ([`MemoryStore`]) ships with the crate.
//!
//! # Pipeline
//!
//! ```text
//! save(entity)
//!   ├─ validate (if RepoOptions.validate_entity) ── abort: ValidationFailed
//!   ├─ sanitize (if RepoOptions.sanitize_entity) ── abort: Sanitization
//!   └─ session.commit
//!        ├─ conflict-matcher hit ── ConcurrencyConflict (wraps the cause)
//!        └─ otherwise ──────────── Persistence (passed through unchanged)
//! ```

pub mod conflict;
pub mod error;
pub mod memory;
pub mod options;
pub mod repository;
pub mod session;

pub use conflict::{default_conflict_matcher, ConflictMatcher};
pub use error::{DataAccessError, SessionError};
pub use memory::MemoryStore;
pub use options::RepoOptions;
pub use repository::{GenericRepository, RepositoryBuilder};
pub use session::PersistenceSession;
