//! The entity seam between application records and the repository stack
//!
//! A repository never owns an entity; it mediates persistence for records
//! the caller constructs and mutates. Validation rules and sanitization
//! plans address entity members by name, so the trait exposes a small
//! named-field surface instead of requiring any reflection machinery.

use crate::identifiers::{EntityKey, VersionToken};

/// A persistable record with named text members, an identity key, and an
/// optimistic version token.
///
/// `fields()` declares the member names rule metadata may reference.
/// Binding a rule or sanitize action to a name outside this list is a
/// configuration error detected at repository construction, not at call
/// time.
///
/// `text_field`/`set_text_field` address the members that declarative
/// policies operate on. Members of other types may exist on the concrete
/// struct; the policy layer simply never touches them.
///
/// # Example
///
/// ```rust
/// use access_kernel::{Entity, EntityKey, VersionToken};
///
/// #[derive(Debug, Clone, Default)]
/// struct Note {
///     key: Option<EntityKey>,
///     version: Option<VersionToken>,
///     title: String,
/// }
///
/// impl Entity for Note {
///     fn entity_name() -> &'static str { "Note" }
///     fn fields() -> &'static [&'static str] { &["title"] }
///     fn key(&self) -> Option<EntityKey> { self.key }
///     fn assign_key(&mut self, key: EntityKey) { self.key = Some(key); }
///     fn version(&self) -> Option<VersionToken> { self.version }
///     fn set_version(&mut self, version: VersionToken) { self.version = Some(version); }
///     fn text_field(&self, name: &str) -> Option<&str> {
///         match name {
///             "title" => Some(&self.title),
///             _ => None,
///         }
///     }
///     fn set_text_field(&mut self, name: &str, value: String) -> bool {
///         match name {
///             "title" => { self.title = value; true }
///             _ => false,
///         }
///     }
/// }
/// ```
pub trait Entity: Send + Sync {
    /// Human-readable type name, used in error and log messages
    fn entity_name() -> &'static str
    where
        Self: Sized;

    /// The member names declarative policies may reference
    fn fields() -> &'static [&'static str]
    where
        Self: Sized;

    /// Identity key; `None` until the entity has been persisted
    fn key(&self) -> Option<EntityKey>;

    /// Assigns the identity key; called by the session on create
    fn assign_key(&mut self, key: EntityKey);

    /// Current optimistic version token; `None` until persisted
    fn version(&self) -> Option<VersionToken>;

    /// Records the version token assigned by the latest commit
    fn set_version(&mut self, version: VersionToken);

    /// Reads a named text member, `None` if the name is not a text member
    fn text_field(&self, name: &str) -> Option<&str>;

    /// Writes a named text member, returning whether the name resolved
    fn set_text_field(&mut self, name: &str, value: String) -> bool;
}
