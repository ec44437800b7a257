//! Integration tests for the generic repository
//!
//! These run the full pipeline against the in-memory session: policy
//! toggles, create/update/delete lifecycles, version-token advancement,
//! and optimistic-conflict translation between two writers sharing one
//! store.

use access_kernel::{Entity, EntityKey, VersionToken};
use domain_rules::{RuleSet, SanitizePlan};
use infra_repo::{DataAccessError, GenericRepository, MemoryStore, RepoOptions};

/// Installs a subscriber so `RUST_LOG=debug cargo test` shows pipeline
/// decisions; repeated calls are a no-op.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Article {
    key: Option<EntityKey>,
    version: Option<VersionToken>,
    title: String,
    summary: String,
}

impl Article {
    fn new(title: &str, summary: &str) -> Self {
        Self {
            title: title.to_string(),
            summary: summary.to_string(),
            ..Default::default()
        }
    }
}

impl Entity for Article {
    fn entity_name() -> &'static str {
        "Article"
    }
    fn fields() -> &'static [&'static str] {
        &["title", "summary"]
    }
    fn key(&self) -> Option<EntityKey> {
        self.key
    }
    fn assign_key(&mut self, key: EntityKey) {
        self.key = Some(key);
    }
    fn version(&self) -> Option<VersionToken> {
        self.version
    }
    fn set_version(&mut self, version: VersionToken) {
        self.version = Some(version);
    }
    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "summary" => Some(&self.summary),
            _ => None,
        }
    }
    fn set_text_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "title" => self.title = value,
            "summary" => self.summary = value,
            _ => return false,
        }
        true
    }
}

fn standard_repo(
    store: MemoryStore<Article>,
) -> GenericRepository<Article, MemoryStore<Article>> {
    init_tracing();
    GenericRepository::builder(store)
        .rules(
            RuleSet::builder()
                .required("title")
                .max_length("title", 80),
        )
        .sanitize(
            SanitizePlan::builder()
                .trim("title")
                .escape_markup("summary"),
        )
        .build()
        .expect("rule metadata must bind")
}

#[tokio::test]
async fn test_create_assigns_key_and_initial_version() {
    let repo = standard_repo(MemoryStore::new());

    let mut article = Article::new("Hello", "first post");
    repo.save(&mut article).await.unwrap();

    assert!(article.key.is_some());
    assert_eq!(article.version, Some(VersionToken::initial()));
}

#[tokio::test]
async fn test_update_advances_version_token() {
    let store = MemoryStore::new();
    let repo = standard_repo(store.clone());

    let mut article = Article::new("Hello", "first post");
    repo.save(&mut article).await.unwrap();
    let key = article.key.unwrap();

    article.summary = "edited".to_string();
    repo.save(&mut article).await.unwrap();

    assert_eq!(article.version, Some(VersionToken::initial().next()));
    assert_eq!(store.stored_version(key).await, article.version);
}

#[tokio::test]
async fn test_save_returns_sanitized_state() {
    let repo = standard_repo(MemoryStore::new());

    let mut article = Article::new("  Hello  ", "a <b> c");
    repo.save(&mut article).await.unwrap();

    assert_eq!(article.title, "Hello");
    assert_eq!(article.summary, "a &lt;b&gt; c");

    let stored = repo.get(article.key.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored, article);
}

#[tokio::test]
async fn test_validation_failure_aborts_before_any_write() {
    let store = MemoryStore::new();
    let repo = standard_repo(store.clone());

    let mut article = Article::new("   ", "no title");
    let error = repo.save(&mut article).await.unwrap_err();

    match &error {
        DataAccessError::ValidationFailed(failures) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].field, "title");
        }
        other => panic!("Expected ValidationFailed, got: {other}"),
    }
    assert!(store.is_empty().await, "no write may result from a rejected save");
    assert!(article.key.is_none());
}

#[tokio::test]
async fn test_passthrough_options_skip_both_stages() {
    let store = MemoryStore::new();
    let repo = GenericRepository::builder(store.clone())
        .options(RepoOptions::passthrough())
        .rules(RuleSet::builder().required("title"))
        .sanitize(SanitizePlan::builder().trim("title"))
        .build()
        .unwrap();

    // Fails the required rule and needs trimming, but both stages are off
    let mut article = Article::new("  ", "raw <content>");
    repo.save(&mut article).await.unwrap();

    let stored = repo.get(article.key.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.title, "  ");
    assert_eq!(stored.summary, "raw <content>");
}

#[tokio::test]
async fn test_validate_only_options() {
    let repo = GenericRepository::builder(MemoryStore::new())
        .options(RepoOptions::new().with_sanitize_entity(false))
        .rules(RuleSet::builder().required("title"))
        .sanitize(SanitizePlan::builder().trim("title"))
        .build()
        .unwrap();

    let mut article = Article::new("  padded  ", "");
    repo.save(&mut article).await.unwrap();
    assert_eq!(article.title, "  padded  ");
}

#[tokio::test]
async fn test_concurrent_writers_second_save_conflicts() {
    let store = MemoryStore::new();
    let repo = standard_repo(store.clone());

    let mut original = Article::new("Shared", "v1");
    repo.save(&mut original).await.unwrap();

    // Two writers start from the same persisted version
    let mut writer_a = original.clone();
    let mut writer_b = original.clone();

    writer_a.summary = "from a".to_string();
    repo.save(&mut writer_a).await.unwrap();

    writer_b.summary = "from b".to_string();
    let error = repo.save(&mut writer_b).await.unwrap_err();

    assert!(error.is_concurrency_conflict());
    match &error {
        DataAccessError::ConcurrencyConflict { source, .. } => {
            assert!(source.is_stale_version());
        }
        _ => unreachable!(),
    }

    // The winning write is intact
    let stored = repo.get(original.key.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.summary, "from a");
}

#[tokio::test]
async fn test_delete_with_stale_version_conflicts() {
    let repo = standard_repo(MemoryStore::new());

    let mut article = Article::new("Doomed", "");
    repo.save(&mut article).await.unwrap();
    let key = article.key.unwrap();

    article.summary = "edited".to_string();
    repo.save(&mut article).await.unwrap();

    // Delete based on the superseded token
    let error = repo
        .delete(key, Some(VersionToken::initial()))
        .await
        .unwrap_err();
    assert!(error.is_concurrency_conflict());

    // Delete with the current token succeeds
    repo.delete(key, article.version).await.unwrap();
    assert!(repo.get(key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_of_missing_row_conflicts() {
    let repo = standard_repo(MemoryStore::new());

    let error = repo.delete(EntityKey::new(), None).await.unwrap_err();
    assert!(error.is_concurrency_conflict());
    match &error {
        DataAccessError::ConcurrencyConflict { source, .. } => {
            assert!(source.is_row_missing());
        }
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn test_unknown_rule_member_fails_at_build() {
    let result = GenericRepository::builder(MemoryStore::<Article>::new())
        .rules(RuleSet::builder().required("headline"))
        .build();

    let error = result.err().expect("binding must fail");
    assert!(error.is_configuration());
    assert!(error.to_string().contains("headline"));
}

#[tokio::test]
async fn test_unknown_sanitize_member_fails_at_build() {
    let result = GenericRepository::builder(MemoryStore::<Article>::new())
        .sanitize(SanitizePlan::builder().trim("headline"))
        .build();

    assert!(result.err().expect("binding must fail").is_configuration());
}

#[tokio::test]
async fn test_list_returns_all_current_rows() {
    let repo = standard_repo(MemoryStore::new());

    for n in 0..3 {
        let mut article = Article::new(&format!("Article {n}"), "");
        repo.save(&mut article).await.unwrap();
    }

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_sanitization_failure_aborts_before_any_write() {
    let store = MemoryStore::new();
    let repo = standard_repo(store.clone());

    let mut article = Article::new("Fine title", "bad\u{0000}summary");
    let error = repo.save(&mut article).await.unwrap_err();

    assert!(matches!(error, DataAccessError::Sanitization(_)));
    assert!(store.is_empty().await);
}
