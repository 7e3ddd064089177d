//! Policy document shape and storage

use crate::error::Result;
use crate::scan;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored policy module, keyed by its lookup path.
///
/// The path is the sole identity; the store enforces that no two documents
/// share one (last write wins). The core only ever reads documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Unique lookup key, e.g. `/perf-server/api/v1/bus/latestData.rego`
    pub path: String,

    /// Human-readable policy name
    #[serde(default)]
    pub name: String,

    /// HTTP method the policy is associated with. Informational only;
    /// lookup is by path.
    #[serde(default)]
    pub method: String,

    /// Policy module source text
    pub source: String,

    /// Input fields the module references, derived from `source` when the
    /// document is written and cached alongside it
    #[serde(default)]
    pub declared_inputs: Vec<String>,
}

impl PolicyDocument {
    /// Create a document, deriving `declared_inputs` from the source
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let declared_inputs = scan::declared_inputs(&source);
        Self {
            path: path.into(),
            name: String::new(),
            method: String::new(),
            source,
            declared_inputs,
        }
    }

    /// Set the policy name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the associated HTTP method
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

/// Policy store trait
///
/// `fetch` returning `Ok(None)` is the expected "no policy at this key"
/// outcome; `Err` means the store itself failed, which aborts the cascade
/// rather than being retried or treated as a miss.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Get the document at a lookup key, if any
    async fn fetch(&self, path: &str) -> Result<Option<PolicyDocument>>;

    /// Store a document, replacing any document at the same path
    async fn put(&self, document: PolicyDocument) -> Result<()>;

    /// Delete the document at a lookup key
    async fn delete(&self, path: &str) -> Result<()>;

    /// List all stored documents
    async fn list(&self) -> Result<Vec<PolicyDocument>>;
}

/// In-memory policy store implementation
pub struct InMemoryPolicyStore {
    documents: Arc<RwLock<HashMap<String, PolicyDocument>>>,
}

impl InMemoryPolicyStore {
    /// Create a new in-memory policy store
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn fetch(&self, path: &str) -> Result<Option<PolicyDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.get(path).cloned())
    }

    async fn put(&self, document: PolicyDocument) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document.path.clone(), document);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.remove(path);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PolicyDocument>> {
        let documents = self.documents.read().await;
        Ok(documents.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_declared_inputs() {
        let document = PolicyDocument::new(
            "/svc/do.rego",
            "input.project\ninput.role\nallow { input.project == \"x\" }",
        );
        assert_eq!(document.declared_inputs, vec!["project", "role"]);
    }

    #[tokio::test]
    async fn store_roundtrip() {
        let store = InMemoryPolicyStore::new();
        let document = PolicyDocument::new("/svc/do.rego", "input.role").with_name("do");

        store.put(document.clone()).await.unwrap();

        let fetched = store.fetch("/svc/do.rego").await.unwrap();
        assert_eq!(fetched, Some(document));

        assert_eq!(store.list().await.unwrap().len(), 1);

        store.delete("/svc/do.rego").await.unwrap();
        assert_eq!(store.fetch("/svc/do.rego").await.unwrap(), None);
    }

    #[test]
    fn persisted_shape_tolerates_missing_optional_fields() {
        let document: PolicyDocument = serde_json::from_str(
            r#"{"path": "/svc/do.rego", "source": "input.role"}"#,
        )
        .unwrap();
        assert_eq!(document.path, "/svc/do.rego");
        assert!(document.name.is_empty());
        assert!(document.method.is_empty());
        // Derived field was not persisted; callers recompute on write.
        assert!(document.declared_inputs.is_empty());
    }

    #[tokio::test]
    async fn missing_key_is_none_not_error() {
        let store = InMemoryPolicyStore::new();
        assert_eq!(store.fetch("/nowhere.rego").await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_write_wins_on_duplicate_path() {
        let store = InMemoryPolicyStore::new();
        store
            .put(PolicyDocument::new("/svc/do.rego", "input.role"))
            .await
            .unwrap();
        store
            .put(PolicyDocument::new("/svc/do.rego", "input.project"))
            .await
            .unwrap();

        let fetched = store.fetch("/svc/do.rego").await.unwrap().unwrap();
        assert_eq!(fetched.declared_inputs, vec!["project"]);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
