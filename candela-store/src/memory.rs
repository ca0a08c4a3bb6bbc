use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use candela_core::{CacheDocument, CacheStore, CandelaError};
use tokio::sync::Mutex;

/// In-process store keyed by the raw key string.
///
/// Counts every `get` and `save` so tests can assert that a call touched the
/// store the expected number of times.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<String, CacheDocument>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the document under `key`, without counting a read.
    pub async fn snapshot(&self, key: &str) -> Option<CacheDocument> {
        self.docs.lock().await.get(key).cloned()
    }

    /// Seed a document without counting a write.
    pub async fn seed(&self, key: impl Into<String>, doc: CacheDocument) {
        self.docs.lock().await.insert(key.into(), doc);
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<CacheDocument>, CandelaError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.docs.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, doc: &CacheDocument) -> Result<(), CandelaError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.docs.lock().await.insert(key.to_string(), doc.clone());
        Ok(())
    }
}
